//! Counter catalogues for each player role.
//!
//! Catalogue order fixes table column order everywhere (live tapping grid,
//! game detail, reports), so entries must never be reordered.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Role;

/// A recordable counter: storage key plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CounterDef {
    pub key: &'static str,
    pub label: &'static str,
}

const fn counter(key: &'static str, label: &'static str) -> CounterDef {
    CounterDef { key, label }
}

pub const FIELD_PLAYER_STATS: [CounterDef; 11] = [
    counter("skot", "Skot"),
    counter("mork", "Mörk"),
    counter("stodsending", "Stoðsending"),
    counter("tapadur_bolti", "Tapaður bolti"),
    counter("fiskad_viti", "Fiskað víti"),
    counter("havorn", "Hávörn"),
    counter("frikast", "Fríkast"),
    counter("stolinn_bolti", "Stolinn bolti"),
    counter("rudningur_plus", "Ruðningur +"),
    counter("rudningur_minus", "Ruðningur -"),
    counter("hradaupphlaup", "Hraðaupphl."),
];

pub const GOALKEEPER_STATS: [CounterDef; 5] = [
    counter("varin_skot", "Varin skot"),
    counter("fyrri_halfleikur", "Fyrri hálfleikur"),
    counter("seinni_halfleikur", "Seinni hálfleikur"),
    counter("sendingar_plus", "Sendingar ++"),
    counter("sendingar_minus", "Sendingar --"),
];

/// Derived efficiency metrics shown for field players.
pub const EFFICIENCY_STATS: [CounterDef; 4] = [
    counter("shot_pct", "Skotnýting %"),
    counter("assist_turnover", "Stoðs. / Tap. boltar"),
    counter("efficiency_rating", "Vinnsluhlutfall"),
    counter("efficiency_per_game", "Vinnsla / leik"),
];

impl Role {
    /// The ordered counter catalogue for this role.
    pub fn catalogue(&self) -> &'static [CounterDef] {
        stats_for_role(*self)
    }

    /// Keys of this role's catalogue, in catalogue order.
    pub fn counter_keys(&self) -> Vec<&'static str> {
        self.catalogue().iter().map(|c| c.key).collect()
    }

    pub fn has_counter(&self, key: &str) -> bool {
        self.catalogue().iter().any(|c| c.key == key)
    }
}

pub fn stats_for_role(role: Role) -> &'static [CounterDef] {
    match role {
        Role::FieldPlayer => &FIELD_PLAYER_STATS,
        Role::Goalkeeper => &GOALKEEPER_STATS,
    }
}

/// Every counter of the role's catalogue initialised to zero.
pub fn empty_counters(role: Role) -> BTreeMap<String, u32> {
    stats_for_role(role)
        .iter()
        .map(|c| (c.key.to_string(), 0))
        .collect()
}

/// Which catalogue a key belongs to, if any.
pub fn counter_role(key: &str) -> Option<Role> {
    [Role::FieldPlayer, Role::Goalkeeper]
        .into_iter()
        .find(|role| role.has_counter(key))
}

/// Look up a counter definition across both catalogues.
pub fn find_counter(key: &str) -> Option<&'static CounterDef> {
    FIELD_PLAYER_STATS
        .iter()
        .chain(GOALKEEPER_STATS.iter())
        .find(|c| c.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_stats_for_role() {
        let field = stats_for_role(Role::FieldPlayer);
        assert_eq!(field.len(), 11);
        assert_eq!(field[0].key, "skot");
        assert_eq!(field[1].key, "mork");
        assert_eq!(field[10].key, "hradaupphlaup");

        let gk = stats_for_role(Role::Goalkeeper);
        assert_eq!(gk.len(), 5);
        assert_eq!(gk[0].key, "varin_skot");
        assert_eq!(gk[4].label, "Sendingar --");
    }

    #[test]
    fn test_catalogues_are_disjoint_and_unique() {
        let field: HashSet<_> = FIELD_PLAYER_STATS.iter().map(|c| c.key).collect();
        let gk: HashSet<_> = GOALKEEPER_STATS.iter().map(|c| c.key).collect();

        assert_eq!(field.len(), FIELD_PLAYER_STATS.len());
        assert_eq!(gk.len(), GOALKEEPER_STATS.len());
        assert!(field.is_disjoint(&gk));
    }

    #[test]
    fn test_empty_counters() {
        let counters = empty_counters(Role::Goalkeeper);
        assert_eq!(counters.len(), 5);
        assert!(counters.values().all(|&v| v == 0));
        assert!(counters.contains_key("fyrri_halfleikur"));

        let counters = empty_counters(Role::FieldPlayer);
        assert_eq!(counters.len(), 11);
        assert_eq!(counters.get("mork"), Some(&0));
    }

    #[test]
    fn test_counter_role_lookup() {
        assert_eq!(counter_role("mork"), Some(Role::FieldPlayer));
        assert_eq!(counter_role("varin_skot"), Some(Role::Goalkeeper));
        assert_eq!(counter_role("skot_mork"), None);

        assert_eq!(find_counter("havorn").unwrap().label, "Hávörn");
        assert!(find_counter("nope").is_none());
    }

    #[test]
    fn test_role_catalogue_helpers() {
        assert_eq!(Role::Goalkeeper.catalogue(), &GOALKEEPER_STATS[..]);
        assert!(Role::FieldPlayer.has_counter("stolinn_bolti"));
        assert!(!Role::FieldPlayer.has_counter("varin_skot"));
        assert_eq!(
            Role::Goalkeeper.counter_keys(),
            vec![
                "varin_skot",
                "fyrri_halfleikur",
                "seinni_halfleikur",
                "sendingar_plus",
                "sendingar_minus"
            ]
        );
    }
}
