//! PIN gate.
//!
//! The PIN is stored only as a salted SHA-256 hex digest in the
//! `app_settings` table.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::{
    error::{Result, StatsError},
    storage::TeamDatabase,
    PIN_ENV_VAR,
};

pub const PIN_LENGTH: usize = 4;
pub const PIN_HASH_KEY: &str = "pin_hash";
const PIN_SALT: &str = "grotta-salt";

/// A PIN is exactly four ASCII digits.
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(StatsError::InvalidPin)
    }
}

/// Lowercase hex SHA-256 of the salted PIN.
pub fn hash_pin(pin: &str) -> String {
    let digest = Sha256::digest(format!("{pin}{PIN_SALT}").as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn has_pin(db: &TeamDatabase) -> Result<bool> {
    Ok(db.get_setting(PIN_HASH_KEY)?.is_some())
}

/// Store the first PIN; both entries must match.
pub fn setup_pin(db: &mut TeamDatabase, pin: &str, confirm: &str) -> Result<()> {
    if has_pin(db)? {
        return Err(StatsError::PinAlreadySet);
    }
    validate_pin(pin)?;
    if pin != confirm {
        return Err(StatsError::PinMismatch);
    }
    db.set_setting(PIN_HASH_KEY, &hash_pin(pin))?;
    info!("PIN set");
    Ok(())
}

/// Whether `pin` matches the stored hash. False when no PIN is stored.
pub fn verify_pin(db: &TeamDatabase, pin: &str) -> Result<bool> {
    Ok(db
        .get_setting(PIN_HASH_KEY)?
        .is_some_and(|stored| stored == hash_pin(pin)))
}

/// Let a command through: always when no PIN is set, otherwise only with
/// the right PIN.
pub fn unlock(db: &TeamDatabase, pin: Option<&str>) -> Result<()> {
    if !has_pin(db)? {
        return Ok(());
    }
    let pin = pin.ok_or_else(|| StatsError::PinRequired {
        env_var: PIN_ENV_VAR.to_string(),
    })?;
    if verify_pin(db, pin)? {
        Ok(())
    } else {
        warn!("rejected wrong PIN");
        Err(StatsError::WrongPin)
    }
}

/// Replace the PIN after checking the current one.
pub fn change_pin(db: &mut TeamDatabase, current: &str, new: &str, confirm: &str) -> Result<()> {
    if !has_pin(db)? {
        return Err(StatsError::PinNotSet);
    }
    if !verify_pin(db, current)? {
        return Err(StatsError::WrongPin);
    }
    validate_pin(new)?;
    if new != confirm {
        return Err(StatsError::PinMismatch);
    }
    db.set_setting(PIN_HASH_KEY, &hash_pin(new))?;
    info!("PIN changed");
    Ok(())
}
