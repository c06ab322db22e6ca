//! PIN setup and change.

use super::common::CommandContext;
use crate::{pin, Result};

pub fn handle_pin_setup(ctx: &mut CommandContext, new_pin: &str, confirm: &str) -> Result<()> {
    pin::setup_pin(&mut ctx.db, new_pin, confirm)?;
    ctx.status("PIN set. Pass --pin or set HANDBALL_STATS_PIN for every other command");
    Ok(())
}

pub fn handle_pin_change(
    ctx: &mut CommandContext,
    current: &str,
    new_pin: &str,
    confirm: &str,
) -> Result<()> {
    pin::change_pin(&mut ctx.db, current, new_pin, confirm)?;
    ctx.status("PIN changed");
    Ok(())
}
