//! Version command

use super::Context;
use crate::error::NumakeResult;
use crate::ui;

/// Print the numake and pinned Nushell versions
pub async fn execute(ctx: &Context<'_>) -> NumakeResult<()> {
    ui::versions(&ctx.meta.numake_version, &ctx.meta.nu_version);
    Ok(())
}
