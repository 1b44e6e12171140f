//! Interactive command - Nushell session with make.nu loaded

use super::install::ensure_nushell;
use super::run::locate_project;
use super::Context;
use crate::error::NumakeResult;
use crate::nushell::Nushell;

/// Execute the interactive command
pub async fn execute(ctx: &Context<'_>) -> NumakeResult<()> {
    let bin = ensure_nushell(ctx).await?;
    let project = locate_project(ctx)?;

    Nushell::new(bin, ctx.logger).interactive(&project).await
}
