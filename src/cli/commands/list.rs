//! List command - show the commands defined in make.nu

use super::install::ensure_nushell;
use super::run::locate_project;
use super::Context;
use crate::error::NumakeResult;
use crate::nushell::Nushell;
use crate::ui;

/// Execute the list command
pub async fn execute(ctx: &Context<'_>) -> NumakeResult<()> {
    let bin = ensure_nushell(ctx).await?;
    let project = locate_project(ctx)?;

    let listing = Nushell::new(bin, ctx.logger).list(&project).await?;
    ui::command_list(&listing);
    Ok(())
}
