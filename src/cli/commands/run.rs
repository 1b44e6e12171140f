//! Run command - execute a command against make.nu

use super::install::ensure_nushell;
use super::Context;
use crate::error::{NumakeError, NumakeResult};
use crate::nushell::Nushell;
use crate::project::Project;
use std::env;

/// Execute the run command
pub async fn execute(ctx: &Context<'_>, command: &str) -> NumakeResult<()> {
    let bin = ensure_nushell(ctx).await?;
    let project = locate_project(ctx)?;

    Nushell::new(bin, ctx.logger).run(&project, command).await
}

/// Find make.nu from the current directory
pub(super) fn locate_project(ctx: &Context<'_>) -> NumakeResult<Project> {
    let cwd = env::current_dir().map_err(|e| NumakeError::io("getting current directory", e))?;
    let project = Project::find(&cwd)?;

    let shown = project
        .makefile
        .strip_prefix(&cwd)
        .unwrap_or(&project.makefile);
    ctx.logger
        .info(format_args!("located makefile: {}", shown.display()));

    Ok(project)
}
