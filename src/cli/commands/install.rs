//! Install command - provision the pinned Nushell

use super::Context;
use crate::error::NumakeResult;
use crate::platform::resolve_platform;
use crate::provision::{verify_version, Provisioner, StoreLayout};
use std::path::PathBuf;

/// Make sure the pinned Nushell is installed and return its path.
///
/// In debug mode the binary's reported version is checked before use.
pub async fn ensure_nushell(ctx: &Context<'_>) -> NumakeResult<PathBuf> {
    let logger = ctx.logger;
    logger.info(format_args!("numake version: {}", ctx.meta.numake_version));

    let platform = resolve_platform(logger).await?;
    logger.info(format_args!("platform: {}", platform));

    let provisioner = Provisioner::new(StoreLayout::new(&ctx.settings.data_dir), logger);
    let bin = provisioner.provision(&ctx.meta.nu_version, platform).await?;

    if ctx.settings.debug {
        verify_version(&bin, &ctx.meta.nu_version, logger).await?;
    }

    Ok(bin)
}

/// Execute the install command
pub async fn execute(ctx: &Context<'_>) -> NumakeResult<()> {
    let bin = ensure_nushell(ctx).await?;
    println!("{}", bin.display());
    Ok(())
}
