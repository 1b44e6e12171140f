//! CLI command implementations

pub mod install;
pub mod interactive;
pub mod list;
pub mod run;
pub mod version;

pub use install::execute as install;
pub use interactive::execute as interactive;
pub use list::execute as list;
pub use run::execute as run;
pub use version::execute as version;

use crate::config::Settings;
use crate::log::Logger;
use crate::meta::PackageMeta;

/// State shared by every command, built once at startup
pub struct Context<'a> {
    pub settings: &'a Settings,
    pub logger: &'a Logger,
    pub meta: PackageMeta,
}
