//! numake - make.nu task runner
//!
//! CLI entry point: provisions the pinned Nushell and dispatches.

use clap::Parser;
use numake::cli::{commands, Action, Cli, Context};
use numake::config::Settings;
use numake::error::{NumakeError, NumakeResult};
use numake::meta::PackageMeta;
use numake::ui;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Settings and logger are fixed for the rest of the run
    let settings = Settings::from_env();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            if settings.debug {
                let _ = e.print();
            }
            return ExitCode::FAILURE;
        }
    };

    let logger = settings.logger();
    logger.info("--- numake ---");

    match run(&cli, &settings, &logger).await {
        Ok(()) => {
            logger.info("done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if settings.debug {
                ui::error(&error_chain(&e), e.hint());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, settings: &Settings, logger: &numake::Logger) -> NumakeResult<()> {
    let ctx = Context {
        settings,
        logger,
        meta: PackageMeta::current()?,
    };

    match cli.action() {
        Action::Version => commands::version(&ctx).await,
        Action::List => commands::list(&ctx).await,
        Action::Interactive => commands::interactive(&ctx).await,
        Action::Install => commands::install(&ctx).await,
        Action::Run(command) => commands::run(&ctx, &command).await,
    }
}

fn error_chain(err: &NumakeError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
