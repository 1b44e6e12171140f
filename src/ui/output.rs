//! Output functions for consistent CLI formatting

use console::style;

/// Print the command listing produced from make.nu
pub fn command_list(listing: &str) {
    println!("{}", style("Commands:").bold());
    println!("{}", listing.trim_end());
    println!(
        "Run '{}' for more information.",
        style("<command> --help").cyan()
    );
}

/// Print version information
pub fn versions(numake_version: &str, nu_version: &str) {
    println!("numake {}", numake_version);
    println!("nushell {}", nu_version);
}

/// Print an error and its optional hint to stderr
pub fn error(message: &str, hint: Option<&str>) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    if let Some(hint) = hint {
        eprintln!("{} {}", style("Hint:").yellow(), hint);
    }
}
