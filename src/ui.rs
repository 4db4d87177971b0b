//! Terminal output. The resolved version is the only thing written to stdout;
//! everything else goes to stderr so pipelines can capture the version.

use console::style;

use crate::analyzer::Resolution;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_version(version: &str) {
    println!("{}", version);
}

/// Print how a version was derived
pub fn display_explanation(resolution: &Resolution, branch: &str) {
    eprintln!(
        "{} {} ({} branch '{}'): {}",
        style("→").yellow(),
        style(&resolution.version).green().bold(),
        resolution.branch_kind.label(),
        branch,
        resolution.rule
    );
    for warning in &resolution.warnings {
        eprintln!("  {} {}", style("!").yellow(), warning);
    }
}
