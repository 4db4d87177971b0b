use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use git_build_version::cli::{run_resolve, ResolveArgs};
use git_build_version::config;
use git_build_version::git::Git2Repository;
use git_build_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-build-version",
    version,
    about = "Get a version number to use for a new build from git tags and branches"
)]
struct Args {
    #[arg(short, long, help = "The directory of the git repository")]
    directory: PathBuf,

    #[arg(short, long, help = "Current branch")]
    branch: String,

    #[arg(
        short = 'm',
        long = "major_minor_patch",
        help = "Minimum major.minor.patch for mainline builds [default: 0.1.0]"
    )]
    major_minor_patch: Option<String>,

    #[arg(
        short = 'p',
        long = "increment_position",
        help = "Digit to bump when mainline and a release branch share a version [default: 2]"
    )]
    increment_position: Option<usize>,

    #[arg(
        short = 'n',
        long = "build_number",
        help = "Current build number; the BUILD_NUMBER environment variable wins when set [default: 0]"
    )]
    build_number: Option<u64>,

    #[arg(
        short = 'l',
        long = "branch_number_length",
        help = "Digits of the unique number derived from feature and developer branch names [default: 8]"
    )]
    branch_number_length: Option<u32>,

    #[arg(short, long, help = "Remote whose branches are considered [default: origin]")]
    remote: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Explain on stderr how the version was derived")]
    explain: bool,

    #[arg(short, long, help = "Enable debug logging on stderr")]
    verbose: bool,
}

impl Args {
    fn resolve_args(&self) -> ResolveArgs {
        ResolveArgs {
            branch: self.branch.clone(),
            major_minor_patch: self.major_minor_patch.clone(),
            increment_position: self.increment_position,
            build_number: self.build_number,
            branch_number_length: self.branch_number_length,
            remote: self.remote.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref(), Some(args.directory.as_path()))
        .context("Failed to load configuration")?;

    let repo = Git2Repository::open(&args.directory).with_context(|| {
        format!(
            "Cannot open git repository at {}",
            args.directory.display()
        )
    })?;

    let resolution = run_resolve(&repo, &args.resolve_args(), &config)
        .with_context(|| format!("Failed to resolve version for branch '{}'", args.branch))?;

    ui::display_version(&resolution.version);
    if args.explain {
        ui::display_explanation(&resolution, &args.branch);
    }

    Ok(())
}
