//! `wallman`: keep a wallpaper collection in order.
//!
//! Every command starts with a full scan of the collection, so the catalog
//! always reflects what is on disk.

mod error;
mod report;
mod terminal;

use crate::error::{ErrorKind, Result};
use clap::{ArgAction, Parser, Subcommand};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use wallman_catalog::{Catalog, Root};
use wallman_config::{Config, LibraryConfig};
use wallman_library::Context;
use wallman_library::scan::ScanOptions;
use wallman_storage::BackendHandle;
use wallman_storage::backend::LocalBackend;

#[derive(Debug, Parser)]
#[command(version, about = "Catalog, sort in and renumber a wallpaper collection")]
struct Cli {
    /// More log output (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Less log output.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,
    /// Configuration file. Defaults to config.toml in the platform config
    /// directory.
    #[arg(short, long, global = true, env = "WALLMAN_CONFIG")]
    config: Option<PathBuf>,
    /// Answer every question with yes.
    #[arg(short, long, global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Scan the collection and report what was found.
    Scan {
        /// Accept wallpapers without an original without asking.
        #[arg(long)]
        ignore_missing: bool,
    },
    /// Print collection statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Move newly named files from staging into the collection.
    SortIn,
    /// Renumber every franchise to 1..n and rename the files to match.
    FixIndexes,
    /// List originals whose wallpaper is gone.
    Orphans {
        /// Move them to the trash directory.
        #[arg(long)]
        apply: bool,
    },
    /// Replace the merge directory with a flat copy of the collection.
    Merge,
}
impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Scan { .. } => "scan",
            Self::Stats { .. } => "stats",
            Self::SortIn => "sort-in",
            Self::FixIndexes => "fix-indexes",
            Self::Orphans { .. } => "orphans",
            Self::Merge => "merge",
        }
    }
}

fn init_tracing(verbose: u8, quiet: u8) {
    let level = match i16::from(verbose) - i16::from(quiet) {
        ..=-1 => LevelFilter::ERROR,
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let ctx = context(&config.library, &cli.command)?;
    let yes = cli.yes;
    let mut confirm = |question: &str| yes || terminal::ask(question);
    let name = cli.command.name();
    let failed = || ErrorKind::Command(name);

    let mut catalog = Catalog::new();
    let options = ScanOptions {
        reset: true,
        ignore_missing_originals: config.scan.ignore_missing_originals
            || matches!(cli.command, Command::Scan { ignore_missing: true }),
    };
    let scanned = wallman_library::scan::scan(&ctx, &mut catalog, &mut confirm, options).or_raise(failed)?;

    match cli.command {
        Command::Scan { .. } => report::scan(&scanned),
        Command::Stats { json } => {
            let stats = wallman_library::stats::stats(&catalog);
            if json {
                let json = serde_json::to_string_pretty(&stats).or_raise(|| ErrorKind::Output)?;
                println!("{json}");
            } else {
                report::stats(&stats);
            }
        },
        Command::SortIn => {
            let report = wallman_library::sort_in::sort_in(&ctx, &mut catalog, &mut confirm).or_raise(failed)?;
            report::sort_in(&report);
        },
        Command::FixIndexes => {
            let report = wallman_library::reconcile::fix_indexes(&ctx, &mut catalog).or_raise(failed)?;
            report::fix_indexes(&report);
        },
        Command::Orphans { apply } => {
            let report = wallman_library::originals::sort_out_originals(&ctx, &catalog, apply).or_raise(failed)?;
            report::orphans(&report);
        },
        Command::Merge => {
            let report =
                wallman_library::merge::merge(&ctx, &catalog, &config.merge.exclude_types).or_raise(failed)?;
            report::merge(&report);
        },
    }
    Ok(())
}

fn open(root: Root, path: &Path) -> Result<BackendHandle> {
    let backend = LocalBackend::new(root.to_string(), path).or_raise(|| ErrorKind::Open(root))?;
    tracing::debug!(%root, dir = %backend.root().display(), "opened collection root");
    Ok(Arc::new(backend))
}

/// Open the configured roots. The trash and merge directories are created
/// when the command is about to write to them.
fn context(library: &LibraryConfig, command: &Command) -> Result<Context> {
    let mut ctx = Context::new(
        open(Root::Wallpapers, &library.wallpapers)?,
        open(Root::Originals, &library.originals)?,
        open(Root::Staging, &library.staging)?,
    );
    let optional = [
        (Root::Trash, library.trash.as_deref(), matches!(command, Command::Orphans { apply: true })),
        (Root::Merge, library.merge.as_deref(), matches!(command, Command::Merge)),
    ];
    for (root, path, writes) in optional {
        let Some(path) = path else {
            continue;
        };
        if writes {
            std::fs::create_dir_all(path).or_raise(|| ErrorKind::Open(root))?;
        }
        if path.is_dir() {
            let backend = open(root, path)?;
            ctx = match root {
                Root::Trash => ctx.with_trash(backend),
                _ => ctx.with_merge(backend),
            };
        }
    }
    Ok(ctx)
}
