//! tag-crucible CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Explore the working directory (default command)
//! tag-crucible
//! tag-crucible browse ~/projects --depth 3
//!
//! # Print a listing with tags
//! tag-crucible scan ~/projects --json
//!
//! # Tag and untag from the shell
//! tag-crucible tag archive ~/projects/old-site ~/projects/old-blog
//! tag-crucible untag archive ~/projects/old-blog
//! tag-crucible tags ~/projects/old-site/index.html
//!
//! # Preview how the header shortens a path
//! tag-crucible shorten /home/user/projects/tag-crucible --max 20
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/tag-crucible/config.toml` on Linux) and created on first run.

use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tag_crucible::{
    CrucibleError,
    cli::{Cli, Commands},
    commands,
    config::CrucibleConfig,
    db::Database,
    logging::{self, LogTarget},
    picker::PromptPicker,
    scan::FsScanner,
    ui::ExploreOptions,
};

type Result<T> = std::result::Result<T, CrucibleError>;

fn run(cli: &Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => CrucibleConfig::config_path()?,
    };
    let config = CrucibleConfig::load_from(&config_path)?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    let log_target = match (&command, &config.log_file) {
        (Commands::Browse { .. }, Some(path)) => LogTarget::File(path),
        (Commands::Browse { .. }, None) => LogTarget::Off,
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, log_target)?;

    if let Commands::Shorten { path, max } = &command {
        commands::shorten(path, max.unwrap_or(config.display.max_path_length));
        return Ok(());
    }
    if let Commands::Config { command } = &command {
        return commands::config(&config, &config_path, *command);
    }

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    let db = Database::open(&db_path)?;

    match command {
        Commands::Browse { path, depth, pick } => {
            let options = ExploreOptions {
                start: commands::browse::start_directory(path),
                depth: depth.unwrap_or(config.scan.default_depth),
                max_path_length: config.display.max_path_length,
            };
            let scanner = Arc::new(FsScanner::new().with_tags(Arc::new(db.clone())));
            commands::browse(scanner, &db, &PromptPicker, options, pick, quiet)
        }
        Commands::Scan { path, depth, json } => {
            let scanner = FsScanner::new().with_tags(Arc::new(db.clone()));
            let depth = depth.unwrap_or(config.scan.default_depth);
            commands::scan(&scanner, path.as_deref(), depth, json, quiet)
        }
        Commands::Tag { tag, paths } => commands::tag(&db, &tag, &paths, quiet),
        Commands::Untag { tag, paths } => commands::untag(&db, &tag, &paths, quiet),
        Commands::Tags { path } => commands::tags(&db, path.as_deref(), quiet),
        Commands::Shorten { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Main entry point for the tag-crucible application
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
