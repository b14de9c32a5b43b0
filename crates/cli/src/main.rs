//! kiosklog CLI: JSON-lines front end for the activity log.
//!
//! - **Pipe mode**: `kiosklog [flags] < commands.jsonl` reads one JSON `Command`
//!   per stdin line, one JSON result per stdout line
//! - **init**: `kiosklog init --db PATH` writes the default config and exits

mod commands;
mod format;
mod pipe;

use std::io;
use std::path::Path;
use std::process;

use kiosklog_executor::{
    AccessMode, Identity, KioskLog, KioskLogConfig, OpenOptions, Role, StaticIdentity,
    LOCAL_USER,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{build_cli, DEFAULT_DB_PATH};
use format::OutputMode;

fn main() {
    let matches = build_cli().get_matches();

    let log_level = matches
        .get_one::<String>("log-level")
        .map(|s| s.as_str())
        .unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let db_path = matches
        .get_one::<String>("db")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_DB_PATH);

    // Handle `init` before opening any database.
    if matches.subcommand_name() == Some("init") {
        match run_init(Path::new(db_path)) {
            Ok(()) => process::exit(0),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    let output_mode = if matches.get_flag("pretty") {
        OutputMode::Pretty
    } else {
        OutputMode::Compact
    };

    let log = match open_log(&matches, db_path) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let exit_code = pipe::run_pipe(
        log.executor(),
        stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
        output_mode,
    );
    process::exit(exit_code);
}

fn run_init(path: &Path) -> Result<(), String> {
    std::fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let config_path = path.join(kiosklog_executor::CONFIG_FILE_NAME);
    KioskLogConfig::write_default_if_missing(&config_path)
        .map_err(|e| format!("Failed to write config: {}", e))?;
    info!(target: "kiosklog::cli", path = %config_path.display(), "Config ready");
    println!("{}", config_path.display());
    Ok(())
}

fn open_log(matches: &clap::ArgMatches, db_path: &str) -> Result<KioskLog, String> {
    let identity = caller_identity(matches)?;

    let mut opts = OpenOptions::new();
    if matches.get_flag("read-only") {
        opts = opts.access_mode(AccessMode::ReadOnly);
    }
    if let Some(mode) = matches.get_one::<String>("durability") {
        opts = opts.durability(mode);
    }
    if let Some(strategy) = matches.get_one::<String>("append-strategy") {
        opts = opts.append_strategy(strategy);
    }

    let log = if matches.get_flag("cache") {
        KioskLog::cache_with(opts).map_err(|e| format!("Failed to open cache database: {}", e))?
    } else {
        KioskLog::open_with(db_path, opts).map_err(|e| format!("Failed to open database: {}", e))?
    };

    Ok(log.with_identity(StaticIdentity::new(identity)))
}

fn caller_identity(matches: &clap::ArgMatches) -> Result<Identity, String> {
    let username = matches
        .get_one::<String>("user")
        .map(|s| s.as_str())
        .unwrap_or(LOCAL_USER);
    let role = match matches.get_one::<String>("role") {
        Some(r) => r.parse::<Role>().map_err(|e| e.to_string())?,
        None => Role::Admin,
    };
    Ok(Identity::new(username, role))
}
