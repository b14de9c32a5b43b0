//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Default data directory when `--db` is not given
pub const DEFAULT_DB_PATH: &str = ".kiosklog";

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("kiosklog")
        .about("Append-only kiosk activity log; reads one JSON command per stdin line")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(false)
        .arg(
            Arg::new("db")
                .long("db")
                .help("Database path (default: .kiosklog)")
                .global(true),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .help("Ephemeral in-memory database, no disk")
                .action(ArgAction::SetTrue)
                .conflicts_with("db"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .help("User name the commands run as (default: local)"),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Role the commands run as: admin, user, vendor or business (default: admin)"),
        )
        .arg(
            Arg::new("read-only")
                .long("read-only")
                .help("Open database in read-only mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("durability")
                .long("durability")
                .help("Override durability: standard or always")
                .value_parser(["standard", "always"])
                .conflicts_with("cache"),
        )
        .arg(
            Arg::new("append-strategy")
                .long("append-strategy")
                .help("Override append strategy: optimistic or serialized")
                .value_parser(["optimistic", "serialized"]),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter when RUST_LOG is unset (default: warn)")
                .default_value("warn")
                .global(true),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty-print JSON output")
                .action(ArgAction::SetTrue),
        )
        .subcommand(build_init())
}

fn build_init() -> Command {
    Command::new("init").about("Create the data directory and write the default kiosklog.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_cache_conflicts_with_db() {
        let result = build_cli().try_get_matches_from(["kiosklog", "--cache", "--db", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_durability_conflicts_with_cache() {
        let result =
            build_cli().try_get_matches_from(["kiosklog", "--cache", "--durability", "always"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_durability_values_are_checked() {
        assert!(build_cli()
            .try_get_matches_from(["kiosklog", "--durability", "sometimes"])
            .is_err());
        let m = build_cli()
            .try_get_matches_from(["kiosklog", "--durability", "always"])
            .unwrap();
        assert_eq!(m.get_one::<String>("durability").unwrap(), "always");
    }

    #[test]
    fn test_init_accepts_db_after_subcommand() {
        let m = build_cli()
            .try_get_matches_from(["kiosklog", "init", "--db", "/tmp/k"])
            .unwrap();
        assert_eq!(m.subcommand_name(), Some("init"));
        assert_eq!(m.get_one::<String>("db").unwrap(), "/tmp/k");
    }
}
