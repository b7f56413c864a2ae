use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn up_accepts_optional_name_and_force() {
    let cli = Cli::try_parse_from(["mallard", "up", "0001_init", "--force"]).unwrap();
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.name.as_deref(), Some("0001_init"));
            assert!(args.force);
        }
        other => panic!("expected up, got {other:?}"),
    }
}

#[test]
fn rollback_accepts_optional_batch() {
    let cli = Cli::try_parse_from(["mallard", "rollback", "3"]).unwrap();
    match cli.command {
        Commands::Rollback(args) => assert_eq!(args.batch, Some(3)),
        other => panic!("expected rollback, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["mallard", "rollback"]).unwrap();
    match cli.command {
        Commands::Rollback(args) => assert_eq!(args.batch, None),
        other => panic!("expected rollback, got {other:?}"),
    }
}

#[test]
fn global_database_override_is_global() {
    let cli = Cli::try_parse_from(["mallard", "status", "--database", ":memory:"]).unwrap();
    assert_eq!(cli.global.database.as_deref(), Some(":memory:"));
}
