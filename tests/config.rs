use std::io::Write;

use poker_table::config::{ConfigError, ConfigOverrides, TableConfig, CONFIG_ENV};
use poker_table::game::Table;
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn file_values_then_overrides() {
    let file = write_config("players = 6\nsmall_blind = 25\nbig_blind = 50\nseed = 4\n");
    let cfg = TableConfig::load(Some(file.path())).unwrap();
    assert_eq!((cfg.players, cfg.small_blind, cfg.big_blind), (6, 25, 50));
    assert_eq!(cfg.starting_stack, 1000);

    let o = ConfigOverrides { players: Some(3), humans: Some(0), ..Default::default() };
    let cfg = cfg.with_overrides(&o);
    assert_eq!((cfg.players, cfg.humans, cfg.seed), (3, 0, Some(4)));
    cfg.validate().unwrap();

    let table = Table::from_config(&cfg);
    assert_eq!((table.small_blind(), table.big_blind()), (25, 50));
}

#[test]
fn missing_and_malformed_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(matches!(TableConfig::load(Some(missing.as_path())), Err(ConfigError::Io { .. })));

    let bad = write_config("players = \"six\"\n");
    assert!(matches!(TableConfig::load(Some(bad.path())), Err(ConfigError::Parse(_))));
}

#[test]
fn invalid_values_are_reported() {
    let file = write_config("small_blind = 40\nbig_blind = 20\n");
    let cfg = TableConfig::load(Some(file.path())).unwrap();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("small_blind"), "{err}");
}

#[test]
fn environment_variable_names_the_file() {
    let file = write_config("players = 8\n");
    // Only this test touches the variable.
    std::env::set_var(CONFIG_ENV, file.path());
    let from_env = TableConfig::load(None).unwrap();
    let explicit = write_config("players = 2\n");
    let from_path = TableConfig::load(Some(explicit.path())).unwrap();
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(from_env.players, 8);
    assert_eq!(from_path.players, 2, "an explicit path wins over the environment");
    assert_eq!(TableConfig::load(None).unwrap(), TableConfig::default());
}
