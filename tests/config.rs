use std::fs;
use std::path::PathBuf;

use tasklog::{Config, Error};

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_or_default(&dir.path().join("tasklog.toml"));

    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.file_name, "tasks.json");
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("tasklog.toml");
    fs::write(
        &config_path,
        r#"
data_dir = "/srv/tasks"
file_name = "team.json"
"#,
    )?;

    let config = Config::load(&config_path)?;
    assert_eq!(config.data_dir, PathBuf::from("/srv/tasks"));
    assert_eq!(config.file_name, "team.json");
    Ok(())
}

#[test]
fn partial_toml_keeps_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("tasklog.toml");
    fs::write(&config_path, "file_name = \"mine.json\"\n")?;

    let config = Config::load(&config_path)?;
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.file_name, "mine.json");
    Ok(())
}

#[test]
fn invalid_config_is_rejected_by_load_and_ignored_by_default_loader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("tasklog.toml");
    fs::write(&config_path, "file_name = \"a/b.json\"\n").expect("write");

    assert!(matches!(
        Config::load(&config_path),
        Err(Error::InvalidConfig(_))
    ));
    assert_eq!(Config::load_or_default(&config_path), Config::default());

    fs::write(&config_path, "file_name = [").expect("write");
    assert!(matches!(Config::load(&config_path), Err(Error::TomlParse(_))));
}

#[test]
fn config_save_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("tasklog.toml");
    let config = Config::default()
        .with_data_dir(dir.path().join("store"))
        .with_file_name("saved.json");

    config.save(&config_path)?;
    assert_eq!(Config::load(&config_path)?, config);
    Ok(())
}
