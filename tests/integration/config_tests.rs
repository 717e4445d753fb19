use clap::Parser;
use dirinfo::cli::Cli;
use dirinfo::config::{Config, RunConfig};
use dirinfo::output::OutputFormat;
use dirinfo::scanner::{HashAlgorithm, HashOptions};
use figment::providers::Serialized;
use std::fs;
use std::sync::Mutex;
use tempfile::tempdir;

// Environment variables are process-wide; serialize the tests that set them.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_config_load_defaults() {
    let figment = figment::Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.default_algorithm, HashAlgorithm::Sha1);
}

#[test]
fn test_config_load_from_toml() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let toml_content = r#"
sha256 = true
md5 = true
duplicates = true
no_array = true
default_algorithm = "sha256"
machine_name = "nas-01"
note = "quarterly audit"
output = "nas-inventory"
"#;
    fs::write(&config_path, toml_content).unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert!(config.sha256);
    assert!(config.md5);
    assert!(!config.sha1);
    assert!(config.duplicates);
    assert!(config.no_array);
    assert_eq!(config.default_algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.machine_name.as_deref(), Some("nas-01"));
    assert_eq!(config.note.as_deref(), Some("quarterly audit"));
    assert_eq!(config.output.as_deref(), Some("nas-inventory"));
}

#[test]
fn test_config_load_from_env() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::set_var("DIRINFO_SHA256", "true");
    std::env::set_var("DIRINFO_MACHINE_NAME", "env-box");

    let result: Result<Config, _> = Config::figment(None).extract();

    std::env::remove_var("DIRINFO_SHA256");
    std::env::remove_var("DIRINFO_MACHINE_NAME");

    let config = result.unwrap();
    assert!(config.sha256);
    assert_eq!(config.machine_name.as_deref(), Some("env-box"));
}

#[test]
fn test_env_overrides_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "machine_name = \"file-box\"\nduplicates = true\n").unwrap();
    std::env::set_var("DIRINFO_MACHINE_NAME", "env-box");

    let result = Config::load_from(&config_path);

    std::env::remove_var("DIRINFO_MACHINE_NAME");

    let config = result.unwrap();
    assert_eq!(config.machine_name.as_deref(), Some("env-box"));
    assert!(config.duplicates);
}

#[test]
fn test_config_invalid_value() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "default_algorithm = \"crc32\"\n").unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn test_config_invalid_toml() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "sha256 = = true").unwrap();

    assert!(Config::load(Some(&config_path)).is_err());
}

#[test]
fn test_cli_flags_layer_over_file() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "md5 = true\nmachine_name = \"file-box\"\npretty = true\n",
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();
    let cli = Cli::try_parse_from([
        "dirinfo",
        "-p",
        "/srv",
        "--sha256",
        "--machine-name",
        "cli-box",
        "-d",
    ])
    .unwrap();
    let run = RunConfig::resolve(&cli, &config).unwrap();

    assert_eq!(
        run.collector.hash_options,
        HashOptions::only(HashAlgorithm::Md5).with(HashAlgorithm::Sha256)
    );
    assert_eq!(run.collector.host_machine, "cli-box");
    assert!(run.detect_duplicates);
    assert!(run.pretty);
    assert_eq!(run.format, OutputFormat::Array);
    assert_eq!(run.output_base, "cli-box-results");
}
