use dirinfo::config::RunConfig;
use dirinfo::inventory::Inventory;
use dirinfo::output::{read_records, JsonOutput, OutputFormat};
use dirinfo::scanner::{CollectorConfig, HashAlgorithm, HashOptions};
use std::fs;
use std::io::{BufReader, Cursor};
use tempfile::tempdir;

fn create_inventory(dir: &std::path::Path) -> Vec<dirinfo::scanner::FileRecord> {
    fs::write(dir.join("a.txt"), b"hello").unwrap();
    fs::write(dir.join("b.txt"), b"hello").unwrap();
    fs::write(dir.join("c.txt"), b"world").unwrap();

    let mut config = RunConfig::for_root(dir, "export-host");
    config.collector = CollectorConfig::new("export-host")
        .with_hash_options(HashOptions::only(HashAlgorithm::Sha256))
        .with_note(Some("export test".to_string()));
    config.detect_duplicates = true;
    Inventory::new(&config).run().unwrap().records
}

#[test]
fn test_array_round_trip() {
    let dir = tempdir().unwrap();
    let records = create_inventory(dir.path());

    let json = JsonOutput::new(&records, OutputFormat::Array)
        .to_json()
        .unwrap();
    let parsed = read_records(Cursor::new(json), OutputFormat::Array).unwrap();

    assert_eq!(parsed, records);
}

#[test]
fn test_lines_round_trip() {
    let dir = tempdir().unwrap();
    let records = create_inventory(dir.path());

    let json = JsonOutput::new(&records, OutputFormat::Lines)
        .to_json()
        .unwrap();

    assert_eq!(json.lines().count(), records.len());
    let parsed = read_records(Cursor::new(json), OutputFormat::Lines).unwrap();
    assert_eq!(parsed, records);
}

#[test]
fn test_json_shape() {
    let dir = tempdir().unwrap();
    let records = create_inventory(dir.path());

    let json = JsonOutput::new(&records, OutputFormat::Array)
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];

    for key in [
        "path",
        "directory",
        "name",
        "size",
        "permissions",
        "hostMachine",
        "extension",
        "modifiedAt",
        "digests",
        "note",
        "duplicatesOf",
    ] {
        assert!(first.get(key).is_some(), "missing key {key}");
    }
    assert!(first.get("systemInfo").is_none());
    assert!(first["digests"].get("md5").is_none());
    assert_eq!(first["hostMachine"], "export-host");
    assert_eq!(first["note"], "export test");

    let unique = &value[2];
    assert!(unique.get("duplicatesOf").is_none());
}

#[test]
fn test_write_file_and_read_back() {
    let dir = tempdir().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    let records = create_inventory(&tree);
    let base = dir.path().join("export-host-results");

    let path = JsonOutput::new(&records, OutputFormat::Lines)
        .write_file(&base.to_string_lossy())
        .unwrap();

    assert_eq!(path.extension().unwrap(), "json");
    let file = fs::File::open(&path).unwrap();
    let parsed = read_records(BufReader::new(file), OutputFormat::Lines).unwrap();
    assert_eq!(parsed.len(), 3);
}

#[test]
fn test_write_file_overwrites() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("out");
    fs::write(dir.path().join("out.json"), "stale content that is much longer").unwrap();

    JsonOutput::new(&[], OutputFormat::Array)
        .write_file(&base.to_string_lossy())
        .unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("out.json")).unwrap(), "[]\n");
}
