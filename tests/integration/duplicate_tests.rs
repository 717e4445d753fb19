use dirinfo::config::RunConfig;
use dirinfo::duplicates::{annotate_duplicates, group_by_digest};
use dirinfo::inventory::Inventory;
use dirinfo::scanner::{Collector, CollectorConfig, HashAlgorithm, HashOptions};
use std::fs;
use tempfile::tempdir;

fn run_config(root: &std::path::Path, options: HashOptions) -> RunConfig {
    let mut config = RunConfig::for_root(root, "host");
    config.collector = CollectorConfig::new("host").with_hash_options(options);
    config.detect_duplicates = true;
    config
}

#[test]
fn test_hello_world_end_to_end() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello").unwrap();
    fs::write(dir.path().join("c.txt"), b"world").unwrap();

    let config = run_config(dir.path(), HashOptions::only(HashAlgorithm::Sha256));
    let report = Inventory::new(&config).run().unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.summary.duplicate_groups, 1);

    let by_name = |name: &str| report.records.iter().find(|r| r.name == name).unwrap();
    let a = by_name("a.txt");
    let b = by_name("b.txt");
    let c = by_name("c.txt");

    assert_eq!(a.duplicates_of, vec![b.path.clone()]);
    assert_eq!(b.duplicates_of, vec![a.path.clone()]);
    assert!(c.duplicates_of.is_empty());
    assert_eq!(
        a.digest(HashAlgorithm::Sha256),
        Some("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
    );
}

#[test]
fn test_duplicates_across_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("x/y")).unwrap();
    fs::create_dir_all(dir.path().join("z")).unwrap();
    fs::write(dir.path().join("top.dat"), b"same bytes").unwrap();
    fs::write(dir.path().join("x/y/deep.dat"), b"same bytes").unwrap();
    fs::write(dir.path().join("z/other.dat"), b"same bytes").unwrap();

    let config = run_config(dir.path(), HashOptions::only(HashAlgorithm::Md5));
    let report = Inventory::new(&config).run().unwrap();

    assert_eq!(report.summary.duplicate_groups, 1);
    assert_eq!(report.summary.duplicate_files, 3);
    for record in &report.records {
        assert_eq!(record.duplicates_of.len(), 2);
        assert!(!record.duplicates_of.contains(&record.path));
    }
}

#[test]
fn test_empty_files_group_together() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("e1"), b"").unwrap();
    fs::write(dir.path().join("e2"), b"").unwrap();

    let config = run_config(dir.path(), HashOptions::only(HashAlgorithm::Sha1));
    let report = Inventory::new(&config).run().unwrap();

    assert_eq!(report.summary.duplicate_groups, 1);
    assert_eq!(report.summary.reclaimable_space, 0);
}

#[test]
fn test_key_prefers_sha256() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();
    fs::write(dir.path().join("b"), b"1").unwrap();

    let options = HashOptions::only(HashAlgorithm::Md5).with(HashAlgorithm::Sha256);
    let config = run_config(dir.path(), options);
    let report = Inventory::new(&config).run().unwrap();

    assert_eq!(report.summary.key_algorithm, Some(HashAlgorithm::Sha256));
    let groups = report.groups.unwrap();
    let group = groups.iter().next().unwrap();
    assert_eq!(group.digest.len(), 64);
}

#[test]
fn test_all_unique_no_annotations() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("f{i}")), format!("content {i}")).unwrap();
    }

    let config = run_config(dir.path(), HashOptions::only(HashAlgorithm::Sha256));
    let report = Inventory::new(&config).run().unwrap();

    assert_eq!(report.summary.duplicate_groups, 0);
    assert!(report.records.iter().all(|r| r.duplicates_of.is_empty()));
}

#[test]
fn test_annotation_leaves_collected_set_intact() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"dup").unwrap();
    fs::write(dir.path().join("b"), b"dup").unwrap();

    let config =
        CollectorConfig::new("host").with_hash_options(HashOptions::only(HashAlgorithm::Sha1));
    let collected = Collector::new(&config).collect(dir.path()).unwrap();
    let snapshot = collected.clone();

    let (groups, _) = group_by_digest(&collected, HashAlgorithm::Sha1);
    let annotated = annotate_duplicates(collected.clone(), &groups);

    assert_eq!(collected, snapshot);
    assert!(annotated.iter().all(|r| !r.duplicates_of.is_empty()));
    assert!(collected.iter().all(|r| r.duplicates_of.is_empty()));
}
