use dirinfo::scanner::{Collector, CollectorConfig, HashAlgorithm, HashOptions};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

fn all_digests() -> HashOptions {
    HashOptions::only(HashAlgorithm::Md5)
        .with(HashAlgorithm::Sha1)
        .with(HashAlgorithm::Sha256)
}

#[test]
fn test_collect_empty_directory() {
    let dir = tempdir().unwrap();
    let config = CollectorConfig::new("host");

    let records = Collector::new(&config).collect(dir.path()).unwrap();

    assert!(records.is_empty());
}

#[test]
fn test_collect_nested_tree_counts_every_file() {
    let dir = tempdir().unwrap();
    let mut expected = 0;
    for depth in 0..4 {
        let mut sub = dir.path().to_path_buf();
        for level in 0..depth {
            sub.push(format!("level{level}"));
        }
        fs::create_dir_all(&sub).unwrap();
        for i in 0..3 {
            File::create(sub.join(format!("f{i}.bin")))
                .unwrap()
                .write_all(format!("{depth}-{i}").as_bytes())
                .unwrap();
            expected += 1;
        }
    }
    fs::create_dir_all(dir.path().join("empty/also_empty")).unwrap();

    let config = CollectorConfig::new("host");
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    assert_eq!(records.len(), expected);
}

#[test]
fn test_collect_empty_file_digests() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty")).unwrap();

    let config = CollectorConfig::new("host").with_hash_options(all_digests());
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].size, 0);
    assert_eq!(records[0].digest(HashAlgorithm::Sha256), Some(EMPTY_SHA256));
    assert_eq!(records[0].digest(HashAlgorithm::Md5), Some(EMPTY_MD5));
}

#[test]
fn test_collect_digests_only_for_enabled_algorithms() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    let config =
        CollectorConfig::new("host").with_hash_options(HashOptions::only(HashAlgorithm::Md5));
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    let present: Vec<_> = HashAlgorithm::ALL
        .into_iter()
        .filter(|&a| records[0].digests.get(a).is_some())
        .collect();
    assert_eq!(present, vec![HashAlgorithm::Md5]);
}

#[test]
fn test_collect_record_fields() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("docs");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("readme.md"), b"# title\n").unwrap();

    let config = CollectorConfig::new("box-7")
        .with_note(Some("nightly".to_string()))
        .with_system_info(true);
    let records = Collector::new(&config).collect(dir.path()).unwrap();
    let record = &records[0];

    assert!(record.path.is_absolute());
    assert!(record.path.ends_with("docs/readme.md"));
    assert!(record.directory.ends_with("docs"));
    assert_eq!(record.name, "readme.md");
    assert_eq!(record.extension, ".md");
    assert_eq!(record.size, 8);
    assert_eq!(record.host_machine, "box-7");
    assert_eq!(record.note.as_deref(), Some("nightly"));
    #[cfg(unix)]
    assert!(record.system_info.is_some());
}

#[test]
fn test_collect_is_idempotent() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/b.log"), b"beta").unwrap();

    let config = CollectorConfig::new("host").with_hash_options(all_digests());
    let first = Collector::new(&config).collect(dir.path()).unwrap();
    let second = Collector::new(&config).collect(dir.path()).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.size, b.size);
        assert_eq!(a.extension, b.extension);
        assert_eq!(a.digests, b.digests);
    }
}

#[test]
fn test_collect_modification_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dated.txt");
    fs::write(&path, b"x").unwrap();
    filetime::set_file_mtime(&path, filetime::FileTime::from_unix_time(1_700_000_000, 0)).unwrap();

    let config = CollectorConfig::new("host");
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    assert_eq!(records[0].modified_at.timestamp(), 1_700_000_000);
}

#[test]
fn test_collect_large_file_streams() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..(3 * 64 * 1024 + 17)).map(|i| (i % 256) as u8).collect();
    fs::write(dir.path().join("big.bin"), &content).unwrap();

    let config =
        CollectorConfig::new("host").with_hash_options(HashOptions::only(HashAlgorithm::Sha256));
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    let expected = dirinfo::scanner::Hasher::with_buffer_size(1000)
        .hash_reader(&content[..], &HashOptions::only(HashAlgorithm::Sha256))
        .unwrap();
    assert_eq!(records[0].digests, expected);
    assert_eq!(records[0].size, content.len() as u64);
}

#[cfg(unix)]
#[test]
fn test_collect_skips_symlinks_and_fifos() {
    use std::os::unix::fs::symlink;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), b"data").unwrap();
    symlink(dir.path().join("real.txt"), dir.path().join("link.txt")).unwrap();
    symlink(dir.path().join("nowhere"), dir.path().join("dangling")).unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("inner.txt"), b"inner").unwrap();
    symlink(&sub, dir.path().join("sub_link")).unwrap();

    let config =
        CollectorConfig::new("host").with_hash_options(HashOptions::only(HashAlgorithm::Sha1));
    let records = Collector::new(&config).collect(dir.path()).unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["real.txt", "inner.txt"]);
}
