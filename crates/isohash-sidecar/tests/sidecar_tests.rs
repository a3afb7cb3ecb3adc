use isohash_digest::{Algorithm, digest_bytes};
use isohash_sidecar::{MetadataWriter, SidecarRecord, TomlSidecarWriter};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_then_read_back() {
    let temp = TempDir::new().unwrap();
    let sidecar = temp.path().join("a.iso.toml");
    let report = digest_bytes(&Algorithm::ALL, &[0x41; 10]);

    TomlSidecarWriter::new()
        .write(&sidecar, "a.iso", 10, &report)
        .unwrap();

    let record = SidecarRecord::read(&sidecar).unwrap();
    assert_eq!(record.filename, "a.iso");
    assert_eq!(record.size, 10);
    let keys: Vec<&str> = record.hashes.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "sha256",
            "sha512",
            "whirlpool",
            "ripemd160",
            "kangaroo12",
            "sha3_256",
            "blake2b",
            "blake3"
        ]
    );
    assert_eq!(
        record.hashes["sha256"],
        report.get(Algorithm::Sha256).unwrap().to_hex()
    );
    assert!(
        record
            .hashes
            .values()
            .all(|h| h.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)))
    );
}

#[test]
fn test_empty_file_record() {
    let temp = TempDir::new().unwrap();
    let sidecar = temp.path().join("b.iso.toml");
    let report = digest_bytes(&Algorithm::ALL, &[]);

    TomlSidecarWriter::new()
        .write(&sidecar, "b.iso", 0, &report)
        .unwrap();

    let record = SidecarRecord::read(&sidecar).unwrap();
    assert_eq!(record.size, 0);
    assert_eq!(
        record.hashes["sha256"],
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_overwrites_existing_sidecar() {
    let temp = TempDir::new().unwrap();
    let sidecar = temp.path().join("a.iso.toml");
    fs::write(&sidecar, "stale").unwrap();

    let report = digest_bytes(&[Algorithm::Blake3], b"fresh");
    TomlSidecarWriter::new()
        .write(&sidecar, "a.iso", 5, &report)
        .unwrap();

    let record = SidecarRecord::read(&sidecar).unwrap();
    assert_eq!(record.size, 5);
    assert_eq!(record.hashes.len(), 1);
}

#[test]
fn test_missing_directory_fails_without_leftovers() {
    let temp = TempDir::new().unwrap();
    let sidecar = temp.path().join("gone/a.iso.toml");
    let report = digest_bytes(&[Algorithm::Sha256], b"x");

    let err = TomlSidecarWriter::new()
        .write(&sidecar, "a.iso", 1, &report)
        .unwrap_err();

    assert!(err.is_write_error());
    assert_eq!(err.path(), sidecar.as_path());
    assert!(!sidecar.exists());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_sidecar_mode_matches_plain_file() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let plain = temp.path().join("plain.txt");
    fs::write(&plain, "x").unwrap();

    let sidecar = temp.path().join("a.iso.toml");
    let report = digest_bytes(&[Algorithm::Sha256], b"x");
    TomlSidecarWriter::new()
        .write(&sidecar, "a.iso", 1, &report)
        .unwrap();

    let mode = |p: &std::path::Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&sidecar), mode(&plain));
}
