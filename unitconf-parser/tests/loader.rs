//! Directory loading tests
//!
//! Each test builds its own directory of documents in a temp dir and loads it
//! end to end: discovery, parsing, transform and indexing by file stem.

use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use unitconf_parser::{load, ConfigError, ConfigLoader, Mode, ParseCause, Quantity, Value};

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (relative, contents) in files {
        write(dir.path(), relative, contents);
    }
    dir
}

const ALPHA: &str = "[section]\na = \"1.5m\"\n";

const INSTRUMENT: &str = r#"
name = "spectrograph"
serial = 1234567890
gain = 2.5
[detector]
pixel = "13.5µm"
dark = "0.024Kelvin/hour"
pointing = "10e-3arcsecond"
channels = ["400nm", "700nm"]
"#;

#[test]
fn test_parsed_single_document() {
    let dir = workspace(&[("alpha.toml", ALPHA)]);
    let docs = load(dir.path(), "parsed", false).unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(
        docs["alpha"].get_path("section.a"),
        Some(&Value::Quantity(Quantity::new(1.5, "m")))
    );
}

#[test]
fn test_raw_keeps_scalars() {
    let dir = workspace(&[("instrument.toml", INSTRUMENT)]);
    let docs = load(dir.path(), "raw", false).unwrap();
    let doc = &docs["instrument"];

    assert_eq!(doc.get("name"), Some(&Value::from("spectrograph")));
    assert_eq!(doc.get("serial"), Some(&Value::Integer(1234567890)));
    assert_eq!(doc.get("gain"), Some(&Value::Float(2.5)));
    assert_eq!(doc.get_path("detector.pixel"), Some(&Value::from("13.5µm")));
}

#[rstest]
#[case("unitless", "detector.dark", Value::Float(0.024))]
#[case("unitless", "detector.pointing", Value::Float(0.01))]
#[case("unitless", "detector.channels.1", Value::Float(700.0))]
#[case("parsed", "detector.dark", Value::Quantity(Quantity::new(0.024, "Kelvin/hour")))]
#[case("parsed", "detector.pointing", Value::Quantity(Quantity::new(0.01, "arcsecond")))]
#[case("parsed", "detector.pixel", Value::Quantity(Quantity::new(13.5, "µm")))]
#[case("PARSED", "name", Value::from("spectrograph"))]
#[case("Unitless", "serial", Value::Integer(1234567890))]
fn test_modes(#[case] mode: &str, #[case] path: &str, #[case] expected: Value) {
    let dir = workspace(&[("instrument.toml", INSTRUMENT)]);
    let docs = load(dir.path(), mode, false).unwrap();
    assert_eq!(docs["instrument"].get_path(path), Some(&expected));
}

#[rstest]
fn test_invalid_mode(#[values("bogus", "Raw2", "")] mode: &str) {
    let dir = workspace(&[("alpha.toml", ALPHA)]);
    let err = load(dir.path(), mode, false).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMode(m) if m == mode));
}

#[test]
fn test_empty_directory_is_not_found() {
    let dir = workspace(&[("notes.txt", "not toml")]);
    let err = load(dir.path(), "raw", true).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn test_non_recursive_ignores_subdirectories() {
    let dir = workspace(&[("top.toml", ALPHA), ("nested/inner.toml", ALPHA)]);

    let shallow = load(dir.path(), "raw", false).unwrap();
    assert_eq!(shallow.keys().collect::<Vec<_>>(), vec!["top"]);

    let deep = load(dir.path(), "raw", true).unwrap();
    assert_eq!(deep.keys().collect::<Vec<_>>(), vec!["inner", "top"]);
}

#[test]
fn test_only_subdirectory_documents_without_recursion() {
    let dir = workspace(&[("nested/inner.toml", ALPHA)]);
    let err = load(dir.path(), "raw", false).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn test_parse_failure_aborts_whole_load() {
    let dir = workspace(&[("alpha.toml", ALPHA), ("broken.toml", "[section\nkey = 1\n")]);
    let err = load(dir.path(), "parsed", false).unwrap_err();

    match err {
        ConfigError::ParseFailure { path, .. } => {
            assert_eq!(path.file_name().unwrap(), "broken.toml");
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn test_duplicate_names_are_rejected() {
    let dir = workspace(&[("a.toml", ALPHA), ("nested/a.toml", ALPHA)]);

    // Only one "a" is visible without recursion
    assert!(load(dir.path(), "raw", false).is_ok());

    let err = load(dir.path(), "raw", true).unwrap_err();
    match err {
        ConfigError::DuplicateName { name, first, second } => {
            assert_eq!(name, "a");
            assert!(first < second);
        }
        other => panic!("expected duplicate name, got {other:?}"),
    }
}

#[test]
fn test_custom_extension() {
    let dir = workspace(&[("alpha.conf", ALPHA), ("beta.toml", ALPHA)]);
    let docs = ConfigLoader::with_mode(dir.path(), Mode::Unitless, false)
        .with_extension("conf")
        .load()
        .unwrap();

    assert_eq!(docs.keys().collect::<Vec<_>>(), vec!["alpha"]);
    assert_eq!(docs["alpha"].get_path("section.a"), Some(&Value::Float(1.5)));
}

#[test]
fn test_discover_is_sorted() {
    let dir = workspace(&[("c.toml", ALPHA), ("a.toml", ALPHA), ("b.toml", ALPHA)]);
    let loader = ConfigLoader::new(dir.path(), "raw", false).unwrap();
    let names: Vec<_> = loader
        .discover()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.toml", "b.toml", "c.toml"]);
}

#[test]
fn test_load_is_repeatable() {
    let dir = workspace(&[("instrument.toml", INSTRUMENT)]);
    let loader = ConfigLoader::new(dir.path(), "parsed", false).unwrap();
    assert_eq!(loader.load().unwrap(), loader.load().unwrap());
}

#[test]
fn test_invalid_utf8_is_a_parse_failure() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), b"key = \"\xff\xfe\"\n").unwrap();

    let err = load(dir.path(), "raw", false).unwrap_err();
    match err {
        ConfigError::ParseFailure { path, source } => {
            assert_eq!(path.file_name().unwrap(), "bad.toml");
            assert!(matches!(source, ParseCause::Utf8(_)));
        }
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn test_empty_extension_does_not_match_trailing_dot() {
    let dir = workspace(&[("foo.", ALPHA), ("alpha.toml", ALPHA)]);
    let err = ConfigLoader::with_mode(dir.path(), Mode::Raw, false)
        .with_extension("")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidExtension));
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = workspace(&[("alpha.toml", ALPHA)]);
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let result = load(dir.path(), "raw", true);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let docs = result.unwrap();
    assert_eq!(docs.keys().collect::<Vec<_>>(), vec!["alpha"]);
}
