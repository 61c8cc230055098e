//! Loading locale documents from a directory.

use std::fs;

use camino::Utf8PathBuf;
use numfmt_common::{
    DataError, DataSource, DirectorySource, FormatStyle, NumberFormats, SystemRole,
};
use tempfile::TempDir;

const BRITISH: &str = r##"{
    "locale": "en-GB",
    "minimum_grouping_digits": 2,
    "number_systems": { "default": "latn" },
    "formats": {
        "latn": {
            "standard": "#,##0.##",
            "decimal_short": [
                { "threshold": "1000", "patterns": { "other": "0K" } },
                { "threshold": "10000", "patterns": { "other": "00K" } }
            ]
        }
    }
}"##;

fn data_dir(documents: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create temporary directory");
    for (name, raw) in documents {
        fs::write(dir.path().join(name), raw).expect("write locale document");
    }
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temporary path is not UTF-8: {}", path.display()));
    (dir, root)
}

#[test]
fn lists_json_documents_only() {
    let (_dir, root) = data_dir(&[("en-GB.json", BRITISH), ("notes.txt", "ignored")]);
    let source = DirectorySource::new(root.clone());

    assert_eq!(source.root(), root.as_path());
    assert_eq!(source.locales().expect("listing succeeds"), vec!["en-GB"]);
}

#[test]
fn builds_formats_from_a_directory() {
    let (_dir, root) = data_dir(&[("en-GB.json", BRITISH)]);
    let formats =
        NumberFormats::from_source(&DirectorySource::new(root)).expect("directory data builds");

    assert_eq!(formats.minimum_grouping_digits_for("en_GB"), Ok(2));
    let set = formats.formats_for_or_panic("en-GB", SystemRole::Default);
    assert_eq!(set.pattern(FormatStyle::Standard), Some("#,##0.##"));
    assert!(formats.validate_locale("fr").is_err());
}

#[test]
fn empty_directories_are_rejected() {
    let (_dir, root) = data_dir(&[]);
    let error = NumberFormats::from_source(&DirectorySource::new(root)).expect_err("no data");
    assert!(matches!(error, DataError::NoLocales));
}

#[test]
fn malformed_documents_name_their_locale() {
    let (_dir, root) = data_dir(&[("fr.json", "{ not json")]);
    let error = NumberFormats::from_source(&DirectorySource::new(root)).expect_err("bad json");

    match error {
        DataError::Parse { locale, .. } => assert_eq!(locale, "fr"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_documents_report_their_path() {
    let (_dir, root) = data_dir(&[]);
    let source = DirectorySource::new(root.clone());

    match source.load("de") {
        Err(DataError::Read { path, .. }) => assert_eq!(path, root.join("de.json")),
        other => panic!("unexpected result: {other:?}"),
    }
}
