use std::io::Write;

use tahlil_text::analyzers::DEFAULT_ARABIC_STOP_WORDS;
use tahlil_text::{normalize, StopWordError, StopWordSet};

#[test]
fn test_custom_file_is_merged_with_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "يعني").unwrap();
    writeln!(file, "# local slang").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "والله").unwrap();
    writeln!(file, "من").unwrap();

    let stop_words = StopWordSet::arabic_with_file(file.path()).unwrap();

    assert!(stop_words.contains("يعني"));
    assert!(stop_words.contains("والله"));
    assert!(stop_words.contains("من"));
    assert!(!stop_words.contains("# local slang"));
    assert_eq!(stop_words.len(), StopWordSet::arabic().len() + 2);
    assert!(stop_words.len() <= DEFAULT_ARABIC_STOP_WORDS.len() + 2);
}

#[test]
fn test_custom_words_are_removed_by_normalize() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "والله").unwrap();

    let stop_words = StopWordSet::arabic_with_file(file.path()).unwrap();
    let tokens = normalize("والله المباراة رهيبة", &stop_words);

    assert_eq!(tokens, vec!["المباراة", "رهيبة"]);
}

#[test]
fn test_missing_file_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop_words.txt");

    match StopWordSet::arabic_with_file(&path) {
        Err(StopWordError::MissingResource { path: missing }) => assert_eq!(missing, path),
        other => panic!("expected MissingResource, got {other:?}"),
    }
}
