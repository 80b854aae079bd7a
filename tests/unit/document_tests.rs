/*!
 * Tests for the document model, the JSON loader and the manifest
 */

use anyhow::Result;
use tikkun::errors::DocumentError;
use tikkun::text::document::{Document, GroupKind, Manifest, Tradition};

use crate::common;

/// Test loading a pipeline document from disk
#[test]
fn test_load_pipelineDocument_shouldParseAllSections() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "noach.json", common::SAMPLE_DOCUMENT_JSON)?;

    let doc = Document::load(&path)?;

    assert_eq!(doc.id, "noach");
    assert_eq!(doc.display_name(), "נח");
    assert_eq!(doc.reference, "Genesis 6:9-6:10");
    // the third group has no verses and is dropped
    assert_eq!(doc.groups.len(), 2);
    assert_eq!(doc.groups[0].verses[0].targum, "אִלֵּין תּוּלְדַת נֹחַ");
    assert_eq!(
        doc.groups[0].verses[0].versions[&Tradition::Yemenite].text_clean,
        "אלה תולדות נח"
    );
    let haftara = doc.supplementary.as_ref().expect("haftara should be loaded");
    assert_eq!(haftara.num, 8);
    assert_eq!(haftara.kind, GroupKind::Primary);
    assert!(doc.alternates.is_empty());

    Ok(())
}

/// Test that the file stem becomes the id when the payload has none
#[test]
fn test_load_withoutId_shouldUseFileStem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "vayera.json",
        r#"{"verses": [{"verse_num": 1, "text_clean": "וירא"}]}"#,
    )?;

    let doc = Document::load(&path)?;

    assert_eq!(doc.id, "vayera");
    assert_eq!(doc.name, "vayera");
    assert_eq!(doc.groups.len(), 1);

    Ok(())
}

/// Test that a missing file surfaces as an I/O error
#[test]
fn test_load_missingFile_shouldBeIoError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = Document::load(temp_dir.path().join("missing.json"));

    assert!(matches!(result, Err(DocumentError::Io(_))));
    Ok(())
}

/// Test that a group list made only of empty groups falls back to the verse list
#[test]
fn test_fromJson_allGroupsEmpty_shouldUseVerseList() {
    let json = r#"{
        "id": "x",
        "ref": "Exodus 1:1",
        "aliyot": [{"num": 1, "range": "Exodus 1:1", "verses": []}],
        "verses": [{"verse_num": 1, "text_clean": "ואלה"}]
    }"#;

    let doc = Document::from_json_str(json, "x").unwrap();

    assert_eq!(doc.groups.len(), 1);
    assert_eq!(doc.groups[0].range, "Exodus 1:1");
}

/// Test that a non-array group list is rejected
#[test]
fn test_fromJson_groupsNotAList_shouldBeMalformed() {
    let result = Document::from_json_str(r#"{"id": "x", "aliyot": {"num": 1}}"#, "x");

    match result {
        Err(DocumentError::Malformed { id, reason }) => {
            assert_eq!(id, "x");
            assert!(reason.contains("aliyot"));
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
}

/// Test that alternate sections are collected per tradition
#[test]
fn test_fromJson_alternateSections_shouldBeKeyedByTradition() {
    let json = r#"{
        "id": "lech",
        "aliyot": [{"num": 1, "range": "a", "verses": [{"verse_num": 1, "text_clean": "לך"}]}],
        "haftara_yemenite": {"num": 8, "range": "Isaiah 40:27", "verses": [{"verse_num": 1, "text_clean": "למה"}]}
    }"#;

    let doc = Document::from_json_str(json, "lech").unwrap();
    let alternate = doc.alternate(Tradition::Yemenite).expect("alternate expected");

    assert!(alternate.groups.is_empty());
    assert_eq!(
        alternate.supplementary.as_ref().map(|g| g.range.as_str()),
        Some("Isaiah 40:27")
    );
    assert!(doc.alternate(Tradition::Standard).is_none());
}

/// Test manifest navigation across book boundaries
#[test]
fn test_manifest_neighbors_shouldCrossBooks() {
    let manifest = Manifest::from_json_str(common::SAMPLE_MANIFEST_JSON).unwrap();

    let (previous, next) = manifest.neighbors("noach");
    assert_eq!(previous.map(|r| r.id.as_str()), Some("bereshit"));
    assert_eq!(next.map(|r| r.id.as_str()), Some("shemot"));

    let (previous, next) = manifest.neighbors("bereshit");
    assert!(previous.is_none());
    assert_eq!(next.map(|r| r.id.as_str()), Some("noach"));

    assert_eq!(manifest.neighbors("unknown"), (None, None));
}

/// Test case-insensitive book lookup
#[test]
fn test_manifest_findBook_shouldIgnoreCase() {
    let manifest = Manifest::from_json_str(common::SAMPLE_MANIFEST_JSON).unwrap();

    let book = manifest.find_book("exodus").expect("book should be found");
    assert_eq!(book.hebrew, "שמות");
    assert_eq!(manifest.position("shemot"), Some(2));
    assert_eq!(manifest.readings().count(), 3);
}
