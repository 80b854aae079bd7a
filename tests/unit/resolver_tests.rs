/*!
 * Tests for tradition resolution
 */

use tikkun::text::document::{Document, GroupKind, Tradition, Verse, VerseGroup};
use tikkun::text::resolver::VersionResolver;

use crate::common;

/// Test that the default tradition reads the default groups and supplementary reading
#[test]
fn test_resolve_standard_shouldUseDefaultGroups() {
    let doc = common::sample_document();

    let reading = VersionResolver::resolve(&doc, Tradition::Standard);

    assert_eq!(reading.primary_groups, doc.groups);
    assert_eq!(reading.group_count(), 4);
    assert_eq!(reading.reference, "Genesis 1:1-1:6");
    assert_eq!(reading.group(3).map(|g| g.kind), Some(GroupKind::Supplementary));
}

/// Test that an alternate group list replaces the primary groups only
#[test]
fn test_resolve_yemenite_shouldUseAlternateGroupsAndDefaultSupplementary() {
    let doc = common::sample_document();

    let reading = VersionResolver::resolve(&doc, Tradition::Yemenite);

    assert_eq!(reading.primary_groups.len(), 2);
    assert_eq!(reading.primary_groups[1].range, "Genesis 1:4-1:6");
    assert_eq!(
        reading.supplementary.as_ref().map(|g| g.range.as_str()),
        Some("Isaiah 42:5-42:6")
    );
    assert_eq!(reading.groups().count(), 3);
}

/// Test that every tradition resolves to the defaults when a document has no alternates
#[test]
fn test_resolve_noAlternates_shouldEqualDefaultsForAllTraditions() {
    let doc = Document::new(
        "plain",
        "Plain",
        vec![VerseGroup::new(1, "1:1", vec![Verse::new(1, "a", "a")])],
    );

    for tradition in Tradition::ALL {
        let reading = VersionResolver::resolve(&doc, tradition);
        assert_eq!(reading.primary_groups, doc.groups, "{}", tradition);
        assert!(reading.supplementary.is_none());
    }
}

/// Test the alternate reference replaces the default one
#[test]
fn test_resolve_alternateReference_shouldBePreferred() {
    let json = r#"{
        "id": "r",
        "ref": "Genesis 1:1-1:5",
        "ref_yemenite": "Genesis 1:1-1:8",
        "verses": [{"verse_num": 1, "text_clean": "a"}]
    }"#;
    let doc = Document::from_json_str(json, "r").unwrap();

    assert_eq!(VersionResolver::resolve(&doc, Tradition::Standard).reference, "Genesis 1:1-1:5");
    assert_eq!(VersionResolver::resolve(&doc, Tradition::Yemenite).reference, "Genesis 1:1-1:8");
}

/// Test that text fields fall back independently and the translation never changes
#[test]
fn test_selectText_partialOverride_shouldFallBackPerField() {
    let verse = Verse::new(1, "full", "clean")
        .with_targum("targum")
        .with_version(Tradition::Yemenite, "", "yclean");

    let full = VersionResolver::select_full(&verse, Tradition::Yemenite);
    let clean = VersionResolver::select_clean(&verse, Tradition::Yemenite);

    assert_eq!(full.text, "full");
    assert!(full.fell_back);
    assert_eq!(clean.text, "yclean");
    assert!(!clean.fell_back);
    assert_eq!(VersionResolver::select_targum(&verse), "targum");
}

/// Test that an override keyed by the default tradition is honoured too
#[test]
fn test_selectText_standardOverride_shouldBeUsed() {
    let verse = Verse::new(1, "full", "clean").with_version(Tradition::Standard, "sfull", "sclean");

    assert_eq!(VersionResolver::select_full(&verse, Tradition::Standard).text, "sfull");
    assert_eq!(VersionResolver::select_clean(&verse, Tradition::Yemenite).text, "clean");
}
