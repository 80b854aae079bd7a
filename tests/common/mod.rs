/*!
 * Common test utilities for the tikkun test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tikkun::text::document::{Document, Tradition, Verse, VerseGroup};

/// Install a test logger once; later calls are no-ops
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A verse whose marked and practice texts share the same words
pub fn verse(num: u32, chapter: u32, verse_in_chapter: u32, full: &str, clean: &str) -> Verse {
    Verse::new(num, full, clean).with_citation(chapter, verse_in_chapter)
}

/// A document with three groups of two verses each and a supplementary reading.
///
/// The Yemenite tradition splits the reading into two groups and overrides
/// the first verse's text.
pub fn sample_document() -> Document {
    let groups = vec![
        VerseGroup::new(
            1,
            "Genesis 1:1-1:2",
            vec![
                verse(1, 1, 1, "בְּרֵאשִׁית בָּרָא", "בראשית ברא"),
                verse(2, 1, 2, "וְהָאָרֶץ הָיְתָה", "והארץ היתה"),
            ],
        ),
        VerseGroup::new(
            2,
            "Genesis 1:3-1:4",
            vec![
                verse(3, 1, 3, "וַיֹּאמֶר אֱלֹהִים", "ויאמר אלהים"),
                verse(4, 1, 4, "וַיַּרְא אֱלֹהִים", "וירא אלהים"),
            ],
        ),
        VerseGroup::new(
            3,
            "Genesis 1:5-1:6",
            vec![
                verse(5, 1, 5, "וַיִּקְרָא אֱלֹהִים", "ויקרא אלהים"),
                verse(6, 1, 6, "וַיֹּאמֶר אֱלֹהִים", "ויאמר אלהים"),
            ],
        ),
    ];

    let yemenite_groups = vec![
        VerseGroup::new(
            1,
            "Genesis 1:1-1:3",
            vec![
                verse(1, 1, 1, "בְּרֵאשִׁית בָּרָא", "בראשית ברא")
                    .with_version(Tradition::Yemenite, "בְּרֵאשִׁית בָּרָא אֱלֹהִים", "בראשית ברא אלהים"),
                verse(2, 1, 2, "וְהָאָרֶץ הָיְתָה", "והארץ היתה"),
                verse(3, 1, 3, "וַיֹּאמֶר אֱלֹהִים", "ויאמר אלהים"),
            ],
        ),
        VerseGroup::new(
            2,
            "Genesis 1:4-1:6",
            vec![
                verse(4, 1, 4, "וַיַּרְא אֱלֹהִים", "וירא אלהים"),
                verse(5, 1, 5, "וַיִּקְרָא אֱלֹהִים", "ויקרא אלהים"),
                verse(6, 1, 6, "וַיֹּאמֶר אֱלֹהִים", "ויאמר אלהים"),
            ],
        ),
    ];

    let haftara = VerseGroup::new(
        7,
        "Isaiah 42:5-42:6",
        vec![
            Verse::new(1, "כֹּה אָמַר", "כה אמר"),
            Verse::new(2, "אֲנִי יְהוָה", "אני יהוה"),
        ],
    );

    Document::new("bereshit", "Bereshit", groups)
        .with_reference("Genesis 1:1-1:6")
        .with_supplementary(haftara)
        .with_alternate_groups(Tradition::Yemenite, yemenite_groups)
}

/// The JSON form of a small document as produced by the data pipeline
pub const SAMPLE_DOCUMENT_JSON: &str = r#"{
    "id": "noach",
    "name": "Noach",
    "hebrew": "נח",
    "ref": "Genesis 6:9-6:10",
    "aliyot": [
        {"num": 1, "range": "Genesis 6:9", "verses": [
            {"verse_num": 1, "chapter": 6, "verse": 9,
             "text_full": "אֵלֶּה תּוֹלְדֹת נֹחַ", "text_clean": "אלה תולדת נח",
             "targum": "אִלֵּין תּוּלְדַת נֹחַ",
             "versions": {"yemenite": {"text_full": "אֵלֶּה תּוֹלְדֹת נֹחַ", "text_clean": "אלה תולדות נח"}}}
        ]},
        {"num": 2, "range": "Genesis 6:10", "verses": [
            {"verse_num": 2, "chapter": 6, "verse": 10,
             "text_full": "וַיּוֹלֶד נֹחַ", "text_clean": "ויולד נח"}
        ]},
        {"num": 3, "range": "Genesis 6:11", "verses": []}
    ],
    "haftara": {"num": 8, "range": "Isaiah 54:1", "verses": [
        {"verse_num": 1, "text_full": "רָנִּי עֲקָרָה", "text_clean": "רני עקרה"}
    ]}
}"#;

/// A two-book manifest
pub const SAMPLE_MANIFEST_JSON: &str = r#"[
    {"book": "Genesis", "hebrew": "בראשית", "parashot": [
        {"name": "Bereshit", "hebrew": "בראשית", "id": "bereshit", "ref": "Genesis 1:1-6:8"},
        {"name": "Noach", "hebrew": "נח", "id": "noach", "ref": "Genesis 6:9-11:32"}
    ]},
    {"book": "Exodus", "hebrew": "שמות", "parashot": [
        {"name": "Shemot", "hebrew": "שמות", "id": "shemot", "ref": "Exodus 1:1-6:1"}
    ]}
]"#;
