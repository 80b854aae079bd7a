/*!
 * Traditional alphabetic numerals for chapter, verse and page numbers.
 *
 * Numbers are built greedily from the letter table. The combinations for
 * 10+5 and 10+6 are never written; whenever the finished string ends in one
 * of them it is rewritten to 9+6 or 9+7.
 */

use crate::text::document::Verse;

// @const: Letter values, largest first
const NUMERAL_TABLE: [(u32, char); 22] = [
    (400, 'ת'), (300, 'ש'), (200, 'ר'), (100, 'ק'),
    (90, 'צ'), (80, 'פ'), (70, 'ע'), (60, 'ס'), (50, 'נ'),
    (40, 'מ'), (30, 'ל'), (20, 'כ'), (10, 'י'),
    (9, 'ט'), (8, 'ח'), (7, 'ז'), (6, 'ו'), (5, 'ה'),
    (4, 'ד'), (3, 'ג'), (2, 'ב'), (1, 'א'),
];

const FORBIDDEN_FIFTEEN: &str = "יה";
const FORBIDDEN_SIXTEEN: &str = "יו";

/// Replacement written for a trailing 10+5
pub const FIFTEEN: &str = "טו";

/// Replacement written for a trailing 10+6
pub const SIXTEEN: &str = "טז";

/// Encode an integer as a traditional numeral.
///
/// Non-positive input has no traditional form and is returned in decimal.
pub fn encode(n: i64) -> String {
    if n <= 0 {
        return n.to_string();
    }

    let mut result = String::new();
    let mut remainder = n;
    for &(value, letter) in NUMERAL_TABLE.iter() {
        let value = i64::from(value);
        while remainder >= value {
            result.push(letter);
            remainder -= value;
        }
    }

    if let Some(stem) = result.strip_suffix(FORBIDDEN_FIFTEEN) {
        result = format!("{}{}", stem, FIFTEEN);
    } else if let Some(stem) = result.strip_suffix(FORBIDDEN_SIXTEEN) {
        result = format!("{}{}", stem, SIXTEEN);
    }

    result
}

/// Decode a traditional numeral back to its value.
///
/// Geresh and gershayim marks are ignored. Returns `None` for an empty
/// string or any character outside the letter table.
pub fn decode(numeral: &str) -> Option<u32> {
    let mut total = 0u32;
    let mut seen_letter = false;

    for c in numeral.chars() {
        if matches!(c, '\'' | '"' | '\u{05F3}' | '\u{05F4}') {
            continue;
        }
        let value = NUMERAL_TABLE
            .iter()
            .find(|(_, letter)| *letter == c)
            .map(|(value, _)| *value)?;
        total = total.checked_add(value)?;
        seen_letter = true;
    }

    seen_letter.then_some(total)
}

/// Format a citation as `chapter:verse` in numerals.
pub fn format_citation(chapter: u32, verse: u32) -> String {
    format!("{}:{}", encode(i64::from(chapter)), encode(i64::from(verse)))
}

/// Heading shown above a verse card.
///
/// Verses of the primary reading carry a chapter and verse; supplementary
/// readings only have their running position.
pub fn verse_heading(verse: &Verse) -> String {
    match verse.citation() {
        Some(citation) => format!(
            "פרק {}, פסוק {}",
            encode(i64::from(citation.chapter)),
            encode(i64::from(citation.verse))
        ),
        None => encode(i64::from(verse.verse_num)),
    }
}
