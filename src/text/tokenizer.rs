/*!
 * Word-level tokenization of verse text.
 *
 * The practice-script text of each verse is cut into maximal whitespace and
 * non-whitespace runs. Whitespace is kept verbatim so the page renders with
 * the original spacing (including the wide setuma gaps and petucha line
 * breaks), and every word carries the matching word of the fully marked
 * source text as its hint.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::document::{Citation, Tradition, Verse, VerseGroup};
use crate::text::resolver::VersionResolver;

/// Word-break marker used in practice script where no real whitespace exists
pub const PLACEHOLDER_DELIMITER: char = '|';

/// Conventional names of the first eight verse groups
pub const GROUP_NAMES: [&str; 8] = [
    "ראשון", "שני", "שלישי", "רביעי", "חמישי", "שישי", "שביעי", "מפטיר",
];

/// Label of the supplementary reading
pub const SUPPLEMENTARY_LABEL: &str = "הפטרה";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// One unit of the rendered stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// A word of practice script with its source-text hint
    Word {
        text: String,
        hint: String,
        /// Present only on the first word of a cited verse
        #[serde(default, skip_serializing_if = "Option::is_none")]
        citation: Option<Citation>,
    },

    /// A whitespace run, verbatim
    Whitespace { text: String },

    /// Marker placed before the first verse of a group
    GroupBoundary { label: String, sublabel: String },
}

impl Token {
    pub fn word(text: &str, hint: &str, citation: Option<Citation>) -> Self {
        Self::Word {
            text: text.to_string(),
            hint: hint.to_string(),
            citation,
        }
    }

    pub fn whitespace(text: &str) -> Self {
        Self::Whitespace {
            text: text.to_string(),
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Self::Word { .. })
    }

    /// Displayed text; a boundary shows its label.
    pub fn text(&self) -> &str {
        match self {
            Self::Word { text, .. } | Self::Whitespace { text } => text,
            Self::GroupBoundary { label, .. } => label,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Word { hint, .. } => Some(hint),
            _ => None,
        }
    }

    pub fn citation(&self) -> Option<Citation> {
        match self {
            Self::Word { citation, .. } => *citation,
            _ => None,
        }
    }
}

/// A run of text produced by [`split_segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Whitespace(&'a str),
    Text(&'a str),
}

impl<'a> Segment<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Segment::Whitespace(s) | Segment::Text(s) => s,
        }
    }
}

/// Split text into alternating maximal whitespace and non-whitespace runs.
///
/// Concatenating the segments reproduces the input exactly.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in WHITESPACE_RUN.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Text(&text[last..m.start()]));
        }
        segments.push(Segment::Whitespace(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}

/// Label of a group at a position in the effective list.
pub fn group_label(position: usize, group: &VerseGroup) -> String {
    if group.is_supplementary() {
        return SUPPLEMENTARY_LABEL.to_string();
    }
    match GROUP_NAMES.get(position) {
        Some(name) => name.to_string(),
        None => format!("עליה {}", group.num),
    }
}

/// Builds token streams from verse groups.
pub struct Tokenizer;

impl Tokenizer {
    /// Tokenize a list of groups in order.
    pub fn tokenize(
        groups: &[VerseGroup],
        tradition: Tradition,
        include_group_boundaries: bool,
    ) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (position, group) in groups.iter().enumerate() {
            Self::push_group(&mut tokens, position, group, tradition, include_group_boundaries);
        }
        debug!(
            "Tokenized {} groups for {}: {} tokens",
            groups.len(),
            tradition,
            tokens.len()
        );
        tokens
    }

    /// Tokenize a single group found at `position` of the effective list.
    pub fn tokenize_group(
        group: &VerseGroup,
        position: usize,
        tradition: Tradition,
        include_group_boundary: bool,
    ) -> Vec<Token> {
        let mut tokens = Vec::new();
        Self::push_group(&mut tokens, position, group, tradition, include_group_boundary);
        tokens
    }

    /// Tokenize one verse.
    pub fn tokenize_verse(verse: &Verse, tradition: Tradition) -> Vec<Token> {
        let mut tokens = Vec::new();
        Self::push_verse(&mut tokens, verse, tradition);
        tokens
    }

    fn push_group(
        tokens: &mut Vec<Token>,
        position: usize,
        group: &VerseGroup,
        tradition: Tradition,
        include_group_boundary: bool,
    ) {
        if include_group_boundary {
            tokens.push(Token::GroupBoundary {
                label: group_label(position, group),
                sublabel: group.range.clone(),
            });
        }
        for verse in &group.verses {
            Self::push_verse(tokens, verse, tradition);
        }
    }

    fn push_verse(tokens: &mut Vec<Token>, verse: &Verse, tradition: Tradition) {
        let clean = VersionResolver::select_clean(verse, tradition).text;
        if clean.is_empty() {
            return;
        }

        let full = VersionResolver::select_full(verse, tradition).text;
        let hints: Vec<&str> = split_segments(full)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Text(word) => Some(word),
                Segment::Whitespace(_) => None,
            })
            .collect();

        let mut citation = verse.citation();
        let mut word_index = 0;

        for segment in split_segments(clean) {
            match segment {
                Segment::Whitespace(run) => tokens.push(Token::whitespace(run)),
                Segment::Text(text) if text.contains(PLACEHOLDER_DELIMITER) => {
                    // A delimited run has no single source word to point at,
                    // so each part hints itself.
                    for (i, part) in text.split(PLACEHOLDER_DELIMITER).enumerate() {
                        if i > 0 {
                            tokens.push(Token::whitespace(" "));
                        }
                        if !part.is_empty() {
                            tokens.push(Token::word(part, part, citation.take()));
                        }
                    }
                    word_index += 1;
                }
                Segment::Text(text) => {
                    let hint = hints.get(word_index).copied().unwrap_or(text);
                    tokens.push(Token::word(text, hint, citation.take()));
                    word_index += 1;
                }
            }
        }
    }
}
