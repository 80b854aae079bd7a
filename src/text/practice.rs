/*!
 * Derivation of practice-script text from fully marked source text.
 *
 * Practice script is what a reader sees in a scroll: consonants only, no
 * vowels, cantillation or punctuation. Section breaks survive as layout:
 * an open section (petucha) becomes a line break and a closed section
 * (setuma) becomes a nine-space gap.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const PETUCHA_MARKER: &str = "__PE_MARKER__";
const SETUMA_MARKER: &str = "__SAMEKH_MARKER__";

/// Gap rendered for a closed section break
pub const SETUMA_GAP: &str = "         ";

static PETUCHA_BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\{\(\[]\s*פ\s*[\}\)\]]").unwrap());

static SETUMA_BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\{\(\[]\s*ס\s*[\}\)\]]").unwrap());

// Maqaf and hyphen join words in the source; practice script separates them
static WORD_JOINERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\-\u{05BE}]").unwrap());

// Cantillation, vowels, paseq and the dots of shin/sin
static POINTING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{0591}-\u{05AF}\u{05B0}-\u{05BD}\u{05BF}\u{05C0}\u{05C1}-\u{05C2}\u{05C4}-\u{05C5}\u{05C7}]")
        .unwrap()
});

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:\.\u{05C3}]").unwrap());

static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[(){}\[\]]").unwrap());

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());

/// Turn fully marked source text into practice script.
pub fn derive_practice_text(full: &str) -> String {
    if full.is_empty() {
        return String::new();
    }

    let text = PETUCHA_BRACKETED.replace_all(full, format!(" {} ", PETUCHA_MARKER));
    let text = SETUMA_BRACKETED.replace_all(&text, format!(" {} ", SETUMA_MARKER));
    let text = mark_isolated_section_letters(&text);
    let text = WORD_JOINERS.replace_all(&text, " ");
    let text = POINTING.replace_all(&text, "");
    let text = PUNCTUATION.replace_all(&text, "");
    let text = BRACKETS.replace_all(&text, "");

    collapse_whitespace(&text)
        .replace(&format!(" {} ", PETUCHA_MARKER), "\n")
        .replace(PETUCHA_MARKER, "\n")
        .replace(&format!(" {} ", SETUMA_MARKER), SETUMA_GAP)
        .replace(SETUMA_MARKER, SETUMA_GAP)
}

/// Clean source text as delivered by the text provider.
///
/// Entities are decoded, markup removed, non-breaking and thin spaces
/// turned into ordinary spaces and runs of whitespace collapsed.
pub fn normalize_source(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let decoded = decode_entities(text);
    let stripped = HTML_TAG.replace_all(&decoded, "");
    let spaced = stripped.replace(['\u{00A0}', '\u{2009}'], " ");

    collapse_whitespace(&spaced)
}

// A lone פ or ס between whitespace is a section marker, not a word.
fn mark_isolated_section_letters(text: &str) -> String {
    text.split_whitespace()
        .map(|word| match word {
            "פ" => PETUCHA_MARKER,
            "ס" => SETUMA_MARKER,
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    HTML_ENTITY
        .replace_all(text, |caps: &Captures| {
            decode_entity(&caps[1])
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let value = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(value);
    }

    match entity.to_ascii_lowercase().as_str() {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "thinsp" => Some('\u{2009}'),
        "ensp" | "emsp" => Some(' '),
        _ => None,
    }
}
