/*!
 * Selection of the active verse groups and verse text for a tradition.
 *
 * A tradition may replace the document's primary groups, its supplementary
 * reading, or individual verse fields. Anything it does not replace falls
 * back to the document's defaults; absence of an alternate is never an error.
 */

use log::debug;

use crate::text::document::{Document, Tradition, Verse, VerseGroup};

/// The verse groups active for one document and tradition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReading {
    /// Primary groups in reading order
    pub primary_groups: Vec<VerseGroup>,

    /// Trailing supplementary reading, tagged as such
    pub supplementary: Option<VerseGroup>,

    /// Citation of the whole reading for this tradition
    pub reference: String,

    /// Tradition the reading was resolved for
    pub tradition: Tradition,
}

impl ResolvedReading {
    /// Primary groups followed by the supplementary group, as one sequence.
    pub fn groups(&self) -> impl Iterator<Item = &VerseGroup> {
        self.primary_groups.iter().chain(self.supplementary.iter())
    }

    /// Owned flat list of the effective groups.
    pub fn into_groups(self) -> Vec<VerseGroup> {
        let mut groups = self.primary_groups;
        groups.extend(self.supplementary);
        groups
    }

    /// Number of groups in the effective list.
    pub fn group_count(&self) -> usize {
        self.primary_groups.len() + usize::from(self.supplementary.is_some())
    }

    /// Group at a position of the effective list.
    pub fn group(&self, index: usize) -> Option<&VerseGroup> {
        self.groups().nth(index)
    }
}

/// A text field chosen for display, and whether it came from the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChoice<'a> {
    pub text: &'a str,

    /// True when the tradition had no override and the base field was used
    pub fell_back: bool,
}

/// Resolves which groups and text fields a tradition sees.
pub struct VersionResolver;

impl VersionResolver {
    /// Determine the effective verse groups for a tradition.
    pub fn resolve(document: &Document, tradition: Tradition) -> ResolvedReading {
        let alternate = document.alternate(tradition);

        let primary_groups = match alternate {
            Some(alt) if !alt.groups.is_empty() => {
                debug!(
                    "Using {} alternate groups for '{}' ({})",
                    alt.groups.len(),
                    document.id,
                    tradition
                );
                alt.groups.clone()
            }
            _ => document.groups.clone(),
        };

        let supplementary = alternate
            .and_then(|alt| alt.supplementary.as_ref())
            .or(document.supplementary.as_ref())
            .cloned()
            .map(VerseGroup::into_supplementary);

        let reference = alternate
            .and_then(|alt| alt.reference.clone())
            .unwrap_or_else(|| document.reference.clone());

        ResolvedReading {
            primary_groups,
            supplementary,
            reference,
            tradition,
        }
    }

    /// Source text shown for a verse under a tradition.
    pub fn select_full(verse: &Verse, tradition: Tradition) -> TextChoice<'_> {
        Self::select(
            verse.versions.get(&tradition).map(|v| v.text_full.as_str()),
            &verse.text_full,
        )
    }

    /// Practice-script text shown for a verse under a tradition.
    pub fn select_clean(verse: &Verse, tradition: Tradition) -> TextChoice<'_> {
        Self::select(
            verse.versions.get(&tradition).map(|v| v.text_clean.as_str()),
            &verse.text_clean,
        )
    }

    /// Translation text; identical for every tradition.
    pub fn select_targum(verse: &Verse) -> &str {
        &verse.targum
    }

    // Empty override text counts as missing.
    fn select<'a>(override_text: Option<&'a str>, base: &'a str) -> TextChoice<'a> {
        match override_text {
            Some(text) if !text.is_empty() => TextChoice {
                text,
                fell_back: false,
            },
            _ => TextChoice {
                text: base,
                fell_back: true,
            },
        }
    }
}
