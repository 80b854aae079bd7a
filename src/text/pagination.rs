/*!
 * Pagination of token streams.
 *
 * Pages are contiguous, non-overlapping slices that partition the stream
 * exactly. A stream always has at least one page, so a page index is
 * meaningful even for an empty reading.
 */

use serde::{Deserialize, Serialize};

use crate::text::tokenizer::Token;

/// What counts toward a page's size budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    /// Every token: words, whitespace and group markers
    #[default]
    Tokens,
    /// Only words; whitespace rides along with the preceding word, and a
    /// group marker opens a new page once the current one is full
    Words,
}

/// A contiguous slice of the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 0-based page index
    pub index: usize,

    /// Offset of the first token in the stream
    pub start: usize,

    /// Tokens on this page
    pub tokens: Vec<Token>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of word tokens on this page.
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_word()).count()
    }
}

/// Splits token streams into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    unit: PageUnit,
}

impl Paginator {
    /// Create a paginator; a zero page size is treated as one.
    pub fn new(page_size: usize, unit: PageUnit) -> Self {
        Self {
            page_size: page_size.max(1),
            unit,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn unit(&self) -> PageUnit {
        self.unit
    }

    /// Partition a token stream into pages.
    pub fn paginate(&self, tokens: &[Token]) -> Vec<Page> {
        let ranges = match self.unit {
            PageUnit::Tokens => self.token_ranges(tokens.len()),
            PageUnit::Words => self.word_ranges(tokens),
        };

        ranges
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| Page {
                index,
                start,
                tokens: tokens[start..end].to_vec(),
            })
            .collect()
    }

    /// Number of pages the stream would produce, never less than one.
    pub fn page_count(&self, tokens: &[Token]) -> usize {
        match self.unit {
            PageUnit::Tokens => tokens.len().div_ceil(self.page_size).max(1),
            PageUnit::Words => self.word_ranges(tokens).len(),
        }
    }

    fn token_ranges(&self, len: usize) -> Vec<(usize, usize)> {
        if len == 0 {
            return vec![(0, 0)];
        }
        (0..len)
            .step_by(self.page_size)
            .map(|start| (start, (start + self.page_size).min(len)))
            .collect()
    }

    fn word_ranges(&self, tokens: &[Token]) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut start = 0;
        let mut words = 0;
        let last_word = tokens.iter().rposition(Token::is_word);

        for (i, token) in tokens.iter().enumerate() {
            // a group marker on a full page opens the next one, as long as words follow it
            let opens_page = match token {
                Token::Word { .. } => true,
                Token::GroupBoundary { .. } => last_word.is_some_and(|last| last > i),
                _ => false,
            };
            if opens_page && words == self.page_size {
                ranges.push((start, i));
                start = i;
                words = 0;
            }
            if token.is_word() {
                words += 1;
            }
        }
        ranges.push((start, tokens.len()));

        ranges
    }
}

/// Current page position within a paginated stream.
///
/// Transitions return a new state and never leave `[0, total - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    index: usize,
    total: usize,
}

impl PageState {
    /// Start at the first page of `total` pages.
    pub fn new(total: usize) -> Self {
        Self {
            index: 0,
            total: total.max(1),
        }
    }

    /// A state at `index`, clamped into range.
    pub fn at(index: usize, total: usize) -> Self {
        Self::new(total).go_to(index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn last(&self) -> usize {
        self.total - 1
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == self.last()
    }

    /// Move forward one page; a no-op on the last page.
    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1).min(self.last()),
            ..self
        }
    }

    /// Move back one page; a no-op on the first page.
    pub fn previous(self) -> Self {
        Self {
            index: self.index.saturating_sub(1),
            ..self
        }
    }

    /// Jump to a page, clamped to the valid range.
    pub fn go_to(self, index: usize) -> Self {
        Self {
            index: index.min(self.last()),
            ..self
        }
    }

    /// Adopt a new page total after the stream was regenerated.
    pub fn clamp_to_valid_range(self, total: usize) -> Self {
        let total = total.max(1);
        Self {
            index: self.index.min(total - 1),
            total,
        }
    }
}
