/*!
 * Catalogue of books and their readings.
 *
 * The manifest drives navigation between documents: it lists every reading
 * in publication order so a reader can step to the previous or next one.
 */

use serde::{Deserialize, Serialize};

/// One reading listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEntry {
    /// English name
    pub name: String,

    /// Hebrew name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hebrew: Option<String>,

    /// Document identifier
    pub id: String,

    /// Citation of the whole reading
    #[serde(rename = "ref", default)]
    pub reference: String,

    /// Citations of the individual verse groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliyot: Vec<String>,
}

impl ReadingEntry {
    /// Name to show in lists, preferring the Hebrew name.
    pub fn display_name(&self) -> &str {
        match self.hebrew.as_deref() {
            Some(hebrew) if !hebrew.is_empty() => hebrew,
            _ => &self.name,
        }
    }
}

/// A book and its readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// English book name
    pub book: String,

    /// Hebrew book name
    #[serde(default)]
    pub hebrew: String,

    /// Readings in order
    #[serde(default)]
    pub parashot: Vec<ReadingEntry>,
}

/// The full catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub books: Vec<Book>,
}

impl Manifest {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// Parse the catalogue from its JSON array form.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Find a book by English name, ignoring case.
    pub fn find_book(&self, name: &str) -> Option<&Book> {
        self.books
            .iter()
            .find(|book| book.book.eq_ignore_ascii_case(name))
    }

    /// All readings across all books, in order.
    pub fn readings(&self) -> impl Iterator<Item = &ReadingEntry> {
        self.books.iter().flat_map(|book| book.parashot.iter())
    }

    /// Look up a reading by document id.
    pub fn find_reading(&self, id: &str) -> Option<&ReadingEntry> {
        self.readings().find(|reading| reading.id == id)
    }

    /// Position of a reading in the flattened order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.readings().position(|reading| reading.id == id)
    }

    /// The readings before and after `id`, crossing book boundaries.
    pub fn neighbors(&self, id: &str) -> (Option<&ReadingEntry>, Option<&ReadingEntry>) {
        let readings: Vec<&ReadingEntry> = self.readings().collect();
        match readings.iter().position(|reading| reading.id == id) {
            Some(index) => (
                index.checked_sub(1).map(|prev| readings[prev]),
                readings.get(index + 1).copied(),
            ),
            None => (None, None),
        }
    }
}
