/*!
 * Reader session models: settings, commands, events and view snapshots.
 *
 * A session is driven exclusively through `ReaderCommand` values. Every
 * applied command yields a `ReaderEvent` and a fresh `ReaderView`, which is
 * all an observer ever needs to redraw.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::text::document::{Document, Tradition};
use crate::text::pagination::{Page, PageUnit};

/// How much of the reading is tokenized at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadingScope {
    /// All groups, primary and supplementary, as one stream
    #[default]
    #[serde(rename = "whole")]
    WholeReading,

    /// Only the currently selected group
    #[serde(rename = "group")]
    SingleGroup,
}

impl ReadingScope {
    // @returns: Identifier used in configuration and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Self::WholeReading => "whole",
            Self::SingleGroup => "group",
        }
    }
}

impl fmt::Display for ReadingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ReadingScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "whole" => Ok(Self::WholeReading),
            "group" => Ok(Self::SingleGroup),
            _ => Err(anyhow::anyhow!("Invalid reading scope: {}", s)),
        }
    }
}

/// Inputs that shape the derived token stream and pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderSettings {
    // @field: Active tradition
    pub tradition: Tradition,

    // @field: Budget per page, in `page_unit`
    pub page_size: usize,

    // @field: What counts toward the page budget
    pub page_unit: PageUnit,

    // @field: Emit a marker before each group
    pub include_group_boundaries: bool,

    // @field: Whole reading or one group
    pub scope: ReadingScope,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            tradition: Tradition::default(),
            page_size: 120,
            page_unit: PageUnit::default(),
            include_group_boundaries: true,
            scope: ReadingScope::default(),
        }
    }
}

/// Discrete inputs accepted by a reader session
#[derive(Debug, Clone, PartialEq)]
pub enum ReaderCommand {
    /// Replace the document; page and group return to the start
    LoadDocument(Box<Document>),
    SetTradition(Tradition),
    SetPageSize(usize),
    SetPageUnit(PageUnit),
    SetScope(ReadingScope),
    SetGroupBoundaries(bool),
    NextPage,
    PreviousPage,
    /// 0-based; clamped to the last page
    GoToPage(usize),
    NextGroup,
    PreviousGroup,
    /// 0-based; clamped to the last group
    GoToGroup(usize),
}

/// What changed as the result of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderEvent {
    DocumentLoaded,
    TraditionChanged,
    LayoutChanged,
    ScopeChanged,
    PageChanged,
    GroupChanged,
}

impl ReaderCommand {
    /// The event announced after this command is applied.
    pub fn event(&self) -> ReaderEvent {
        match self {
            Self::LoadDocument(_) => ReaderEvent::DocumentLoaded,
            Self::SetTradition(_) => ReaderEvent::TraditionChanged,
            Self::SetPageSize(_) | Self::SetPageUnit(_) | Self::SetGroupBoundaries(_) => {
                ReaderEvent::LayoutChanged
            }
            Self::SetScope(_) => ReaderEvent::ScopeChanged,
            Self::NextPage | Self::PreviousPage | Self::GoToPage(_) => ReaderEvent::PageChanged,
            Self::NextGroup | Self::PreviousGroup | Self::GoToGroup(_) => ReaderEvent::GroupChanged,
        }
    }
}

/// Snapshot of everything a reader surface displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReaderView {
    /// Loaded document, if any
    pub document_id: Option<String>,

    /// Heading for the document
    pub title: String,

    /// Citation of the whole reading for the active tradition
    pub reference: String,

    pub tradition: Tradition,

    pub scope: ReadingScope,

    /// Index of the current group in the effective list
    pub group_index: usize,

    pub group_count: usize,

    /// Conventional name of the current group
    pub group_label: Option<String>,

    /// Tokens on the current page
    pub page: Page,

    pub page_count: usize,

    /// 1-based page number as a traditional numeral
    pub page_label: String,

    pub is_first_page: bool,

    pub is_last_page: bool,
}

impl ReaderView {
    /// 0-based index of the current page
    pub fn page_index(&self) -> usize {
        self.page.index
    }
}

/// Receives a snapshot after every applied command
pub trait ReaderObserver {
    fn on_update(&mut self, event: ReaderEvent, view: &ReaderView);
}

impl<F> ReaderObserver for F
where
    F: FnMut(ReaderEvent, &ReaderView),
{
    fn on_update(&mut self, event: ReaderEvent, view: &ReaderView) {
        self(event, view)
    }
}
