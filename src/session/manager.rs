/*!
 * Reader session: the stateful shell around the pure text pipeline.
 *
 * This module handles:
 * - Holding the loaded document and the reader's settings
 * - Recomputing resolve → tokenize → paginate whenever an input changes
 * - Page and group navigation with clamping
 * - Notifying observers with a fresh view after every command
 *
 * Derived structures (token stream, pages) are never patched in place; any
 * change to the document, tradition, layout or scope rebuilds them.
 */

use log::{debug, info};

use crate::numerals;
use crate::text::cache::TokenCache;
use crate::text::document::Document;
use crate::text::pagination::{Page, PageState, Paginator};
use crate::text::resolver::{ResolvedReading, VersionResolver};
use crate::text::tokenizer::{group_label, Token};

use super::models::{ReaderCommand, ReaderObserver, ReaderSettings, ReaderView, ReadingScope};

/// Reader state driven by discrete commands
pub struct ReaderSession {
    /// Current settings
    settings: ReaderSettings,

    /// Shared token cache
    cache: TokenCache,

    /// Loaded document
    document: Option<Document>,

    /// Groups effective for the current document and tradition
    reading: Option<ResolvedReading>,

    /// Current group in the effective list
    group_index: usize,

    /// Offset of each group's first token in `tokens` (whole-reading scope)
    group_starts: Vec<usize>,

    /// Current token stream
    tokens: Vec<Token>,

    /// Current pages; never empty
    pages: Vec<Page>,

    /// Current page position
    page_state: PageState,

    /// Registered observers
    observers: Vec<Box<dyn ReaderObserver>>,
}

impl ReaderSession {
    /// Create a session with no document loaded
    pub fn new(settings: ReaderSettings) -> Self {
        let mut session = Self {
            settings,
            cache: TokenCache::default(),
            document: None,
            reading: None,
            group_index: 0,
            group_starts: Vec::new(),
            tokens: Vec::new(),
            pages: Vec::new(),
            page_state: PageState::new(1),
            observers: Vec::new(),
        };
        session.recompute();
        session
    }

    /// Create a session and load a document into it
    pub fn open(document: Document, settings: ReaderSettings) -> Self {
        let mut session = Self::new(settings);
        session.apply(ReaderCommand::LoadDocument(Box::new(document)));
        session
    }

    /// Use an existing cache, e.g. one shared between sessions.
    ///
    /// The cache is cleared whenever the session switches to another document.
    pub fn with_cache(mut self, cache: TokenCache) -> Self {
        self.cache = cache;
        self
    }

    /// Register an observer notified after every command
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: ReaderObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Apply a command, notify observers and return the resulting view.
    pub fn apply(&mut self, command: ReaderCommand) -> ReaderView {
        let event = command.event();

        match command {
            ReaderCommand::LoadDocument(document) => {
                info!(
                    "Loaded '{}' with {} verse groups",
                    document.id,
                    document.groups.len()
                );
                let switched = self
                    .document
                    .as_ref()
                    .is_some_and(|current| current.id != document.id);
                if switched {
                    self.cache.clear();
                }
                self.document = Some(*document);
                self.group_index = 0;
                self.page_state = PageState::new(1);
                self.recompute();
            }
            ReaderCommand::SetTradition(tradition) => {
                self.settings.tradition = tradition;
                self.recompute();
            }
            ReaderCommand::SetPageSize(page_size) => {
                self.settings.page_size = page_size.max(1);
                self.recompute();
            }
            ReaderCommand::SetPageUnit(unit) => {
                self.settings.page_unit = unit;
                self.recompute();
            }
            ReaderCommand::SetGroupBoundaries(include) => {
                self.settings.include_group_boundaries = include;
                self.recompute();
            }
            ReaderCommand::SetScope(scope) => {
                let group = self.group_index;
                self.settings.scope = scope;
                self.recompute();
                if scope == ReadingScope::WholeReading {
                    self.move_to_group(group);
                }
            }
            ReaderCommand::NextPage => self.move_to_page(self.page_state.next()),
            ReaderCommand::PreviousPage => self.move_to_page(self.page_state.previous()),
            ReaderCommand::GoToPage(index) => self.move_to_page(self.page_state.go_to(index)),
            ReaderCommand::NextGroup => self.move_to_group(self.group_index.saturating_add(1)),
            ReaderCommand::PreviousGroup => self.move_to_group(self.group_index.saturating_sub(1)),
            ReaderCommand::GoToGroup(index) => self.move_to_group(index),
        }

        let view = self.view();
        for observer in self.observers.iter_mut() {
            observer.on_update(event, &view);
        }
        view
    }

    /// Snapshot of the current state
    pub fn view(&self) -> ReaderView {
        let page = self
            .current_page()
            .cloned()
            .unwrap_or_else(|| Page {
                index: 0,
                start: 0,
                tokens: Vec::new(),
            });

        let group_label = self
            .reading
            .as_ref()
            .and_then(|reading| reading.group(self.group_index))
            .map(|group| group_label(self.group_index, group));

        ReaderView {
            document_id: self.document.as_ref().map(|doc| doc.id.clone()),
            title: self
                .document
                .as_ref()
                .map(|doc| doc.display_name().to_string())
                .unwrap_or_default(),
            reference: self
                .reading
                .as_ref()
                .map(|reading| reading.reference.clone())
                .unwrap_or_default(),
            tradition: self.settings.tradition,
            scope: self.settings.scope,
            group_index: self.group_index,
            group_count: self.group_count(),
            group_label,
            page_count: self.page_state.total(),
            page_label: numerals::encode(self.page_state.index() as i64 + 1),
            is_first_page: self.page_state.is_first(),
            is_last_page: self.page_state.is_last(),
            page,
        }
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn reading(&self) -> Option<&ResolvedReading> {
        self.reading.as_ref()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_state(&self) -> PageState {
        self.page_state
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.page_state.index())
    }

    pub fn group_index(&self) -> usize {
        self.group_index
    }

    /// Number of groups in the effective list
    pub fn group_count(&self) -> usize {
        self.reading
            .as_ref()
            .map(ResolvedReading::group_count)
            .unwrap_or(0)
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    // Rebuild everything derived from the document and settings.
    fn recompute(&mut self) {
        let reading = self
            .document
            .as_ref()
            .map(|document| VersionResolver::resolve(document, self.settings.tradition));

        self.group_index = match &reading {
            Some(reading) => self.group_index.min(reading.group_count().saturating_sub(1)),
            None => 0,
        };

        let (tokens, group_starts) = match &reading {
            Some(reading) => self.tokenize(reading),
            None => (Vec::new(), Vec::new()),
        };

        let paginator = Paginator::new(self.settings.page_size, self.settings.page_unit);
        self.pages = paginator.paginate(&tokens);
        self.page_state = self.page_state.clamp_to_valid_range(self.pages.len());
        self.tokens = tokens;
        self.group_starts = group_starts;
        self.reading = reading;

        if self.settings.scope == ReadingScope::WholeReading {
            if let Some(start) = self.current_page().map(|page| page.start) {
                self.group_index = self.group_at(start);
            }
        }

        debug!(
            "Recomputed reader ({}, {}): {} tokens on {} pages, page {} group {}",
            self.settings.tradition,
            self.settings.scope,
            self.tokens.len(),
            self.pages.len(),
            self.page_state.index(),
            self.group_index
        );
    }

    fn tokenize(&self, reading: &ResolvedReading) -> (Vec<Token>, Vec<usize>) {
        let tradition = reading.tradition;
        let boundaries = self.settings.include_group_boundaries;

        match self.settings.scope {
            ReadingScope::WholeReading => {
                let mut tokens = Vec::new();
                let mut starts = Vec::with_capacity(reading.group_count());
                for (position, group) in reading.groups().enumerate() {
                    starts.push(tokens.len());
                    tokens.extend(self.cache.tokenize_group(group, position, tradition, boundaries));
                }
                (tokens, starts)
            }
            ReadingScope::SingleGroup => match reading.group(self.group_index) {
                Some(group) => (
                    self.cache
                        .tokenize_group(group, self.group_index, tradition, boundaries),
                    vec![0],
                ),
                None => (Vec::new(), Vec::new()),
            },
        }
    }

    fn move_to_page(&mut self, state: PageState) {
        self.page_state = state;

        if self.settings.scope == ReadingScope::WholeReading {
            if let Some(start) = self.current_page().map(|page| page.start) {
                self.group_index = self.group_at(start);
            }
        }
    }

    fn move_to_group(&mut self, index: usize) {
        let count = self.group_count();
        if count == 0 {
            return;
        }
        self.group_index = index.min(count - 1);

        match self.settings.scope {
            ReadingScope::WholeReading => {
                let offset = self.first_word_of(self.group_index);
                self.page_state = self.page_state.go_to(self.page_at(offset));
            }
            ReadingScope::SingleGroup => {
                self.page_state = PageState::new(1);
                self.recompute();
            }
        }
    }

    // Offset of the group's first word, or of its first token when it has none.
    fn first_word_of(&self, group: usize) -> usize {
        let start = self.group_starts.get(group).copied().unwrap_or(0);
        let end = self
            .group_starts
            .get(group + 1)
            .copied()
            .unwrap_or(self.tokens.len());

        self.tokens
            .get(start..end)
            .and_then(|tokens| tokens.iter().position(Token::is_word))
            .map_or(start, |i| start + i)
    }

    // Group whose tokens contain `offset`.
    fn group_at(&self, offset: usize) -> usize {
        self.group_starts
            .iter()
            .rposition(|&start| start <= offset)
            .unwrap_or(0)
    }

    // Page whose tokens contain `offset`.
    fn page_at(&self, offset: usize) -> usize {
        self.pages
            .iter()
            .rposition(|page| page.start <= offset)
            .unwrap_or(0)
    }
}

impl Default for ReaderSession {
    fn default() -> Self {
        Self::new(ReaderSettings::default())
    }
}
