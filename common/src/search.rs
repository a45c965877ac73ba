//! Per-field city search with stale-response protection.
//!
//! Each keystroke starts a new generation. The caller waits out the debounce
//! period, runs the search, and hands the result back together with the
//! ticket it was issued; results carrying an outdated ticket are dropped no
//! matter when they arrive.

use crate::directory::CityDirectory;
use crate::error::SearchFailure;

/// Identifies one search request for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Results(Vec<String>),
    NoResults,
    Failed(SearchFailure),
}

/// Keys the dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Dropdown state behind one destination input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySearch {
    generation: u64,
    query: String,
    status: SearchStatus,
    open: bool,
    focused: Option<usize>,
}

impl CitySearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Inline text for an empty result, e.g. "No results were found for Xyz".
    pub fn empty_message(&self) -> Option<String> {
        match self.status {
            SearchStatus::NoResults => Some(format!("No results were found for {}", self.query)),
            _ => None,
        }
    }

    /// The input text changed. Supersedes any search in flight and returns
    /// the ticket for the new one, or `None` when the input is now blank.
    pub fn input(&mut self, text: &str) -> Option<SearchTicket> {
        self.generation += 1;
        self.query = text.to_string();
        self.focused = None;
        if text.trim().is_empty() {
            self.status = SearchStatus::Idle;
            self.open = false;
            return None;
        }
        self.status = SearchStatus::Loading;
        self.open = true;
        Some(SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        })
    }

    /// Forget any search in flight (field cleared, view torn down).
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.status = SearchStatus::Idle;
        self.open = false;
        self.focused = None;
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished search. Returns `false` if the ticket was stale and
    /// the result was discarded.
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<String>, SearchFailure>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale search for {:?} (generation {} < {})",
                ticket.query,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.status = match result {
            Ok(matches) if matches.is_empty() => SearchStatus::NoResults,
            Ok(matches) => SearchStatus::Results(matches),
            Err(err) => {
                tracing::error!("City search failed: {err}");
                SearchStatus::Failed(err)
            }
        };
        true
    }

    /// Run the search for `ticket` against `directory`, unless it has
    /// already been superseded.
    pub fn run<D: CityDirectory>(&mut self, ticket: &SearchTicket, directory: &D) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let result = directory.search(&ticket.query);
        self.resolve(ticket, result)
    }

    /// A dropdown item was chosen; closes the dropdown.
    pub fn select(&mut self, city: &str) {
        self.generation += 1;
        self.query = city.to_string();
        self.open = false;
        self.focused = None;
    }

    /// Keyboard navigation. Returns the chosen city on `Enter`.
    pub fn key(&mut self, key: DropdownKey) -> Option<String> {
        let items = match &self.status {
            SearchStatus::Results(items) => items.clone(),
            _ => Vec::new(),
        };
        match key {
            DropdownKey::Escape => {
                self.open = false;
                None
            }
            DropdownKey::ArrowDown if !items.is_empty() => {
                self.focused = Some(self.focused.map_or(0, |f| (f + 1) % items.len()));
                None
            }
            DropdownKey::ArrowUp if !items.is_empty() => {
                let len = items.len();
                self.focused = Some(self.focused.map_or(len - 1, |f| (f + len - 1) % len));
                None
            }
            DropdownKey::Enter => {
                let city = items.get(self.focused?)?.clone();
                self.select(&city);
                Some(city)
            }
            _ => None,
        }
    }
}
