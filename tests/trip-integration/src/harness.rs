use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;

use trip_common::directory::{CityDirectory, StaticCityDirectory};
use trip_common::error::ValidationError;
use trip_common::form::{FieldId, TripForm};
use trip_common::results::{ResultsAggregator, ResultsPage};
use trip_common::search::{CitySearch, SearchStatus, SearchTicket};
use trip_common::settings::Settings;
use trip_common::store::QueryParamStore;

use crate::ymd;

/// A simulated browser tab sitting on the trip form.
///
/// Holds the URL (through the store), the mounted form, and one search
/// dropdown per destination field, the same way the UI wires them up.
pub struct TripSession<D = StaticCityDirectory> {
    pub directory: D,
    pub settings: Settings,
    pub store: QueryParamStore,
    pub form: TripForm,
    pub today: NaiveDate,
    searches: HashMap<FieldId, CitySearch>,
}

impl TripSession<StaticCityDirectory> {
    /// Open the form at `/home?{query}` with the built-in city table.
    pub fn open(query: &str) -> Self {
        Self::with_directory(StaticCityDirectory::new(), query)
    }
}

impl<D: CityDirectory> TripSession<D> {
    pub fn with_directory(directory: D, query: &str) -> Self {
        crate::init_tracing();
        let store = QueryParamStore::from_query(query);
        let form = TripForm::mount(&store);
        Self {
            directory,
            settings: Settings::default(),
            store,
            form,
            today: ymd(2023, 7, 22),
            searches: HashMap::new(),
        }
    }

    /// The address bar: form route plus the current query string.
    pub fn url(&self) -> String {
        Settings::link(&self.settings.form_route, &self.store.query_string())
    }

    pub fn field_id(&self, index: usize) -> FieldId {
        self.form.fields()[index].id
    }

    pub fn add_waypoint(&mut self) -> FieldId {
        self.form.add_destination(&mut self.store)
    }

    /// Type `text` into field `id`. Returns the ticket of the search it
    /// starts, if any.
    pub fn type_text(&mut self, id: FieldId, text: &str) -> Option<SearchTicket> {
        self.searches.entry(id).or_default().input(text)
    }

    /// Run a previously issued search to completion.
    pub fn finish_search(&mut self, id: FieldId, ticket: &SearchTicket) -> bool {
        let search = self.searches.entry(id).or_default();
        search.run(ticket, &self.directory)
    }

    pub fn search_status(&self, id: FieldId) -> Option<&SearchStatus> {
        self.searches.get(&id).map(CitySearch::status)
    }

    /// Type a prefix of `city` into field `index`, wait for the dropdown,
    /// and pick `city` from it.
    pub fn choose(&mut self, index: usize, city: &str) {
        let id = self.field_id(index);
        let prefix: String = city.chars().take(3).collect();
        let ticket = self
            .type_text(id, &prefix)
            .unwrap_or_else(|| panic!("typing {prefix:?} should start a search"));
        assert!(self.finish_search(id, &ticket));
        match self.search_status(id) {
            Some(SearchStatus::Results(items)) => assert!(
                items.iter().any(|c| c == city),
                "{city} not offered for {prefix:?}: {items:?}"
            ),
            other => panic!("expected results for {prefix:?}, got {other:?}"),
        }
        self.searches.entry(id).or_default().select(city);
        self.form
            .select_city(id, city, &mut self.store)
            .unwrap_or_else(|e| panic!("selecting {city} at {index}: {e}"));
    }

    pub fn clear(&mut self, index: usize) -> ValidationError {
        let id = self.field_id(index);
        self.searches.entry(id).or_default().cancel();
        self.form
            .clear_city(id, &mut self.store)
            .unwrap_or_else(|e| panic!("clearing field {index}: {e}"))
    }

    pub fn remove(&mut self, index: usize) {
        let id = self.field_id(index);
        self.form
            .remove_destination(id, &mut self.store)
            .unwrap_or_else(|e| panic!("removing field {index}: {e}"));
        if let Some(mut search) = self.searches.remove(&id) {
            search.cancel();
        }
    }

    /// Simulate a page reload: the form is rebuilt from the URL alone.
    pub fn reload(&mut self) {
        self.store = QueryParamStore::from_query(&self.store.query_string());
        self.form = TripForm::mount(&self.store);
        self.searches.clear();
    }

    /// Press Submit. On success returns the results link; otherwise the
    /// inline field errors that blocked submission.
    pub fn submit(&mut self) -> Result<String, Vec<(FieldId, ValidationError)>> {
        if self.form.validate(&self.directory, &self.settings) {
            Ok(Settings::link(
                &self.settings.results_route,
                &self.store.query_string(),
            ))
        } else {
            Err(self
                .form
                .fields()
                .iter()
                .filter_map(|f| f.error.clone().map(|e| (f.id, e)))
                .collect())
        }
    }

    /// Open the results view at `link` (e.g. "/results?destinations=...").
    pub fn open_results(&self, link: &str) -> ResultsPage {
        let query = link.split_once('?').map(|(_, q)| q).unwrap_or("");
        ResultsAggregator::new(&self.directory, &self.settings).build_from_query(query, self.today)
    }
}

/// One keystroke's worth of debounced search, as the UI runs it: wait out
/// the debounce, bail if superseded, search, then wait `latency` before the
/// response lands.
pub async fn debounced_search<D: CityDirectory>(
    search: &RefCell<CitySearch>,
    directory: &D,
    text: &str,
    debounce: Duration,
    latency: Duration,
) -> bool {
    let Some(ticket) = search.borrow_mut().input(text) else {
        return false;
    };
    tokio::time::sleep(debounce).await;
    if !search.borrow().is_current(&ticket) {
        tracing::debug!("Search for {text:?} superseded during debounce");
        return false;
    }
    let result = directory.search(&ticket.query);
    tokio::time::sleep(latency).await;
    search.borrow_mut().resolve(&ticket, result)
}
