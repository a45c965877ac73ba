use chrono::NaiveDate;

use crate::error::StateError;
use crate::query::{
    format_date_param, join_destinations, QueryKey, QueryParams, TripQuery, DATE_KEY,
    DESTINATIONS_KEY, PASSENGERS_KEY,
};

/// Keeps the trip parameters of a URL query string in sync with form edits.
///
/// The store owns the query string; every setter rewrites it immediately
/// (last write wins). It also remembers how many destination slots the form
/// currently shows, because a freshly added waypoint has no entry in the URL
/// until a city is chosen for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParamStore {
    params: QueryParams,
    slots: usize,
}

impl QueryParamStore {
    pub fn new() -> Self {
        Self::from_query("")
    }

    pub fn from_query(query: &str) -> Self {
        let params = QueryParams::parse(query);
        let slots = TripQuery::from_params(&params).destinations.len();
        Self { params, slots }
    }

    /// Current URL-encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        self.params.to_string()
    }

    /// Decode the current parameters into the canonical trip model.
    pub fn load(&self) -> TripQuery {
        TripQuery::from_params(&self.params)
    }

    /// Number of destination slots the form is showing.
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// The form grew or shrank without touching the URL (e.g. a new, still
    /// empty waypoint). Never drops below two slots.
    pub fn set_slot_count(&mut self, slots: usize) {
        self.slots = slots.max(2);
    }

    /// Replace the whole destination list.
    pub fn set_destinations<S: AsRef<str>>(&mut self, destinations: &[S]) {
        let mut list: Vec<String> = destinations.iter().map(|d| d.as_ref().to_string()).collect();
        while list.len() < 2 {
            list.push(String::new());
        }
        self.slots = list.len();
        self.write_destinations(&list);
    }

    /// Upsert the city at `index`.
    ///
    /// When the stored list already has as many entries as the form has
    /// slots, this overwrites by index. When it is shorter, the missing
    /// entries are waypoints the URL has not seen yet: empty entries are
    /// inserted just before the final stop until the counts match, and then
    /// the write lands at `index`. The final stop stays last either way.
    pub fn set_destination(&mut self, index: usize, city: &str) -> Result<(), StateError> {
        let mut list = self.materialized();
        if index >= list.len() {
            return Err(StateError::OutOfRange {
                index,
                len: list.len(),
            });
        }
        list[index] = city.to_string();
        self.write_destinations(&list);
        Ok(())
    }

    /// Remove the waypoint at `index`, closing the gap.
    ///
    /// The origin (index 0) and the final stop are fixed slots.
    pub fn remove_destination(&mut self, index: usize) -> Result<(), StateError> {
        let mut list = self.materialized();
        if index >= list.len() {
            return Err(StateError::OutOfRange {
                index,
                len: list.len(),
            });
        }
        if index == 0 || index == list.len() - 1 {
            return Err(StateError::FixedSlot(index));
        }
        list.remove(index);
        self.slots = list.len();
        self.write_destinations(&list);
        Ok(())
    }

    pub fn set_passengers(&mut self, count: u32) {
        self.params.set(PASSENGERS_KEY, count.max(1).to_string());
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        match date {
            Some(date) => self.params.set(DATE_KEY, format_date_param(date)),
            None => self.params.remove(DATE_KEY),
        }
    }

    /// Drop a trip parameter from the URL.
    pub fn clear(&mut self, key: QueryKey) {
        self.params.remove(key.as_str());
    }

    /// Stored destinations padded to the slot count.
    fn materialized(&self) -> Vec<String> {
        let mut list = self.load().destinations;
        while list.len() < self.slots {
            let last = list.len() - 1;
            list.insert(last, String::new());
        }
        list
    }

    fn write_destinations(&mut self, list: &[String]) {
        self.params.set(DESTINATIONS_KEY, join_destinations(list));
        self.slots = self.slots.max(list.len());
    }
}
