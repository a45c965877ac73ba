use std::rc::Rc;

use chrono::NaiveDate;
use dioxus::prelude::*;

use trip_common::directory::StaticCityDirectory;
use trip_common::form::{FieldId, TripForm};
use trip_common::settings::Settings;
use trip_common::store::QueryParamStore;

/// The trip form together with the URL parameters it mirrors.
///
/// Components mutate through these methods only, so the form and the query
/// string never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct TripState {
    pub store: QueryParamStore,
    pub form: TripForm,
}

impl TripState {
    pub fn from_query(query: &str) -> Self {
        let store = QueryParamStore::from_query(query);
        let form = TripForm::mount(&store);
        Self { store, form }
    }

    pub fn query_string(&self) -> String {
        self.store.query_string()
    }

    pub fn add_destination(&mut self) -> FieldId {
        self.form.add_destination(&mut self.store)
    }

    pub fn remove_destination(&mut self, id: FieldId) {
        if let Err(e) = self.form.remove_destination(id, &mut self.store) {
            tracing::warn!("Cannot remove {id}: {e}");
        }
    }

    pub fn select_city(&mut self, id: FieldId, city: &str) {
        if let Err(e) = self.form.select_city(id, city, &mut self.store) {
            tracing::warn!("Cannot set {id} to {city}: {e}");
        }
    }

    pub fn clear_city(&mut self, id: FieldId) {
        if let Err(e) = self.form.clear_city(id, &mut self.store) {
            tracing::warn!("Cannot clear {id}: {e}");
        }
    }

    pub fn increment_passengers(&mut self) {
        self.form.increment_passengers(&mut self.store);
    }

    pub fn decrement_passengers(&mut self) {
        self.form.decrement_passengers(&mut self.store);
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.form.set_date(date, &mut self.store);
    }

    pub fn validate(&mut self, directory: &StaticCityDirectory, settings: &Settings) -> bool {
        self.form.validate(directory, settings)
    }
}

pub fn use_settings() -> Settings {
    use_context::<Settings>()
}

pub fn use_directory() -> Rc<StaticCityDirectory> {
    use_context::<Rc<StaticCityDirectory>>()
}
