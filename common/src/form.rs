use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::directory::CityDirectory;
use crate::error::{StateError, ValidationError};
use crate::settings::Settings;
use crate::store::QueryParamStore;

/// Identity of a destination input, independent of where it sits in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destination-{}", self.0)
    }
}

/// What a position in the destination list means for the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    Origin,
    Waypoint,
    FinalDestination,
}

impl FieldRole {
    pub fn label(self) -> &'static str {
        match self {
            FieldRole::Origin => "City of origin",
            FieldRole::Waypoint | FieldRole::FinalDestination => "City of destination",
        }
    }

    /// Only waypoints can be removed.
    pub fn removable(self) -> bool {
        self == FieldRole::Waypoint
    }
}

/// One destination input in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationField {
    pub id: FieldId,
    pub value: String,
    /// Inline error shown under this field only.
    pub error: Option<ValidationError>,
}

/// In-memory model of the trip form.
///
/// Every mutation is mirrored into the [`QueryParamStore`] passed alongside,
/// so the URL never lags behind what the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripForm {
    fields: Vec<DestinationField>,
    passengers: u32,
    date: Option<NaiveDate>,
    next_field_id: u32,
}

impl TripForm {
    /// Build the form from whatever the URL currently holds.
    pub fn mount(store: &QueryParamStore) -> Self {
        let trip = store.load();
        let mut form = Self {
            fields: Vec::with_capacity(trip.destinations.len()),
            passengers: trip.passengers,
            date: trip.date,
            next_field_id: 1,
        };
        for value in trip.destinations {
            let id = form.next_id();
            form.fields.push(DestinationField {
                id,
                value,
                error: None,
            });
        }
        form
    }

    pub fn fields(&self) -> &[DestinationField] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&DestinationField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn role(&self, id: FieldId) -> Option<FieldRole> {
        let idx = self.position(id)?;
        Some(if idx == 0 {
            FieldRole::Origin
        } else if idx == self.fields.len() - 1 {
            FieldRole::FinalDestination
        } else {
            FieldRole::Waypoint
        })
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn destinations(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.value.clone()).collect()
    }

    /// Insert an empty waypoint just before the final destination.
    pub fn add_destination(&mut self, store: &mut QueryParamStore) -> FieldId {
        let id = self.next_id();
        let at = self.fields.len() - 1;
        self.fields.insert(
            at,
            DestinationField {
                id,
                value: String::new(),
                error: None,
            },
        );
        store.set_slot_count(self.fields.len());
        id
    }

    pub fn remove_destination(
        &mut self,
        id: FieldId,
        store: &mut QueryParamStore,
    ) -> Result<(), StateError> {
        let idx = self.index_of(id)?;
        store.set_slot_count(self.fields.len());
        store.remove_destination(idx)?;
        self.fields.remove(idx);
        Ok(())
    }

    /// The user picked `city` from the dropdown for field `id`.
    pub fn select_city(
        &mut self,
        id: FieldId,
        city: &str,
        store: &mut QueryParamStore,
    ) -> Result<(), StateError> {
        let idx = self.index_of(id)?;
        store.set_slot_count(self.fields.len());
        store.set_destination(idx, city)?;
        let field = &mut self.fields[idx];
        field.value = city.to_string();
        field.error = None;
        Ok(())
    }

    /// The user cleared field `id`. Returns the inline message to show.
    pub fn clear_city(
        &mut self,
        id: FieldId,
        store: &mut QueryParamStore,
    ) -> Result<ValidationError, StateError> {
        let idx = self.index_of(id)?;
        store.set_slot_count(self.fields.len());
        store.set_destination(idx, "")?;
        let field = &mut self.fields[idx];
        field.value.clear();
        field.error = Some(ValidationError::Empty);
        Ok(ValidationError::Empty)
    }

    pub fn can_decrement_passengers(&self) -> bool {
        self.passengers > 1
    }

    pub fn increment_passengers(&mut self, store: &mut QueryParamStore) {
        self.passengers = self.passengers.saturating_add(1);
        store.set_passengers(self.passengers);
    }

    /// Returns `false` (and changes nothing) when already at one passenger.
    pub fn decrement_passengers(&mut self, store: &mut QueryParamStore) -> bool {
        if !self.can_decrement_passengers() {
            return false;
        }
        self.passengers -= 1;
        store.set_passengers(self.passengers);
        true
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>, store: &mut QueryParamStore) {
        self.date = date;
        store.set_date(date);
    }

    /// Check every destination field, recording errors inline.
    ///
    /// Returns `true` when the form may be submitted.
    pub fn validate<D: CityDirectory>(&mut self, directory: &D, settings: &Settings) -> bool {
        let mut ok = true;
        for field in &mut self.fields {
            field.error = validate_city(&field.value, directory, settings).err();
            ok &= field.error.is_none();
        }
        ok
    }

    fn index_of(&self, id: FieldId) -> Result<usize, StateError> {
        self.position(id).ok_or(StateError::UnknownField(id.0))
    }

    fn next_id(&mut self) -> FieldId {
        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;
        id
    }
}

/// Field-level check of a single destination value.
pub fn validate_city<D: CityDirectory>(
    value: &str,
    directory: &D,
    settings: &Settings,
) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty);
    }
    if settings.is_sentinel(value) {
        return Err(ValidationError::Unavailable(value.to_string()));
    }
    if directory.resolve(value).is_none() {
        return Err(ValidationError::UnknownCity(value.to_string()));
    }
    Ok(())
}
