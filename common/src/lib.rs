mod cities;
pub mod directory;
pub mod error;
pub mod form;
pub mod location;
pub mod query;
pub mod results;
pub mod route;
pub mod search;
pub mod settings;
pub mod store;
