pub mod app;
pub mod city_input;
pub mod error_view;
pub mod home;
pub mod results;
pub mod trip_state;
