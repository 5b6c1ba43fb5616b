pub mod api;
pub mod binding;
pub mod config;
pub mod errors;
pub mod form;
pub mod query;
pub mod ui;
pub mod views;
