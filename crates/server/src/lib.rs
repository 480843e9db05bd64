//! EveryCheese: a catalogue of cheeses served over HTTP.

pub mod api;
pub mod auth;
pub mod cheese;
pub mod config;
pub mod db;
pub mod supervisor;
pub mod validation;

pub mod test_helpers;
