pub mod db;
pub mod forms;
pub mod models;
pub mod templates;
pub mod views;

pub use forms::{CheeseForm, CheeseInput, FieldErrors};
pub use models::{Cheese, CheeseChanges, Firmness, NewCheese};
