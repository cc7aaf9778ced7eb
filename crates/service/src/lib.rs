//! Domain services for the listing and trivia APIs.
//!
//! Handlers stay thin; everything that touches the database or shapes a
//! response payload lives here, as free async functions over a
//! `DatabaseConnection`.

pub mod artists;
pub mod categories;
pub mod errors;
pub mod questions;
pub mod quiz;
pub mod shows;
pub mod venues;

#[cfg(test)]
pub mod test_support;
