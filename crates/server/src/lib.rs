//! HTTP layer for the two services: the venue and artist listing API and
//! the trivia quiz API. Each gets its own router and binary entry point;
//! state, errors and metrics are shared.

pub mod errors;
pub mod observability;
pub mod routes;
pub mod startup;

pub use startup::{run_fyyur, run_trivia};
