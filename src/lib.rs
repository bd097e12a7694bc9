//! A personal budget tracker: set a total, record expenses against it, and see what is left.
//!
//! The ledger lives in `model::Budget`. A `session::Session` owns one ledger together with the
//! `store::Persistence` that it is saved to after every change. The `commands` are what the `budget`
//! binary runs.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod input;
pub mod model;
pub mod session;
pub mod store;
pub mod view;
mod utils;


pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
