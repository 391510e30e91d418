//! Roster: Team Member Record Table
//!
//! A record table that lets a user add, filter, bulk-select, and delete team
//! member records, persisted as one JSON array in local key-value storage.

pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod selection;
pub mod session;
pub mod store;
pub mod tooling;
pub mod types;
pub mod views;
