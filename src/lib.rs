//! bookdash
//!
//! TUI dashboard for browsing, sorting and exporting an Open Library reading
//! log, enriched with author, rating and subject lookups.
//!
//! Follows a Pure Core / Impure Shell split: `model` and `projection` are pure,
//! `state` holds the screen state, and `auth`, `catalog`, `enrich` and `view`
//! talk to the network and the terminal.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod enrich;
pub mod logging;
pub mod model;
pub mod projection;
pub mod state;
pub mod view;
