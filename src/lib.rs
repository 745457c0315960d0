//! # Rift Compare
//!
//! Side-by-side comparison of two League of Legends players from the Riot
//! Games API.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (regions, identities, standings, match records)
//! - **fetch**: HTTP transport and the shared request budget
//! - **riot**: Riot API endpoints and response decoding
//! - **pipeline**: Identity, standing, history, and match detail stages
//! - **calculate**: Win rate and KDA computation
//! - **report**: Aggregation and text/JSON rendering
//! - **prompt**: Interactive player input
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod riot;

pub use models::*;
