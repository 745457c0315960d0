//! Core data models for player comparison.

mod ids;
mod match_record;
mod player;
mod region;
mod report;
mod standing;

pub use ids::*;
pub use match_record::*;
pub use player::*;
pub use region::*;
pub use report::*;
pub use standing::*;

#[cfg(test)]
pub(crate) mod fixtures;
