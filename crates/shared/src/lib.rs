//! Domain types and error taxonomy shared by the opportunity board crates.

pub mod domain;
pub mod error;
pub mod timestamp;

pub use domain::{Opportunity, OpportunityId, Snapshot, Status};
pub use error::BoardError;
