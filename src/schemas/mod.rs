//! Schema types for abmix
//!
//! All types deserialize from the JSON the portal stores, and tolerate the
//! loosely typed values that JSON tends to accumulate.

mod config;
mod lenient;
mod person;
mod proposal;
mod status;

pub use config::ScoringConfig;
pub use person::{PersonRecord, Sex};
pub use proposal::ProposalRecord;
pub use status::ProposalStatus;
