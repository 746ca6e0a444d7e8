//! Abmix - completion tracking and status workflow for benefits proposals
//!
//! This library provides the core the Abmix portals share:
//! - Schema definitions for proposals, persons and scoring config
//! - Progress scoring with missing-field reporting
//! - The proposal status vocabulary and transition table
//! - A status registry with validated writes and change listeners

pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;

// Re-export commonly used types
pub use domain::{
    progress_details, score_proposal, ProgressDetails, ProposalScore, StatusRegistry,
};
pub use errors::{AbmixError, Result};
pub use schemas::{PersonRecord, ProposalRecord, ProposalStatus, ScoringConfig, Sex};
