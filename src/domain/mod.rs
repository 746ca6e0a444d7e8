//! Domain logic for proposal status and completion progress

mod fields;
mod progress;
mod registry;
mod states;
mod transitions;


pub use fields::{
    field_label, missing_fields, required_fields, RequiredField, DEPENDENT_FIELDS, TITULAR_FIELDS,
};
pub use progress::{
    progress_details, score_person, score_proposal, score_proposal_with, ColorBand,
    ProgressDetails, ProposalScore,
};
pub use registry::{
    Listener, ListenerFailure, ListenerResult, Notification, StatusChange, StatusRegistry,
};
pub use states::{
    can_transition, is_final, next_possible, next_possible_for, parse_status, TERMINAL_STATES,
};
pub use transitions::{apply_status_transition, validate_transition};
