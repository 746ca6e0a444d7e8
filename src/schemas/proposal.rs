//! Proposal schema - the aggregate the portals fill in

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::{PersonRecord, ProposalStatus};

/// A client's benefits proposal as seen by the progress calculator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    /// Primary insured persons
    #[serde(default, deserialize_with = "lenient::seq")]
    pub titulares: Vec<PersonRecord>,

    #[serde(default, deserialize_with = "lenient::seq")]
    pub dependentes: Vec<PersonRecord>,

    /// Client-uploaded documents; only their count matters here
    #[serde(default, deserialize_with = "lenient::seq")]
    pub client_attachments: Vec<Value>,

    #[serde(default)]
    pub status: ProposalStatus,
}

impl ProposalRecord {
    /// Create an empty proposal in the default status
    pub fn new() -> Self {
        Self::default()
    }

    /// A proposal is complete once it has been implemented
    pub fn is_complete(&self) -> bool {
        self.status == ProposalStatus::Implantado
    }

    pub fn has_attachments(&self) -> bool {
        !self.client_attachments.is_empty()
    }

    /// Return a new proposal with the given status
    pub fn with_status(mut self, status: ProposalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_titular(mut self, person: PersonRecord) -> Self {
        self.titulares.push(person);
        self
    }

    pub fn with_dependente(mut self, person: PersonRecord) -> Self {
        self.dependentes.push(person);
        self
    }

    pub fn with_attachment(mut self, attachment: Value) -> Self {
        self.client_attachments.push(attachment);
        self
    }
}
