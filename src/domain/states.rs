//! Proposal status workflow definitions
//!
//! The happy path runs
//! observacao → analise → assinatura_proposta → aguar_selecao_vigencia →
//! aguar_vigencia → assinatura_ds → aguar_pagamento → implantado.
//! Every non-terminal step may also go to pendencia or declinado, and
//! pendencia returns to observacao or analise.

use crate::schemas::ProposalStatus;

/// States with no outgoing transitions
pub const TERMINAL_STATES: &[ProposalStatus] = &[
    ProposalStatus::Implantado,
    ProposalStatus::Expirado,
    ProposalStatus::Declinado,
];

/// Parse a raw status string, falling back to `observacao`.
///
/// Only the exact wire identifiers match; this never fails.
pub fn parse_status(raw: &str) -> ProposalStatus {
    raw.parse().unwrap_or_default()
}

/// Returns the statuses a proposal may move to from `status`.
///
/// Terminal states return an empty slice.
pub fn next_possible(status: ProposalStatus) -> &'static [ProposalStatus] {
    use ProposalStatus::*;

    match status {
        Observacao => &[Analise, Pendencia, Declinado],
        Analise => &[AssinaturaProposta, Pendencia, Declinado],
        AssinaturaProposta => &[AguarSelecaoVigencia, Pendencia, Declinado],
        AguarSelecaoVigencia => &[AguarVigencia, Pendencia, Declinado],
        AguarVigencia => &[AssinaturaDs, Pendencia, Declinado],
        AssinaturaDs => &[AguarPagamento, Pendencia, Declinado],
        AguarPagamento => &[Implantado, Pendencia, Declinado],
        Pendencia => &[Observacao, Analise, Declinado],
        Declinado | Expirado | Implantado => &[],
    }
}

/// Like [`next_possible`], for a raw identifier.
///
/// Unknown identifiers have no transitions rather than being read as
/// `observacao`.
pub fn next_possible_for(raw: &str) -> &'static [ProposalStatus] {
    match raw.parse::<ProposalStatus>() {
        Ok(status) => next_possible(status),
        Err(_) => &[],
    }
}

/// Check if a status is terminal (implantado, expirado or declinado).
pub fn is_final(status: ProposalStatus) -> bool {
    TERMINAL_STATES.contains(&status)
}

/// Check if the transition table has an edge from `from` to `to`.
pub fn can_transition(from: ProposalStatus, to: ProposalStatus) -> bool {
    next_possible(from).contains(&to)
}
