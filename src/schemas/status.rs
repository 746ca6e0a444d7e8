//! Proposal lifecycle status

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle stage of a benefits proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Freshly submitted, under observation
    #[default]
    Observacao,
    /// Under analysis
    Analise,
    /// Waiting for the proposal signature
    AssinaturaProposta,
    /// Waiting for the client to pick a coverage start date
    AguarSelecaoVigencia,
    /// Waiting for the coverage start date
    AguarVigencia,
    /// Waiting for the health declaration signature
    AssinaturaDs,
    /// Waiting for payment
    AguarPagamento,
    /// Implemented and approved
    Implantado,
    /// Blocked on a pending issue
    Pendencia,
    /// Declined
    Declinado,
    /// Expired
    Expirado,
}

impl ProposalStatus {
    /// Every status, in workflow order.
    pub const ALL: [ProposalStatus; 11] = [
        ProposalStatus::Observacao,
        ProposalStatus::Analise,
        ProposalStatus::AssinaturaProposta,
        ProposalStatus::AguarSelecaoVigencia,
        ProposalStatus::AguarVigencia,
        ProposalStatus::AssinaturaDs,
        ProposalStatus::AguarPagamento,
        ProposalStatus::Implantado,
        ProposalStatus::Pendencia,
        ProposalStatus::Declinado,
        ProposalStatus::Expirado,
    ];

    /// Wire identifier, as stored by the portal
    pub fn identifier(self) -> &'static str {
        match self {
            ProposalStatus::Observacao => "observacao",
            ProposalStatus::Analise => "analise",
            ProposalStatus::AssinaturaProposta => "assinatura_proposta",
            ProposalStatus::AguarSelecaoVigencia => "aguar_selecao_vigencia",
            ProposalStatus::AguarVigencia => "aguar_vigencia",
            ProposalStatus::AssinaturaDs => "assinatura_ds",
            ProposalStatus::AguarPagamento => "aguar_pagamento",
            ProposalStatus::Implantado => "implantado",
            ProposalStatus::Pendencia => "pendencia",
            ProposalStatus::Declinado => "declinado",
            ProposalStatus::Expirado => "expirado",
        }
    }

    /// Display label shown on status badges
    pub fn label(self) -> &'static str {
        match self {
            ProposalStatus::Observacao => "OBSERVAÇÃO",
            ProposalStatus::Analise => "ANÁLISE",
            ProposalStatus::AssinaturaProposta => "ASSINATURA PROPOSTA",
            ProposalStatus::AguarSelecaoVigencia => "AGUARDANDO SELEÇÃO VIGÊNCIA",
            ProposalStatus::AguarVigencia => "AGUARDANDO VIGÊNCIA",
            ProposalStatus::AssinaturaDs => "ASSINATURA DS",
            ProposalStatus::AguarPagamento => "AGUARDANDO PAGAMENTO",
            ProposalStatus::Implantado => "IMPLANTADO",
            ProposalStatus::Pendencia => "PENDÊNCIA",
            ProposalStatus::Declinado => "DECLINADO",
            ProposalStatus::Expirado => "EXPIRADO",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProposalStatus::Observacao => "Proposta em observação inicial",
            ProposalStatus::Analise => "Proposta em análise pela equipe",
            ProposalStatus::AssinaturaProposta => "Aguardando assinatura da proposta",
            ProposalStatus::AguarSelecaoVigencia => "Aguardando seleção da data de vigência",
            ProposalStatus::AguarVigencia => "Aguardando início da vigência",
            ProposalStatus::AssinaturaDs => "Aguardando assinatura da declaração de saúde",
            ProposalStatus::AguarPagamento => "Aguardando confirmação do pagamento",
            ProposalStatus::Implantado => "Proposta implantada com sucesso",
            ProposalStatus::Pendencia => "Proposta com pendências a resolver",
            ProposalStatus::Declinado => "Proposta declinada",
            ProposalStatus::Expirado => "Proposta expirada",
        }
    }

    /// Badge color as a hex string
    pub fn color(self) -> &'static str {
        match self {
            ProposalStatus::Observacao => "#6b7280",
            ProposalStatus::Analise => "#3b82f6",
            ProposalStatus::AssinaturaProposta => "#8b5cf6",
            ProposalStatus::AguarSelecaoVigencia => "#06b6d4",
            ProposalStatus::AguarVigencia => "#0ea5e9",
            ProposalStatus::AssinaturaDs => "#a855f7",
            ProposalStatus::AguarPagamento => "#f59e0b",
            ProposalStatus::Implantado => "#22c55e",
            ProposalStatus::Pendencia => "#f97316",
            ProposalStatus::Declinado => "#ef4444",
            ProposalStatus::Expirado => "#991b1b",
        }
    }

    /// 1-based position in the workflow
    pub fn order(self) -> usize {
        ProposalStatus::ALL
            .iter()
            .position(|&s| s == self)
            .map(|index| index + 1)
            .unwrap_or(ProposalStatus::ALL.len())
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

impl std::str::FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProposalStatus::ALL
            .iter()
            .copied()
            .find(|status| status.identifier() == s)
            .ok_or_else(|| format!("Unknown proposal status: {}", s))
    }
}

// Unknown or non-string values fall back to the default status.
impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }
}
