//! Proposal completion scoring
//!
//! Every call recomputes from the record it is given; nothing is cached.
//! Sub-scores for empty collections drop out of the weighted average
//! instead of counting as zero.

use serde::Serialize;

use crate::schemas::{PersonRecord, ProposalRecord, ProposalStatus, ScoringConfig};

use super::fields::{missing_fields, required_fields};

/// Score breakdown for one proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalScore {
    /// Final percentage, 0-100
    pub overall: u8,
    pub titulares_score: u8,
    pub dependentes_score: u8,
    pub attachments_score: u8,
    /// True only for implemented proposals
    pub completed: bool,
}

impl ProposalScore {
    fn implemented() -> Self {
        ProposalScore {
            overall: 100,
            titulares_score: 100,
            dependentes_score: 100,
            attachments_score: 100,
            completed: true,
        }
    }
}

/// Display band for a progress percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

impl ColorBand {
    /// Band for a percentage
    pub fn for_progress(progress: u8) -> Self {
        match progress {
            100.. => ColorBand::Green,
            75..=99 => ColorBand::Blue,
            50..=74 => ColorBand::Yellow,
            25..=49 => ColorBand::Orange,
            _ => ColorBand::Red,
        }
    }

    /// Status text shown next to the progress bar
    pub fn text(self) -> &'static str {
        match self {
            ColorBand::Green => "Completo",
            ColorBand::Blue => "Quase Completo",
            ColorBand::Yellow => "Em Andamento",
            ColorBand::Orange => "Iniciado",
            ColorBand::Red => "Pendente",
        }
    }

    /// Tailwind background class used by the progress bar
    pub fn css_class(self) -> &'static str {
        match self {
            ColorBand::Green => "bg-green-500",
            ColorBand::Blue => "bg-blue-500",
            ColorBand::Yellow => "bg-yellow-500",
            ColorBand::Orange => "bg-orange-500",
            ColorBand::Red => "bg-red-500",
        }
    }
}

/// Progress summary with a per-person list of what is still missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDetails {
    pub progress: u8,
    pub color_band: ColorBand,
    pub status_text: &'static str,
    pub missing_fields_count: usize,
    /// 12 per titular plus 13 per dependent
    pub total_required_fields: usize,
    /// Entries like "Titular 1: Nome Completo"
    pub missing_fields: Vec<String>,
}

/// Percentage of a person's required fields that are filled in.
pub fn score_person(person: &PersonRecord, is_titular: bool) -> u8 {
    let required = required_fields(is_titular);
    let filled = required.iter().filter(|field| field.is_filled(person)).count();
    round_ratio(filled as u128 * 100, required.len() as u128) as u8
}

/// Score a proposal with the default weights and ceiling.
pub fn score_proposal(proposal: &ProposalRecord) -> ProposalScore {
    score_proposal_with(proposal, &ScoringConfig::default())
}

/// Score a proposal.
///
/// Implemented proposals always score 100. Otherwise the overall score is
/// the weighted mean of the sub-scores whose collections are non-empty
/// (attachments always count), capped at `config.pre_approval_ceiling`.
/// The mean is computed exactly and rounded once, halves up.
pub fn score_proposal_with(proposal: &ProposalRecord, config: &ScoringConfig) -> ProposalScore {
    if proposal.status == ProposalStatus::Implantado {
        return ProposalScore::implemented();
    }

    let (titulares_total, titulares_count) = sum_scores(&proposal.titulares, true);
    let (dependentes_total, dependentes_count) = sum_scores(&proposal.dependentes, false);
    let attachments: u128 = if proposal.has_attachments() { 100 } else { 0 };

    // Means are total / count; scaling every term by the product of the
    // counts keeps the weighted mean an exact ratio of integers.
    let titulares_den = titulares_count.max(1);
    let dependentes_den = dependentes_count.max(1);
    let scale = titulares_den * dependentes_den;

    let attachment_weight = basis_points(config.attachment_weight);
    let mut weighted = attachment_weight * attachments * scale;
    let mut applied = attachment_weight;
    if titulares_count > 0 {
        let weight = basis_points(config.titular_weight);
        weighted += weight * titulares_total * dependentes_den;
        applied += weight;
    }
    if dependentes_count > 0 {
        let weight = basis_points(config.dependent_weight);
        weighted += weight * dependentes_total * titulares_den;
        applied += weight;
    }

    let raw = if applied > 0 {
        round_ratio(weighted, applied * scale)
    } else {
        0
    };
    let overall = (raw.min(100) as u8).min(config.pre_approval_ceiling);

    let titulares_score = round_ratio(titulares_total, titulares_den) as u8;
    let dependentes_score = round_ratio(dependentes_total, dependentes_den) as u8;
    let attachments_score = attachments as u8;

    tracing::debug!(
        status = %proposal.status,
        titulares_score,
        dependentes_score,
        attachments_score,
        overall,
        "scored proposal"
    );

    ProposalScore {
        overall,
        titulares_score,
        dependentes_score,
        attachments_score,
        completed: false,
    }
}

/// Overall progress with its display band and the missing-field list.
pub fn progress_details(proposal: &ProposalRecord) -> ProgressDetails {
    let progress = score_proposal(proposal).overall;
    let band = ColorBand::for_progress(progress);

    let groups = [
        ("Titular", &proposal.titulares, true),
        ("Dependente", &proposal.dependentes, false),
    ];

    let mut missing = Vec::new();
    let mut total_required_fields = 0;
    for (prefix, persons, is_titular) in groups {
        for (index, person) in persons.iter().enumerate() {
            total_required_fields += required_fields(is_titular).len();
            missing.extend(
                missing_fields(person, is_titular)
                    .into_iter()
                    .map(|field| format!("{} {}: {}", prefix, index + 1, field.label())),
            );
        }
    }

    ProgressDetails {
        progress,
        color_band: band,
        status_text: band.text(),
        missing_fields_count: missing.len(),
        total_required_fields,
        missing_fields: missing,
    }
}

/// Sum of person scores and the number of persons
fn sum_scores(persons: &[PersonRecord], is_titular: bool) -> (u128, u128) {
    let total = persons
        .iter()
        .map(|person| u128::from(score_person(person, is_titular)))
        .sum();
    (total, persons.len() as u128)
}

/// Weight in ten-thousandths
fn basis_points(weight: f64) -> u128 {
    (weight * 10_000.0).round().max(0.0) as u128
}

/// `num / den` rounded to the nearest integer, halves up. `den` must be non-zero.
fn round_ratio(num: u128, den: u128) -> u128 {
    (2 * num + den) / (2 * den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::{RequiredField, DEPENDENT_FIELDS};
    use crate::schemas::Sex;
    use serde_json::json;

    fn full_titular() -> PersonRecord {
        PersonRecord {
            full_name: Some("Carlos Pereira".into()),
            tax_id: Some("529.982.247-25".into()),
            id_number: Some("12.345.678-9".into()),
            birth_date: Some("1985-07-21".into()),
            mother_name: Some("Helena Pereira".into()),
            sex: Sex::Male,
            marital_status: Some("casado".into()),
            weight: Some("82".into()),
            height: Some("1.78".into()),
            personal_email: Some("carlos@example.com".into()),
            personal_phone: Some("(11) 98765-4321".into()),
            full_address: Some("Av. Paulista, 1000 - São Paulo/SP".into()),
            ..Default::default()
        }
    }

    fn full_dependente() -> PersonRecord {
        full_titular().with_relationship("Filho")
    }

    /// Titular with exactly six required fields filled
    fn half_titular() -> PersonRecord {
        PersonRecord {
            full_name: Some("Carlos Pereira".into()),
            tax_id: Some("529.982.247-25".into()),
            id_number: Some("12.345.678-9".into()),
            birth_date: Some("1985-07-21".into()),
            mother_name: Some("Helena Pereira".into()),
            sex: Sex::Male,
            ..Default::default()
        }
    }

    #[test]
    fn test_score_person_full_and_empty() {
        assert_eq!(score_person(&full_titular(), true), 100);
        assert_eq!(score_person(&full_dependente(), false), 100);
        assert_eq!(score_person(&PersonRecord::default(), true), 0);
        assert_eq!(score_person(&PersonRecord::default(), false), 0);
    }

    #[test]
    fn test_score_person_missing_one_field() {
        let mut titular = full_titular();
        titular.personal_phone = None;
        assert_eq!(score_person(&titular, true), 92);

        let mut dependente = full_dependente();
        dependente.relationship = Some(" ".into());
        assert_eq!(score_person(&dependente, false), 92);
    }

    #[test]
    fn test_full_titular_scored_as_dependent_lacks_relationship() {
        // 12 of 13
        assert_eq!(score_person(&full_titular(), false), 92);
    }

    #[test]
    fn test_optional_fields_do_not_count() {
        let person = PersonRecord {
            company_email: Some("rh@empresa.com".into()),
            company_phone: Some("1133334444".into()),
            postal_code: Some("01310-100".into()),
            reimbursement_account: Some("Banco 001 Ag 1234".into()),
            ..Default::default()
        };
        assert_eq!(score_person(&person, true), 0);
    }

    #[test]
    fn test_implantado_short_circuits() {
        let proposal = ProposalRecord::new().with_status(ProposalStatus::Implantado);
        let score = score_proposal(&proposal);
        assert_eq!(score, ProposalScore::implemented());
        assert_eq!(score.overall, 100);
        assert!(score.completed);
    }

    #[test]
    fn test_single_full_titular_is_capped() {
        let proposal = ProposalRecord::new()
            .with_titular(full_titular())
            .with_attachment(json!({"name": "rg.pdf"}))
            .with_status(ProposalStatus::Analise);

        let score = score_proposal(&proposal);
        assert_eq!(score.titulares_score, 100);
        assert_eq!(score.attachments_score, 100);
        assert_eq!(score.dependentes_score, 0);
        assert_eq!(score.overall, 99);
        assert!(!score.completed);
    }

    #[test]
    fn test_weights_all_applied() {
        let proposal = ProposalRecord::new()
            .with_titular(half_titular())
            .with_dependente(PersonRecord::default());

        let score = score_proposal(&proposal);
        assert_eq!(score.titulares_score, 50);
        assert_eq!(score.dependentes_score, 0);
        assert_eq!(score.attachments_score, 0);
        assert_eq!(score.overall, 35);
    }

    #[test]
    fn test_exact_half_rounds_up() {
        // 17 * 0.7 + 8 * 0.2 = 13.5
        let titular = PersonRecord {
            full_name: Some("Carlos Pereira".into()),
            tax_id: Some("529.982.247-25".into()),
            ..Default::default()
        };
        let dependente = PersonRecord::new("Lia Pereira");
        let proposal = ProposalRecord::new()
            .with_titular(titular)
            .with_dependente(dependente);

        let score = score_proposal(&proposal);
        assert_eq!(score.titulares_score, 17);
        assert_eq!(score.dependentes_score, 8);
        assert_eq!(score.overall, 14);
    }

    #[test]
    fn test_exact_half_after_renormalising() {
        // (92 * 0.7 + 0 * 0.1) / 0.8 = 80.5
        let mut titular = full_titular();
        titular.height = None;
        let proposal = ProposalRecord::new().with_titular(titular);
        assert_eq!(score_proposal(&proposal).overall, 81);
    }

    #[test]
    fn test_titulares_only_renormalises() {
        // (50 * 0.7 + 0 * 0.1) / 0.8 = 43.75
        let proposal = ProposalRecord::new().with_titular(half_titular());
        assert_eq!(score_proposal(&proposal).overall, 44);
    }

    #[test]
    fn test_attachments_only_is_capped() {
        let proposal = ProposalRecord::new().with_attachment(json!("doc-1"));
        assert_eq!(score_proposal(&proposal).overall, 99);
    }

    #[test]
    fn test_empty_proposal_scores_zero() {
        assert_eq!(score_proposal(&ProposalRecord::new()).overall, 0);
    }

    #[test]
    fn test_everything_full_never_reaches_100_before_implantado() {
        let proposal = ProposalRecord::new()
            .with_titular(full_titular())
            .with_dependente(full_dependente())
            .with_attachment(json!("doc"))
            .with_status(ProposalStatus::AguarPagamento);

        let score = score_proposal(&proposal);
        assert_eq!(score.titulares_score, 100);
        assert_eq!(score.dependentes_score, 100);
        assert_eq!(score.attachments_score, 100);
        assert_eq!(score.overall, 99);
    }

    #[test]
    fn test_titulares_are_averaged() {
        let proposal = ProposalRecord::new()
            .with_titular(full_titular())
            .with_titular(half_titular())
            .with_attachment(json!("doc"));

        let score = score_proposal(&proposal);
        assert_eq!(score.titulares_score, 75);
        // (75 * 0.7 + 100 * 0.1) / 0.8 = 78.125
        assert_eq!(score.overall, 78);
    }

    #[test]
    fn test_custom_config() {
        let config = ScoringConfig {
            titular_weight: 1.0,
            dependent_weight: 0.0,
            attachment_weight: 1.0,
            pre_approval_ceiling: 90,
        };
        let proposal = ProposalRecord::new()
            .with_titular(full_titular())
            .with_dependente(PersonRecord::default())
            .with_attachment(json!("doc"));

        assert_eq!(score_proposal_with(&proposal, &config).overall, 90);
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(ColorBand::for_progress(100), ColorBand::Green);
        assert_eq!(ColorBand::for_progress(99), ColorBand::Blue);
        assert_eq!(ColorBand::for_progress(75), ColorBand::Blue);
        assert_eq!(ColorBand::for_progress(74), ColorBand::Yellow);
        assert_eq!(ColorBand::for_progress(50), ColorBand::Yellow);
        assert_eq!(ColorBand::for_progress(49), ColorBand::Orange);
        assert_eq!(ColorBand::for_progress(25), ColorBand::Orange);
        assert_eq!(ColorBand::for_progress(24), ColorBand::Red);
        assert_eq!(ColorBand::for_progress(0), ColorBand::Red);
        assert_eq!(ColorBand::Blue.text(), "Quase Completo");
        assert_eq!(ColorBand::Red.css_class(), "bg-red-500");
    }

    #[test]
    fn test_progress_details_lists_missing_per_person() {
        let mut titular = full_titular();
        titular.weight = None;
        let proposal = ProposalRecord::new()
            .with_titular(titular)
            .with_titular(full_titular())
            .with_dependente(full_dependente())
            .with_dependente(full_titular());

        let details = progress_details(&proposal);
        assert_eq!(details.total_required_fields, 12 * 2 + 13 * 2);
        assert_eq!(
            details.missing_fields,
            vec!["Titular 1: Peso".to_string(), "Dependente 2: Parentesco".to_string()]
        );
        assert_eq!(details.missing_fields_count, 2);
        assert_eq!(details.color_band, ColorBand::Blue);
        assert_eq!(details.status_text, "Quase Completo");
    }

    #[test]
    fn test_progress_details_empty_dependent() {
        let proposal = ProposalRecord::new().with_dependente(PersonRecord::default());
        let details = progress_details(&proposal);

        assert_eq!(details.total_required_fields, 13);
        assert_eq!(details.missing_fields_count, DEPENDENT_FIELDS.len());
        assert_eq!(
            details.missing_fields[0],
            format!("Dependente 1: {}", RequiredField::FullName.label())
        );
        assert_eq!(details.progress, 0);
        assert_eq!(details.status_text, "Pendente");
    }

    #[test]
    fn test_progress_details_implantado() {
        let proposal = ProposalRecord::new()
            .with_titular(PersonRecord::default())
            .with_status(ProposalStatus::Implantado);
        let details = progress_details(&proposal);

        assert_eq!(details.progress, 100);
        assert_eq!(details.color_band, ColorBand::Green);
        assert_eq!(details.status_text, "Completo");
        assert_eq!(details.missing_fields_count, 12);
    }

    #[test]
    fn test_details_serialize_camel_case() {
        let details = progress_details(&ProposalRecord::new());
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["colorBand"], "red");
        assert_eq!(value["statusText"], "Pendente");
        assert_eq!(value["totalRequiredFields"], 0);
    }
}
