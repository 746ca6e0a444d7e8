//! Required-field catalogue for person records

use crate::schemas::PersonRecord;

/// A field that counts towards a person's completion score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    FullName,
    TaxId,
    IdNumber,
    BirthDate,
    Relationship,
    MotherName,
    Sex,
    MaritalStatus,
    Weight,
    Height,
    PersonalEmail,
    PersonalPhone,
    FullAddress,
}

/// Required fields for a titular, in display order
pub const TITULAR_FIELDS: &[RequiredField] = &[
    RequiredField::FullName,
    RequiredField::TaxId,
    RequiredField::IdNumber,
    RequiredField::BirthDate,
    RequiredField::MotherName,
    RequiredField::Sex,
    RequiredField::MaritalStatus,
    RequiredField::Weight,
    RequiredField::Height,
    RequiredField::PersonalEmail,
    RequiredField::PersonalPhone,
    RequiredField::FullAddress,
];

/// Required fields for a dependent: the titular set plus the relationship
pub const DEPENDENT_FIELDS: &[RequiredField] = &[
    RequiredField::FullName,
    RequiredField::TaxId,
    RequiredField::IdNumber,
    RequiredField::BirthDate,
    RequiredField::Relationship,
    RequiredField::MotherName,
    RequiredField::Sex,
    RequiredField::MaritalStatus,
    RequiredField::Weight,
    RequiredField::Height,
    RequiredField::PersonalEmail,
    RequiredField::PersonalPhone,
    RequiredField::FullAddress,
];

/// Labels for every person field the portal knows, required or not
const FIELD_LABELS: &[(&str, &str)] = &[
    ("nomeCompleto", "Nome Completo"),
    ("cpf", "CPF"),
    ("rg", "RG"),
    ("dataNascimento", "Data de Nascimento"),
    ("parentesco", "Parentesco"),
    ("nomeMae", "Nome da Mãe"),
    ("sexo", "Sexo"),
    ("estadoCivil", "Estado Civil"),
    ("peso", "Peso"),
    ("altura", "Altura"),
    ("emailPessoal", "Email Pessoal"),
    ("telefonePessoal", "Telefone Pessoal"),
    ("emailEmpresa", "Email Empresa"),
    ("telefoneEmpresa", "Telefone Empresa"),
    ("cep", "CEP"),
    ("enderecoCompleto", "Endereço Completo"),
    ("dadosReembolso", "Dados para Reembolso"),
];

impl RequiredField {
    /// JSON key of the field on a person record
    pub fn identifier(self) -> &'static str {
        match self {
            RequiredField::FullName => "nomeCompleto",
            RequiredField::TaxId => "cpf",
            RequiredField::IdNumber => "rg",
            RequiredField::BirthDate => "dataNascimento",
            RequiredField::Relationship => "parentesco",
            RequiredField::MotherName => "nomeMae",
            RequiredField::Sex => "sexo",
            RequiredField::MaritalStatus => "estadoCivil",
            RequiredField::Weight => "peso",
            RequiredField::Height => "altura",
            RequiredField::PersonalEmail => "emailPessoal",
            RequiredField::PersonalPhone => "telefonePessoal",
            RequiredField::FullAddress => "enderecoCompleto",
        }
    }

    /// Human-readable label, e.g. "Nome Completo"
    pub fn label(self) -> String {
        field_label(self.identifier())
    }

    /// True when the person has a value here that is not blank after trimming
    pub fn is_filled(self, person: &PersonRecord) -> bool {
        let value = match self {
            RequiredField::FullName => person.full_name.as_deref(),
            RequiredField::TaxId => person.tax_id.as_deref(),
            RequiredField::IdNumber => person.id_number.as_deref(),
            RequiredField::BirthDate => person.birth_date.as_deref(),
            RequiredField::Relationship => person.relationship.as_deref(),
            RequiredField::MotherName => person.mother_name.as_deref(),
            RequiredField::Sex => person.sex.as_str(),
            RequiredField::MaritalStatus => person.marital_status.as_deref(),
            RequiredField::Weight => person.weight.as_deref(),
            RequiredField::Height => person.height.as_deref(),
            RequiredField::PersonalEmail => person.personal_email.as_deref(),
            RequiredField::PersonalPhone => person.personal_phone.as_deref(),
            RequiredField::FullAddress => person.full_address.as_deref(),
        };
        value.is_some_and(|v| !v.trim().is_empty())
    }
}

/// The required fields for a titular or a dependent.
pub fn required_fields(is_titular: bool) -> &'static [RequiredField] {
    if is_titular {
        TITULAR_FIELDS
    } else {
        DEPENDENT_FIELDS
    }
}

/// Required fields the person has not filled in, in catalogue order.
pub fn missing_fields(person: &PersonRecord, is_titular: bool) -> Vec<RequiredField> {
    required_fields(is_titular)
        .iter()
        .copied()
        .filter(|field| !field.is_filled(person))
        .collect()
}

/// Human-readable label for a field identifier.
///
/// Unknown identifiers are returned unchanged.
pub fn field_label(identifier: &str) -> String {
    FIELD_LABELS
        .iter()
        .find(|(key, _)| *key == identifier)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| identifier.to_string())
}
