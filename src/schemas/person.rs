//! Person schema - a titular or one of their dependents

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lenient;

/// Sex as captured on the enrollment form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    /// Not chosen yet; counts as an empty field
    #[default]
    Unset,
}

impl Sex {
    /// Stored form, or `None` while unset
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Sex::Male => Some("masculino"),
            Sex::Female => Some("feminino"),
            Sex::Unset => None,
        }
    }
}

impl Serialize for Sex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str().unwrap_or(""))
    }
}

impl<'de> Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = lenient::text(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_lowercase().as_str() {
            "masculino" | "male" | "m" => Sex::Male,
            "feminino" | "female" | "f" => Sex::Female,
            _ => Sex::Unset,
        })
    }
}

/// One insured person on a proposal.
///
/// Whether the record is a titular or a dependent is decided by the
/// collection holding it; `relationship` only matters for dependents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "nomeCompleto", default, deserialize_with = "lenient::text")]
    pub full_name: Option<String>,

    /// CPF
    #[serde(rename = "cpf", default, deserialize_with = "lenient::text")]
    pub tax_id: Option<String>,

    /// RG
    #[serde(rename = "rg", default, deserialize_with = "lenient::text")]
    pub id_number: Option<String>,

    #[serde(rename = "dataNascimento", default, deserialize_with = "lenient::text")]
    pub birth_date: Option<String>,

    /// Relationship to the titular (dependents only)
    #[serde(rename = "parentesco", default, deserialize_with = "lenient::text")]
    pub relationship: Option<String>,

    #[serde(rename = "nomeMae", default, deserialize_with = "lenient::text")]
    pub mother_name: Option<String>,

    #[serde(rename = "sexo", default)]
    pub sex: Sex,

    #[serde(rename = "estadoCivil", default, deserialize_with = "lenient::text")]
    pub marital_status: Option<String>,

    #[serde(rename = "peso", default, deserialize_with = "lenient::text")]
    pub weight: Option<String>,

    #[serde(rename = "altura", default, deserialize_with = "lenient::text")]
    pub height: Option<String>,

    #[serde(rename = "emailPessoal", default, deserialize_with = "lenient::text")]
    pub personal_email: Option<String>,

    #[serde(rename = "telefonePessoal", default, deserialize_with = "lenient::text")]
    pub personal_phone: Option<String>,

    #[serde(rename = "emailEmpresa", default, deserialize_with = "lenient::text")]
    pub company_email: Option<String>,

    #[serde(rename = "telefoneEmpresa", default, deserialize_with = "lenient::text")]
    pub company_phone: Option<String>,

    /// CEP
    #[serde(rename = "cep", default, deserialize_with = "lenient::text")]
    pub postal_code: Option<String>,

    #[serde(rename = "enderecoCompleto", default, deserialize_with = "lenient::text")]
    pub full_address: Option<String>,

    /// Bank details for reimbursements
    #[serde(rename = "dadosReembolso", default, deserialize_with = "lenient::text")]
    pub reimbursement_account: Option<String>,
}

impl PersonRecord {
    /// Create a record holding only a name
    pub fn new(full_name: impl Into<String>) -> Self {
        PersonRecord {
            full_name: Some(full_name.into()),
            ..Default::default()
        }
    }

    /// Return a new record with the given relationship
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}
