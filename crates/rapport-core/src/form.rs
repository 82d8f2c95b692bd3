//! Canonical form records: what the wizard edits and the store persists.
//!
//! Every scalar is a plain `String` and every list a plain `Vec`; there is no
//! `Option` anywhere, so a mapped record never carries a null leaf.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::EntityKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Technology {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Competitor {
    pub name: String,
    pub comparison: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    pub title: String,
    pub url: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Leader {
    pub name: String,
    pub role: String,
    pub linkedin_url: String,
}

/// Form record for a CRM client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientFormData {
    pub company: String,
    pub website: String,
    pub industry: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub zip_code: String,
    pub founded: String,
    pub company_size: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub facebook_url: String,
    pub contact_name: String,
    pub primary_email: String,
    pub primary_phone: String,
    pub job_title: String,
    pub preferred_contact_method: String,
    pub short_term_goals: String,
    pub long_term_goals: String,
    pub status: String,
    pub tags: Vec<String>,
    pub description: String,
    pub annual_revenue: String,
    pub employee_count: String,
    pub services: Vec<Service>,
    pub technologies: Vec<Technology>,
    pub blogs: Vec<BlogPost>,
    pub pain_points: Vec<String>,
    pub competitors: Vec<Competitor>,
}

/// Form record for the user's own company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFormData {
    pub company_name: String,
    pub website: String,
    pub industry: String,
    pub description: String,
    pub value_proposition: String,
    pub founded: String,
    pub location: String,
    pub size: String,
    pub mission: String,
    pub vision: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub facebook_url: String,
    pub instagram_url: String,
    pub youtube_url: String,
    pub services: Vec<Service>,
    pub leadership: Vec<Leader>,
    pub blogs: Vec<BlogPost>,
    pub tech_stack: Vec<String>,
    pub partners: Vec<String>,
    pub integrations: Vec<String>,
}

/// The normalized record produced from a selected provider payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum CanonicalFormData {
    Client(ClientFormData),
    Company(CompanyFormData),
}

impl CanonicalFormData {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Client(_) => EntityKind::Client,
            Self::Company(_) => EntityKind::Company,
        }
    }

    pub fn entity_name(&self) -> &str {
        match self {
            Self::Client(c) => &c.company,
            Self::Company(c) => &c.company_name,
        }
    }

    /// Number of top-level fields in this record shape.
    pub fn total_fields(&self) -> usize {
        self.flat().map(|m| m.len()).unwrap_or(0)
    }

    /// Number of top-level fields holding a non-blank string or non-empty list.
    pub fn populated_fields(&self) -> usize {
        self.flat()
            .map(|m| {
                m.values()
                    .filter(|v| match v {
                        Value::String(s) => !s.trim().is_empty(),
                        Value::Array(a) => !a.is_empty(),
                        _ => false,
                    })
                    .count()
            })
            .unwrap_or(0)
    }

    fn flat(&self) -> Option<serde_json::Map<String, Value>> {
        let value = match self {
            Self::Client(c) => serde_json::to_value(c),
            Self::Company(c) => serde_json::to_value(c),
        };
        match value {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_counts() {
        let mut client = ClientFormData::default();
        let form = CanonicalFormData::Client(client.clone());
        assert_eq!(form.total_fields(), 31);
        assert_eq!(form.populated_fields(), 0);

        client.company = "Acme Corp".into();
        client.city = "   ".into();
        client.pain_points = vec!["churn".into()];
        let form = CanonicalFormData::Client(client);
        assert_eq!(form.populated_fields(), 2);
        assert_eq!(form.entity_name(), "Acme Corp");
    }

    #[test]
    fn company_field_count() {
        let form = CanonicalFormData::Company(CompanyFormData::default());
        assert_eq!(form.total_fields(), 24);
        assert_eq!(form.kind(), EntityKind::Company);
    }

    #[test]
    fn tagged_serde_roundtrip_preserves_kind() {
        let form = CanonicalFormData::Company(CompanyFormData {
            company_name: "Acme Corp".into(),
            tech_stack: vec!["Rust".into()],
            ..Default::default()
        });
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["kind"], "company");
        assert_eq!(json["data"]["companyName"], "Acme Corp");
        let back: CanonicalFormData = serde_json::from_value(json).unwrap();
        assert_eq!(back, form);
    }
}
