//! Completeness scoring for provider payloads.
//!
//! Providers normally report their own score in response metadata; this is
//! the same calculation done locally, used when metadata is missing.
//!
//! - Client payloads: share of the fixed client field set that is populated.
//! - Company payloads: 24 slots (10 basic, 3 contact, 5 social, and one each
//!   for services, leadership, blogs, tech stack, partners, integrations).

use crate::payload::{ClientPayload, CompanyPayload, EnrichmentPayload};

/// Percentage (0..=100) of populated fields in the payload.
pub fn completeness(payload: &EnrichmentPayload) -> u8 {
    let (populated, total) = match payload {
        EnrichmentPayload::Client(p) => client_counts(p),
        EnrichmentPayload::Company(p) => company_counts(p),
    };
    percent(populated, total)
}

fn percent(populated: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((populated as f64 / total as f64) * 100.0).round() as u8
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn non_empty<T>(list: &Option<Vec<T>>) -> bool {
    list.as_ref().is_some_and(|l| !l.is_empty())
}

fn client_counts(p: &ClientPayload) -> (usize, usize) {
    let scalars = [
        &p.company,
        &p.website,
        &p.industry,
        &p.description,
        &p.founded,
        &p.company_size,
        &p.employee_count,
        &p.annual_revenue,
        &p.city,
        &p.country,
        &p.zip_code,
        &p.linkedin_url,
        &p.twitter_url,
        &p.facebook_url,
        &p.instagram_url,
        &p.contact_name,
        &p.primary_email,
        &p.primary_phone,
        &p.job_title,
        &p.short_term_goals,
        &p.long_term_goals,
    ];
    let lists = [
        non_empty(&p.services),
        non_empty(&p.technologies),
        non_empty(&p.pain_points),
        non_empty(&p.competitors),
        non_empty(&p.blogs),
    ];
    let populated =
        scalars.iter().filter(|v| filled(v)).count() + lists.iter().filter(|b| **b).count();
    (populated, scalars.len() + lists.len())
}

fn company_counts(p: &CompanyPayload) -> (usize, usize) {
    let basic = [
        &p.company_name,
        &p.website,
        &p.industry,
        &p.description,
        &p.value_proposition,
        &p.founded,
        &p.location,
        &p.size,
        &p.mission,
        &p.vision,
    ];
    let contact = [&p.email, &p.phone, &p.address];
    let social = [
        &p.linkedin_url,
        &p.twitter_url,
        &p.facebook_url,
        &p.instagram_url,
        &p.youtube_url,
    ];
    let tech = p.technology.as_ref();
    let complex = [
        non_empty(&p.services),
        non_empty(&p.leadership),
        non_empty(&p.blogs),
        tech.is_some_and(|t| non_empty(&t.stack)),
        tech.is_some_and(|t| non_empty(&t.partners)),
        tech.is_some_and(|t| non_empty(&t.integrations)),
    ];
    let populated = basic.iter().filter(|v| filled(v)).count()
        + contact.iter().filter(|v| filled(v)).count()
        + social.iter().filter(|v| filled(v)).count()
        + complex.iter().filter(|b| **b).count();
    (
        populated,
        basic.len() + contact.len() + social.len() + complex.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;
    use serde_json::json;

    #[test]
    fn empty_payloads_score_zero() {
        let client = EnrichmentPayload::from_value(EntityKind::Client, json!({})).unwrap();
        let company = EnrichmentPayload::from_value(EntityKind::Company, json!({})).unwrap();
        assert_eq!(completeness(&client), 0);
        assert_eq!(completeness(&company), 0);
    }

    #[test]
    fn company_uses_24_slots() {
        // 6 of 24 populated = 25%.
        let company = EnrichmentPayload::from_value(
            EntityKind::Company,
            json!({
                "companyName": "Acme Corp",
                "website": "https://acme.com",
                "email": "hi@acme.com",
                "youtubeUrl": "https://youtube.com/acme",
                "services": [{"name": "Audit"}],
                "technology": {"stack": ["Rust"], "partners": []}
            }),
        )
        .unwrap();
        assert_eq!(completeness(&company), 25);
    }

    #[test]
    fn client_blank_strings_do_not_count() {
        // 13 of 26 populated = 50%.
        let client = EnrichmentPayload::from_value(
            EntityKind::Client,
            json!({
                "company": "Acme Corp", "website": "https://acme.com", "industry": "Widgets",
                "description": "d", "founded": "1999", "companySize": "51-200",
                "employeeCount": "120", "annualRevenue": "$10M", "city": "Berlin",
                "country": "DE", "zipCode": "10115", "contactName": "   ",
                "services": [{"name": "Audit"}], "blogs": [{"title": "Launch"}],
                "painPoints": []
            }),
        )
        .unwrap();
        assert_eq!(completeness(&client), 50);
    }
}
