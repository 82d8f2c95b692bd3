//! Field mapper: provider payload → canonical form record.
//!
//! Total and deterministic. Every scalar is trimmed and defaults to `""`,
//! every list defaults to empty. List entries without their identifying
//! field (a service's `name`, a blog post's `title`, ...) are dropped before
//! the rest of the entry is mapped.

use tracing::debug;

use crate::form::{
    BlogPost, CanonicalFormData, ClientFormData, CompanyFormData, Competitor, Leader, Service,
    Technology,
};
use crate::payload::{
    BlogEntry, ClientPayload, CompanyPayload, CompetitorEntry, EnrichmentPayload, LeaderEntry,
    ServiceEntry, TechnologyEntry,
};
use crate::types::Provider;

const DEFAULT_CONTACT_METHOD: &str = "email";
const DEFAULT_CLIENT_STATUS: &str = "prospect";

/// Map a provider payload into the canonical form record for its entity kind.
pub fn map_payload(payload: &EnrichmentPayload, provider: Provider) -> CanonicalFormData {
    let form = match payload {
        EnrichmentPayload::Client(p) => CanonicalFormData::Client(map_client(p)),
        EnrichmentPayload::Company(p) => CanonicalFormData::Company(map_company(p)),
    };
    debug!(
        provider = %provider,
        kind = form.kind().as_str(),
        populated = form.populated_fields(),
        total = form.total_fields(),
        "mapped provider payload"
    );
    form
}

fn map_client(p: &ClientPayload) -> ClientFormData {
    ClientFormData {
        company: text(&p.company),
        website: text(&p.website),
        industry: text(&p.industry),
        email: text(&p.primary_email),
        phone: text(&p.primary_phone),
        city: text(&p.city),
        country: text(&p.country),
        zip_code: text(&p.zip_code),
        founded: text(&p.founded),
        company_size: text(&p.company_size),
        linkedin_url: text(&p.linkedin_url),
        twitter_url: text(&p.twitter_url),
        instagram_url: text(&p.instagram_url),
        facebook_url: text(&p.facebook_url),
        contact_name: text(&p.contact_name),
        primary_email: text(&p.primary_email),
        primary_phone: text(&p.primary_phone),
        job_title: text(&p.job_title),
        preferred_contact_method: DEFAULT_CONTACT_METHOD.to_string(),
        short_term_goals: text(&p.short_term_goals),
        long_term_goals: text(&p.long_term_goals),
        status: DEFAULT_CLIENT_STATUS.to_string(),
        tags: Vec::new(),
        description: text(&p.description),
        annual_revenue: text(&p.annual_revenue),
        employee_count: text(&p.employee_count),
        services: services(&p.services),
        technologies: keep_named(&p.technologies, |t: &TechnologyEntry| &t.name, |t| {
            Technology {
                name: text(&t.name),
                category: text(&t.category),
            }
        }),
        blogs: blogs(&p.blogs),
        pain_points: strings(&p.pain_points),
        competitors: keep_named(&p.competitors, |c: &CompetitorEntry| &c.name, |c| {
            Competitor {
                name: text(&c.name),
                comparison: text(&c.comparison),
            }
        }),
    }
}

fn map_company(p: &CompanyPayload) -> CompanyFormData {
    let tech = p.technology.as_ref();
    CompanyFormData {
        company_name: text(&p.company_name),
        website: text(&p.website),
        industry: text(&p.industry),
        description: text(&p.description),
        value_proposition: text(&p.value_proposition),
        founded: text(&p.founded),
        location: text(&p.location),
        size: text(&p.size),
        mission: text(&p.mission),
        vision: text(&p.vision),
        email: text(&p.email),
        phone: text(&p.phone),
        address: text(&p.address),
        linkedin_url: text(&p.linkedin_url),
        twitter_url: text(&p.twitter_url),
        facebook_url: text(&p.facebook_url),
        instagram_url: text(&p.instagram_url),
        youtube_url: text(&p.youtube_url),
        services: services(&p.services),
        leadership: keep_named(&p.leadership, |l: &LeaderEntry| &l.name, |l| Leader {
            name: text(&l.name),
            role: text(&l.role),
            linkedin_url: text(&l.linkedin_url),
        }),
        blogs: blogs(&p.blogs),
        tech_stack: tech.map(|t| strings(&t.stack)).unwrap_or_default(),
        partners: tech.map(|t| strings(&t.partners)).unwrap_or_default(),
        integrations: tech.map(|t| strings(&t.integrations)).unwrap_or_default(),
    }
}

// ── Helpers ──

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn strings(values: &Option<Vec<String>>) -> Vec<String> {
    values
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep entries whose `key` field is present and non-blank, then map them.
fn keep_named<E, T>(
    entries: &Option<Vec<E>>,
    key: impl Fn(&E) -> &Option<String>,
    map: impl Fn(&E) -> T,
) -> Vec<T> {
    entries
        .iter()
        .flatten()
        .filter(|e| present(key(e)))
        .map(map)
        .collect()
}

fn services(entries: &Option<Vec<ServiceEntry>>) -> Vec<Service> {
    keep_named(entries, |s| &s.name, |s| Service {
        name: text(&s.name),
        description: text(&s.description),
    })
}

fn blogs(entries: &Option<Vec<BlogEntry>>) -> Vec<BlogPost> {
    keep_named(entries, |b| &b.title, |b| BlogPost {
        title: text(&b.title),
        url: text(&b.url),
        date: text(&b.date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntityKind;
    use serde_json::{Value, json};

    fn client(value: serde_json::Value) -> EnrichmentPayload {
        EnrichmentPayload::from_value(EntityKind::Client, value).unwrap()
    }

    fn company(value: serde_json::Value) -> EnrichmentPayload {
        EnrichmentPayload::from_value(EntityKind::Company, value).unwrap()
    }

    /// Walk a serialized record and assert there is no null anywhere.
    fn assert_no_nulls(value: &Value) {
        match value {
            Value::Null => panic!("null leaf in mapped record"),
            Value::Array(items) => items.iter().for_each(assert_no_nulls),
            Value::Object(map) => map.values().for_each(assert_no_nulls),
            _ => {}
        }
    }

    #[test]
    fn empty_payload_maps_to_defaults() {
        let CanonicalFormData::Client(form) = map_payload(&client(json!({})), Provider::A) else {
            panic!("expected client form");
        };
        assert_eq!(form.company, "");
        assert!(form.services.is_empty());
        assert!(form.pain_points.is_empty());
        assert_eq!(form.preferred_contact_method, "email");
        assert_eq!(form.status, "prospect");
        assert_no_nulls(&serde_json::to_value(&form).unwrap());
    }

    #[test]
    fn arbitrary_subsets_never_produce_nulls() {
        let full = json!({
            "company": "Acme Corp", "website": "https://acme.com", "industry": "Widgets",
            "description": "Makes widgets", "founded": 1999, "companySize": "51-200",
            "employeeCount": "120", "annualRevenue": "$10M", "city": "Berlin",
            "country": "DE", "zipCode": "10115", "linkedinUrl": "https://linkedin.com/company/acme",
            "twitterUrl": null, "facebookUrl": "", "instagramUrl": "x",
            "contactName": "Ada", "primaryEmail": "ada@acme.com", "primaryPhone": "+49",
            "jobTitle": "CEO", "shortTermGoals": "grow", "longTermGoals": "IPO",
            "services": [{"name": "Audit"}], "technologies": [{"category": "db"}],
            "painPoints": ["slow"], "competitors": [{"name": "Globex"}],
            "blogs": [{"title": "Launch", "url": 5}]
        });
        let Value::Object(fields) = full else { unreachable!() };
        let keys: Vec<&String> = fields.keys().collect();
        // Drop every field in turn, then progressively larger prefixes.
        for skip in 0..keys.len() {
            let subset: serde_json::Map<String, Value> = fields
                .iter()
                .filter(|(k, _)| *k != keys[skip])
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let form = map_payload(&client(Value::Object(subset)), Provider::B);
            assert_no_nulls(&serde_json::to_value(&form).unwrap());

            let prefix: serde_json::Map<String, Value> = fields
                .iter()
                .take(skip)
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            let form = map_payload(&company(Value::Object(prefix)), Provider::A);
            assert_no_nulls(&serde_json::to_value(&form).unwrap());
        }
    }

    #[test]
    fn services_without_name_are_dropped() {
        let payload = client(json!({
            "services": [{"name": "X", "description": "d"}, {"description": "no name"}]
        }));
        let CanonicalFormData::Client(form) = map_payload(&payload, Provider::A) else {
            panic!("expected client form");
        };
        assert_eq!(
            form.services,
            vec![Service {
                name: "X".into(),
                description: "d".into()
            }]
        );
    }

    #[test]
    fn blank_identifiers_are_dropped_and_values_trimmed() {
        let payload = client(json!({
            "company": "  Acme Corp ",
            "primaryEmail": " ada@acme.com ",
            "blogs": [{"title": "  "}, {"title": " Launch ", "url": "https://acme.com/b"}],
            "competitors": [{"name": "Globex", "comparison": " cheaper "}, {"comparison": "?"}],
            "painPoints": ["  ", " churn "]
        }));
        let CanonicalFormData::Client(form) = map_payload(&payload, Provider::A) else {
            panic!("expected client form");
        };
        assert_eq!(form.company, "Acme Corp");
        assert_eq!(form.email, "ada@acme.com");
        assert_eq!(form.primary_email, "ada@acme.com");
        assert_eq!(form.blogs.len(), 1);
        assert_eq!(form.blogs[0].title, "Launch");
        assert_eq!(form.blogs[0].date, "");
        assert_eq!(form.competitors.len(), 1);
        assert_eq!(form.competitors[0].comparison, "cheaper");
        assert_eq!(form.pain_points, vec!["churn".to_string()]);
    }

    #[test]
    fn company_payload_flattens_technology() {
        let payload = company(json!({
            "companyName": "Acme Corp",
            "leadership": [{"name": "Ada", "role": "CEO"}, {"role": "CTO"}],
            "technology": {"stack": ["Rust", " "], "integrations": ["Slack"]}
        }));
        let CanonicalFormData::Company(form) = map_payload(&payload, Provider::B) else {
            panic!("expected company form");
        };
        assert_eq!(form.company_name, "Acme Corp");
        assert_eq!(form.leadership.len(), 1);
        assert_eq!(form.leadership[0].linkedin_url, "");
        assert_eq!(form.tech_stack, vec!["Rust".to_string()]);
        assert!(form.partners.is_empty());
        assert_eq!(form.integrations, vec!["Slack".to_string()]);
    }

    #[test]
    fn mapping_is_deterministic() {
        let payload = client(json!({"company": "Acme Corp", "services": [{"name": "Audit"}]}));
        assert_eq!(
            map_payload(&payload, Provider::A),
            map_payload(&payload, Provider::A)
        );
    }
}
