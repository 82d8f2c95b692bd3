//! Terminal rendering for reconciliation results and mapped records.
//!
//! Records are shown as vertical cards grouped by section, skipping empty
//! fields; list-of-record fields get one line per entry.

use rapport_core::{CanonicalFormData, Provider};
use rapport_recon::{ComparisonStatus, ProviderCard, ReconciliationView};
use rapport_sources::{ConnectorState, ConnectorStatus, IngestionEvent};
use serde_json::{Map, Value};

const MAX_LIST_ITEMS: usize = 10;

// ── Section groupings ──

const CLIENT_COMPANY: &[&str] = &[
    "company",
    "website",
    "industry",
    "description",
    "founded",
    "companySize",
    "employeeCount",
    "annualRevenue",
];

const CLIENT_LOCATION: &[&str] = &["city", "country", "zipCode"];

const CLIENT_CONTACT: &[&str] = &[
    "email",
    "phone",
    "contactName",
    "jobTitle",
    "primaryEmail",
    "primaryPhone",
    "preferredContactMethod",
];

const CLIENT_PIPELINE: &[&str] = &[
    "status",
    "tags",
    "shortTermGoals",
    "longTermGoals",
    "painPoints",
];

const CLIENT_RESEARCH: &[&str] = &["services", "technologies", "competitors", "blogs"];

const COMPANY_IDENTITY: &[&str] = &[
    "companyName",
    "website",
    "industry",
    "description",
    "valueProposition",
    "founded",
    "location",
    "size",
    "mission",
    "vision",
];

const COMPANY_CONTACT: &[&str] = &["email", "phone", "address"];

const COMPANY_RESEARCH: &[&str] = &[
    "services",
    "leadership",
    "blogs",
    "techStack",
    "partners",
    "integrations",
];

const SOCIAL: &[&str] = &[
    "linkedinUrl",
    "twitterUrl",
    "facebookUrl",
    "instagramUrl",
    "youtubeUrl",
];

// ── Reconciliation ──

pub fn print_reconciliation(view: &ReconciliationView) {
    if let Some(request) = &view.request {
        println!("=== {} ===", request.entity_name);
        println!("{}  {}", request.website_url, request.profile_url);
        println!();
    }

    for provider in Provider::BOTH {
        print_card(view, provider);
    }

    match view.comparison_status {
        ComparisonStatus::Pending => println!("Comparison pending."),
        ComparisonStatus::Unavailable => println!("Comparison unavailable for this round."),
        ComparisonStatus::Ready => {
            if let Some(cmp) = &view.comparison {
                println!("Comparison");
                println!(
                    "  {:<26} {} ({} vs {})",
                    "recommended", cmp.recommended_provider, cmp.score.a, cmp.score.b
                );
                if !cmp.reasoning.is_empty() {
                    println!("  {:<26} {}", "reasoning", cmp.reasoning);
                }
                for provider in Provider::BOTH {
                    print_joined(
                        &format!("strengths {}", provider.label()),
                        cmp.strengths.get(provider),
                    );
                    print_joined(
                        &format!("weaknesses {}", provider.label()),
                        cmp.weaknesses.get(provider),
                    );
                }
                for diff in cmp.key_differences.iter().take(MAX_LIST_ITEMS) {
                    println!("  - {diff}");
                }
            }
        }
    }
    println!();
}

fn print_card(view: &ReconciliationView, provider: Provider) {
    let marker = if view.is_recommended(provider) {
        " [Recommended]"
    } else {
        ""
    };
    println!("{}{marker}", provider.label());
    match view.card(provider) {
        ProviderCard::Idle => println!("  not started"),
        ProviderCard::Pending => println!("  waiting for response"),
        ProviderCard::Failed { message } => println!("  error: {message}"),
        ProviderCard::Ready {
            payload,
            completeness,
            processing_time_ms,
        } => {
            println!(
                "  {:<26} {}",
                "entity",
                payload.entity_name().unwrap_or("(unnamed)")
            );
            println!("  {:<26} {completeness}%", "completeness");
            println!(
                "  {:<26} {:.1}s",
                "processing time",
                *processing_time_ms as f64 / 1000.0
            );
        }
    }
    let selectable = if view.can_select(provider) { "yes" } else { "no" };
    println!("  {:<26} {selectable}", "selectable");
    println!();
}

fn print_joined(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("  {:<26} {}", label, items.join(", "));
    }
}

// ── Mapped record ──

pub fn print_form(form: &CanonicalFormData) {
    let fields = match serde_json::to_value(form) {
        Ok(Value::Object(mut tagged)) => match tagged.remove("data") {
            Some(Value::Object(fields)) => fields,
            _ => Map::new(),
        },
        _ => Map::new(),
    };

    println!("=== {} ({}) ===", form.entity_name(), form.kind().as_str());
    println!(
        "{} of {} fields populated",
        form.populated_fields(),
        form.total_fields()
    );
    println!();

    let sections: &[(&str, &[&str])] = match form {
        CanonicalFormData::Client(_) => &[
            ("Company", CLIENT_COMPANY),
            ("Location", CLIENT_LOCATION),
            ("Contact", CLIENT_CONTACT),
            ("Social", SOCIAL),
            ("Pipeline", CLIENT_PIPELINE),
            ("Research", CLIENT_RESEARCH),
        ],
        CanonicalFormData::Company(_) => &[
            ("Identity", COMPANY_IDENTITY),
            ("Contact", COMPANY_CONTACT),
            ("Social", SOCIAL),
            ("Research", COMPANY_RESEARCH),
        ],
    };
    for (header, keys) in sections {
        print_section(&fields, header, keys);
    }
}

fn print_section(fields: &Map<String, Value>, header: &str, keys: &[&str]) {
    let present: Vec<(&str, &Value)> = keys
        .iter()
        .filter_map(|&k| fields.get(k).map(|v| (k, v)))
        .filter(|(_, v)| !is_blank(v))
        .collect();
    if present.is_empty() {
        return;
    }

    println!("{header}");
    for (key, value) in present {
        match value {
            Value::String(s) => println!("  {key:<26} {s}"),
            Value::Array(items) if items.iter().all(Value::is_string) => {
                let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                println!("  {key:<26} {}", joined.join(", "));
            }
            Value::Array(items) => {
                println!("  {key} ({}):", items.len());
                for item in items.iter().take(MAX_LIST_ITEMS) {
                    println!("    - {}", entry_line(item));
                }
                if items.len() > MAX_LIST_ITEMS {
                    println!("    ... and {} more", items.len() - MAX_LIST_ITEMS);
                }
            }
            other => println!("  {key:<26} {other}"),
        }
    }
    println!();
}

/// `name | description`-style line from a list entry's non-empty values.
fn entry_line(item: &Value) -> String {
    match item {
        Value::Object(entry) => entry
            .values()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | "),
        other => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}

// ── Connectors ──

pub fn print_connectors(connectors: &[ConnectorState]) {
    println!("{:<14} {:<18} {:<9} {}", "ID", "NAME", "PRIORITY", "DATA");
    for conn in connectors {
        let spec = conn.spec;
        println!(
            "{:<14} {:<18} {:<9} {}",
            spec.id,
            spec.name,
            if spec.is_priority { "yes" } else { "" },
            spec.data_types.join(", ")
        );
    }
}

pub fn print_connector_state(conn: &ConnectorState) {
    let status = match &conn.status {
        ConnectorStatus::NotConnected => "not connected".to_string(),
        ConnectorStatus::Connecting => "connecting".to_string(),
        ConnectorStatus::Connected => "connected".to_string(),
        ConnectorStatus::Error(message) => format!("error: {message}"),
    };
    println!("{} ({})", conn.spec.name, conn.spec.id);
    println!("  {:<26} {status}", "status");
    println!("  {:<26} {}", "items", conn.items_count);
    if let Some(at) = conn.last_synced {
        println!("  {:<26} {}", "last synced", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
}

pub fn print_event(event: &IngestionEvent) {
    println!(
        "[{}] {:<12} {}",
        event.timestamp.format("%H:%M:%S"),
        event.connector_id,
        event.description
    );
}
