//! Mock items produced by connector ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ConnectorId, IngestKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Document,
    Profile,
    Contact,
    Transcript,
    Website,
}

/// One entry in the activity stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionEvent {
    pub id: String,
    pub connector_id: ConnectorId,
    pub client_id: String,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub item_type: ItemType,
}

const PROFILE_NAMES: [&str; 3] = ["Jane Doe", "John Smith", "Sarah Mitchell"];
const PROFILE_TITLES: [&str; 3] = ["Head of Product", "VP of Engineering", "CTO"];
const WEBSITE_SERVICES: [&str; 4] = [
    "AI Automation",
    "Web Development",
    "Cloud Infrastructure",
    "Data Analytics",
];
const CONTACT_EMAIL: &str = "contact@techcorp.com";
const CONTACT_PHONE: &str = "+1 (555) 123-4567";
const TRANSCRIPT_TITLE: &str = "Q4 Planning Discussion";
const DOCUMENT_NAMES: [&str; 3] = [
    "Client_Proposal_Q3.pdf",
    "Meeting_Notes_Oct.docx",
    "Financial_Report.xlsx",
];

/// Description and type of the `index`-th item a connector ingests in one run.
pub(crate) fn mock_item(connector: ConnectorId, index: usize) -> (String, ItemType) {
    let name = connector.spec().name;
    match connector.ingest_kind() {
        IngestKind::SocialProfiles => (
            format!(
                "{name} profile for {} ({}) added",
                PROFILE_NAMES[index % PROFILE_NAMES.len()],
                PROFILE_TITLES[index % PROFILE_TITLES.len()]
            ),
            ItemType::Profile,
        ),
        IngestKind::WebsiteSummary => (
            format!("Website scraped - Services: {}", WEBSITE_SERVICES[..2].join(", ")),
            ItemType::Website,
        ),
        IngestKind::ContactInfo => (
            format!("Contact info added - {CONTACT_EMAIL}, {CONTACT_PHONE}"),
            ItemType::Contact,
        ),
        IngestKind::MeetingTranscripts => (
            format!("{name} transcript imported: {TRANSCRIPT_TITLE}"),
            ItemType::Transcript,
        ),
        IngestKind::Documents => (
            format!("Document added: {}", DOCUMENT_NAMES[index % DOCUMENT_NAMES.len()]),
            ItemType::Document,
        ),
    }
}
