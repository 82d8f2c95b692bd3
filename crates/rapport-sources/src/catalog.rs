//! The fixed catalog of data-source connectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorId {
    Linkedin,
    Twitter,
    Website,
    Contact,
    Documents,
    Fathom,
    Salesforce,
    Hubspot,
    Gmail,
    Outlook,
    Zoom,
    Teams,
    GoogleDrive,
    Sharepoint,
    Crunchbase,
    Clutch,
}

impl ConnectorId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Website => "website",
            Self::Contact => "contact",
            Self::Documents => "documents",
            Self::Fathom => "fathom",
            Self::Salesforce => "salesforce",
            Self::Hubspot => "hubspot",
            Self::Gmail => "gmail",
            Self::Outlook => "outlook",
            Self::Zoom => "zoom",
            Self::Teams => "teams",
            Self::GoogleDrive => "google-drive",
            Self::Sharepoint => "sharepoint",
            Self::Crunchbase => "crunchbase",
            Self::Clutch => "clutch",
        }
    }

    pub fn spec(self) -> &'static ConnectorSpec {
        // CATALOG is declared in enum order.
        &CATALOG[self as usize]
    }

    /// What a connect or sync of this connector produces.
    pub fn ingest_kind(self) -> IngestKind {
        match self {
            Self::Linkedin | Self::Twitter => IngestKind::SocialProfiles,
            Self::Website => IngestKind::WebsiteSummary,
            Self::Contact => IngestKind::ContactInfo,
            Self::Fathom | Self::Zoom | Self::Teams => IngestKind::MeetingTranscripts,
            _ => IngestKind::Documents,
        }
    }

    /// Connectors fed by file upload rather than an OAuth grant.
    pub fn is_upload_only(self) -> bool {
        self == Self::Documents
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorId {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CATALOG
            .iter()
            .map(|c| c.id)
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| SourceError::UnknownConnector(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestKind {
    SocialProfiles,
    WebsiteSummary,
    ContactInfo,
    MeetingTranscripts,
    Documents,
}

/// Static description of a connector.
#[derive(Debug, PartialEq, Eq)]
pub struct ConnectorSpec {
    pub id: ConnectorId,
    pub name: &'static str,
    pub description: &'static str,
    pub is_priority: bool,
    pub data_types: &'static [&'static str],
    pub scopes: &'static [&'static str],
    /// Source field to the CRM field it lands in.
    pub field_mapping: &'static [(&'static str, &'static str)],
}

pub fn catalog() -> &'static [ConnectorSpec] {
    &CATALOG
}

static CATALOG: [ConnectorSpec; 16] = [
    ConnectorSpec {
        id: ConnectorId::Linkedin,
        name: "LinkedIn",
        description: "Pulls public profile info and posts to identify decision-makers, tone, and company updates.",
        is_priority: true,
        data_types: &["Social Profiles", "Recent Posts", "Network Info"],
        scopes: &["Read profile", "View connections", "Access posts"],
        field_mapping: &[
            ("profile.name", "Client Name"),
            ("profile.title", "Role"),
            ("profile.headline", "Professional Headline"),
            ("posts", "Recent Activity"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Twitter,
        name: "Twitter / X",
        description: "Imports tweets, engagement metrics, and social sentiment from public profiles.",
        is_priority: true,
        data_types: &["Tweets", "Mentions", "Engagement"],
        scopes: &["Read tweets", "View profile", "Access timeline"],
        field_mapping: &[
            ("profile.username", "Twitter Handle"),
            ("tweets", "Recent Posts"),
            ("metrics", "Social Engagement"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Website,
        name: "Website & Blogs",
        description: "Extracts company headline, services, tech stack hints, and blog topics by scanning the public site.",
        is_priority: true,
        data_types: &["Company Info", "Services", "Blog Posts", "Tech Stack"],
        scopes: &["Scrape website", "Parse content", "Extract metadata"],
        field_mapping: &[
            ("domain", "Website"),
            ("services", "Company Services"),
            ("blog_urls", "Blog Links"),
            ("tech_stack", "Technology"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Contact,
        name: "Contact Info",
        description: "Adds contact emails & phone numbers discovered in CRM or site; updates Contacts.",
        is_priority: true,
        data_types: &["Email", "Phone", "Address"],
        scopes: &["Read contacts", "Verify emails", "Update records"],
        field_mapping: &[
            ("email", "Email Address"),
            ("phone", "Phone Number"),
            ("address", "Physical Address"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Documents,
        name: "Documents",
        description: "Upload or sync client documents (PDF, Word, Excel, PPT). These are used for meeting intelligence and research.",
        is_priority: true,
        data_types: &["PDFs", "Word Docs", "Spreadsheets", "Presentations"],
        scopes: &["Upload files", "Read documents", "Extract content"],
        field_mapping: &[
            ("filename", "Document Name"),
            ("type", "File Type"),
            ("content", "Extracted Text"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Fathom,
        name: "Fathom",
        description: "Ingest Fathom meeting transcripts to extract action items, sentiment and follow-ups.",
        is_priority: true,
        data_types: &["Transcripts", "Action Items", "Sentiment", "Speakers"],
        scopes: &["Read transcripts", "Access meetings", "View recordings"],
        field_mapping: &[
            ("transcript", "Meeting Transcript"),
            ("speakers", "Participants"),
            ("action_items", "Follow-up Tasks"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Salesforce,
        name: "Salesforce",
        description: "Sync contacts, opportunities, and account data from Salesforce CRM.",
        is_priority: false,
        data_types: &["Contacts", "Accounts", "Opportunities", "Activities"],
        scopes: &["Read contacts", "Access accounts", "View opportunities"],
        field_mapping: &[
            ("contact", "CRM Contact"),
            ("account", "Company Record"),
            ("opportunity", "Sales Pipeline"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Hubspot,
        name: "HubSpot",
        description: "Import contacts, deals, and marketing engagement data from HubSpot.",
        is_priority: false,
        data_types: &["Contacts", "Deals", "Email Engagement", "Forms"],
        scopes: &["Read contacts", "Access deals", "View engagement"],
        field_mapping: &[
            ("contact", "HubSpot Contact"),
            ("deal", "Sales Deal"),
            ("engagement", "Marketing Activity"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Gmail,
        name: "Gmail",
        description: "Access email conversations, threads, and attachments from Gmail.",
        is_priority: false,
        data_types: &["Emails", "Threads", "Attachments", "Labels"],
        scopes: &["Read emails", "View threads", "Access attachments"],
        field_mapping: &[
            ("email", "Email Thread"),
            ("attachments", "File Attachments"),
            ("labels", "Categories"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Outlook,
        name: "Outlook",
        description: "Sync email communications and calendar events from Microsoft Outlook.",
        is_priority: false,
        data_types: &["Emails", "Calendar", "Contacts", "Tasks"],
        scopes: &["Read mail", "Access calendar", "View contacts"],
        field_mapping: &[
            ("email", "Email Message"),
            ("calendar", "Meetings"),
            ("contacts", "Address Book"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Zoom,
        name: "Zoom",
        description: "Import meeting recordings, transcripts, and participant data from Zoom.",
        is_priority: false,
        data_types: &["Recordings", "Transcripts", "Chat Logs", "Participants"],
        scopes: &["Access recordings", "Read transcripts", "View participants"],
        field_mapping: &[
            ("recording", "Video Recording"),
            ("transcript", "Meeting Transcript"),
            ("participants", "Attendees"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Teams,
        name: "Microsoft Teams",
        description: "Sync Teams meetings, chats, and shared files for client interactions.",
        is_priority: false,
        data_types: &["Meetings", "Chats", "Files", "Calls"],
        scopes: &["Read chats", "Access meetings", "View files"],
        field_mapping: &[
            ("chat", "Team Chat"),
            ("meeting", "Teams Meeting"),
            ("files", "Shared Files"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::GoogleDrive,
        name: "Google Drive",
        description: "Access and sync documents, spreadsheets, and presentations from Google Drive.",
        is_priority: false,
        data_types: &["Docs", "Sheets", "Slides", "PDFs"],
        scopes: &["Read files", "Access folders", "View metadata"],
        field_mapping: &[
            ("file", "Drive Document"),
            ("folder", "Folder Structure"),
            ("metadata", "File Info"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Sharepoint,
        name: "SharePoint",
        description: "Sync enterprise documents and collaboration data from SharePoint.",
        is_priority: false,
        data_types: &["Documents", "Lists", "Sites", "Libraries"],
        scopes: &["Read documents", "Access sites", "View lists"],
        field_mapping: &[
            ("document", "SharePoint File"),
            ("site", "Team Site"),
            ("list", "Data List"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Crunchbase,
        name: "Crunchbase",
        description: "Fetch company funding, investors, and market intelligence from Crunchbase.",
        is_priority: false,
        data_types: &["Company Data", "Funding Rounds", "Investors", "News"],
        scopes: &["Read company profiles", "Access funding data", "View news"],
        field_mapping: &[
            ("company", "Company Profile"),
            ("funding", "Investment Data"),
            ("news", "Market News"),
        ],
    },
    ConnectorSpec {
        id: ConnectorId::Clutch,
        name: "Clutch",
        description: "Import client reviews, ratings, and case studies from Clutch profiles.",
        is_priority: false,
        data_types: &["Reviews", "Ratings", "Case Studies", "Portfolio"],
        scopes: &["Read reviews", "Access ratings", "View portfolio"],
        field_mapping: &[
            ("review", "Client Review"),
            ("rating", "Service Rating"),
            ("case_study", "Project Example"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_in_enum_order() {
        for (i, spec) in catalog().iter().enumerate() {
            assert_eq!(spec.id as usize, i);
            assert_eq!(spec.id.spec(), spec);
        }
        assert_eq!(catalog().iter().filter(|c| c.is_priority).count(), 6);
    }

    #[test]
    fn ids_parse_and_serialize_alike() {
        for spec in catalog() {
            let parsed: ConnectorId = spec.id.as_str().parse().unwrap();
            assert_eq!(parsed, spec.id);
            assert_eq!(
                serde_json::to_value(spec.id).unwrap(),
                serde_json::Value::String(spec.id.to_string())
            );
        }
        assert_eq!(" Google-Drive ".parse::<ConnectorId>().unwrap(), ConnectorId::GoogleDrive);
        assert!(matches!(
            "myspace".parse::<ConnectorId>(),
            Err(SourceError::UnknownConnector(_))
        ));
    }

    #[test]
    fn dispatch_by_connector() {
        assert_eq!(ConnectorId::Twitter.ingest_kind(), IngestKind::SocialProfiles);
        assert_eq!(ConnectorId::Website.ingest_kind(), IngestKind::WebsiteSummary);
        assert_eq!(ConnectorId::Contact.ingest_kind(), IngestKind::ContactInfo);
        assert_eq!(ConnectorId::Teams.ingest_kind(), IngestKind::MeetingTranscripts);
        assert_eq!(ConnectorId::Hubspot.ingest_kind(), IngestKind::Documents);
        assert!(ConnectorId::Documents.is_upload_only());
        assert!(!ConnectorId::Gmail.is_upload_only());
    }
}
