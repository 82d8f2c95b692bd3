//! DuckDB storage for onboarded clients and company profiles.

use std::path::Path;

use duckdb::{Connection, OptionalExt, params_from_iter};
use rapport_core::{ClientFormData, CompanyFormData};
use tracing::info;

use crate::StoreError;
use crate::columns::{self, Column};

/// A client row as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredClient {
    pub id: i64,
    pub owner_id: String,
    pub form: ClientFormData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCompanyProfile {
    pub owner_id: String,
    pub form: CompanyFormData,
    pub onboarding_completed: bool,
}

/// DuckDB store for persisted onboarding records.
///
/// `clients` holds one row per onboarded client, keyed by a generated id and
/// owned by an externally issued user id. `company_profiles` holds one row
/// per owner. Every form field is a text column; list fields hold JSON.
///
/// Use [`open`](Self::open) for in-memory and
/// [`open_persistent`](Self::open_persistent) for file-backed storage.
pub struct ClientStore {
    conn: Connection,
    client_columns: Vec<Column>,
    company_columns: Vec<Column>,
}

impl ClientStore {
    /// Open an in-memory DuckDB database.
    pub fn open() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    /// Open or create a persistent DuckDB database at the given path.
    pub fn open_persistent(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn,
            client_columns: columns::layout::<ClientFormData>()?,
            company_columns: columns::layout::<CompanyFormData>()?,
        };
        store.create_tables()?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE SEQUENCE IF NOT EXISTS client_ids START 1;
             CREATE TABLE IF NOT EXISTS clients (
                 id BIGINT PRIMARY KEY DEFAULT nextval('client_ids'),
                 owner_id VARCHAR NOT NULL,
                 {client},
                 created_at TIMESTAMP NOT NULL DEFAULT current_timestamp
             );
             CREATE TABLE IF NOT EXISTS company_profiles (
                 owner_id VARCHAR PRIMARY KEY,
                 {company},
                 onboarding_completed BOOLEAN NOT NULL DEFAULT false,
                 updated_at TIMESTAMP NOT NULL DEFAULT current_timestamp
             );",
            client = column_defs(&self.client_columns),
            company = column_defs(&self.company_columns),
        );
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    // ── Writes ──

    /// Insert one client record and return its generated id.
    pub fn insert_client(&self, owner_id: &str, form: &ClientFormData) -> Result<i64, StoreError> {
        require(owner_id, "owner id")?;
        require(&form.company, "company")?;

        let mut values = vec![owner_id.to_string()];
        values.extend(columns::flatten(form, &self.client_columns)?);
        let sql = format!(
            "INSERT INTO clients (owner_id, {}) VALUES ({}) RETURNING id",
            column_list(&self.client_columns),
            placeholders(values.len()),
        );
        let id: i64 = self
            .conn
            .query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
        info!(id, owner = owner_id, company = %form.company, "client saved");
        Ok(id)
    }

    /// Write the owner's company profile and mark onboarding complete.
    pub fn upsert_company_profile(
        &self,
        owner_id: &str,
        form: &CompanyFormData,
    ) -> Result<(), StoreError> {
        require(owner_id, "owner id")?;
        require(&form.company_name, "companyName")?;

        let mut values = vec![owner_id.to_string()];
        values.extend(columns::flatten(form, &self.company_columns)?);
        let sql = format!(
            "INSERT OR REPLACE INTO company_profiles
                 (owner_id, {}, onboarding_completed, updated_at)
             VALUES ({}, true, current_timestamp)",
            column_list(&self.company_columns),
            placeholders(values.len()),
        );
        self.conn.execute(&sql, params_from_iter(values.iter()))?;
        info!(owner = owner_id, company = %form.company_name, "company profile saved");
        Ok(())
    }

    // ── Reads ──

    pub fn get_client(&self, id: i64) -> Result<Option<StoredClient>, StoreError> {
        let n = self.client_columns.len();
        let sql = format!(
            "SELECT owner_id, {} FROM clients WHERE id = ?",
            column_list(&self.client_columns)
        );
        let row = self
            .conn
            .query_row(&sql, [id], |row| {
                let owner: String = row.get(0)?;
                let values = (1..=n)
                    .map(|i| row.get::<_, String>(i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((owner, values))
            })
            .optional()?;
        let Some((owner_id, values)) = row else {
            return Ok(None);
        };
        Ok(Some(StoredClient {
            id,
            owner_id,
            form: columns::rebuild(&self.client_columns, values)?,
        }))
    }

    /// Clients owned by `owner_id`, oldest first.
    pub fn client_ids(&self, owner_id: &str) -> Result<Vec<i64>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM clients WHERE owner_id = ? ORDER BY id")?;
        let ids = stmt
            .query_map([owner_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    pub fn client_count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT count(*) FROM clients", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn get_company_profile(
        &self,
        owner_id: &str,
    ) -> Result<Option<StoredCompanyProfile>, StoreError> {
        let n = self.company_columns.len();
        let sql = format!(
            "SELECT onboarding_completed, {} FROM company_profiles WHERE owner_id = ?",
            column_list(&self.company_columns)
        );
        let row = self
            .conn
            .query_row(&sql, [owner_id], |row| {
                let done: bool = row.get(0)?;
                let values = (1..=n)
                    .map(|i| row.get::<_, String>(i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((done, values))
            })
            .optional()?;
        let Some((onboarding_completed, values)) = row else {
            return Ok(None);
        };
        Ok(Some(StoredCompanyProfile {
            owner_id: owner_id.to_string(),
            form: columns::rebuild(&self.company_columns, values)?,
            onboarding_completed,
        }))
    }
}

fn require(value: &str, field: &'static str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(())
}

fn column_defs(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("{} VARCHAR NOT NULL DEFAULT ''", c.name))
        .collect::<Vec<_>>()
        .join(",\n                 ")
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_core::form::{Leader, Service};

    fn acme_client() -> ClientFormData {
        ClientFormData {
            company: "Acme Corp".into(),
            website: "https://acme.com".into(),
            industry: "Widgets".into(),
            primary_email: "hello@acme.com".into(),
            email: "hello@acme.com".into(),
            preferred_contact_method: "email".into(),
            status: "prospect".into(),
            pain_points: vec!["Manual invoicing".into()],
            services: vec![Service {
                name: "Audit".into(),
                description: "Yearly compliance audit".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn open_creates_empty_tables() {
        let store = ClientStore::open().unwrap();
        assert_eq!(store.client_count().unwrap(), 0);
        assert!(store.get_client(1).unwrap().is_none());
        assert!(store.get_company_profile("user-1").unwrap().is_none());
    }

    #[test]
    fn insert_and_read_back_client() {
        let store = ClientStore::open().unwrap();
        let id = store.insert_client("user-1", &acme_client()).unwrap();
        assert_eq!(store.client_count().unwrap(), 1);

        let stored = store.get_client(id).unwrap().unwrap();
        assert_eq!(stored.owner_id, "user-1");
        assert_eq!(stored.form, acme_client());
    }

    #[test]
    fn ids_are_distinct_per_insert() {
        let store = ClientStore::open().unwrap();
        let first = store.insert_client("user-1", &acme_client()).unwrap();
        let second = store.insert_client("user-1", &acme_client()).unwrap();
        store.insert_client("user-2", &acme_client()).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.client_ids("user-1").unwrap(), vec![first, second]);
        assert_eq!(store.client_count().unwrap(), 3);
    }

    #[test]
    fn blank_owner_or_name_is_rejected() {
        let store = ClientStore::open().unwrap();
        let err = store.insert_client(" ", &acme_client()).unwrap_err();
        assert!(matches!(err, StoreError::MissingField("owner id")));

        let err = store
            .insert_client("user-1", &ClientFormData::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "company is required");
        assert_eq!(store.client_count().unwrap(), 0);
    }

    #[test]
    fn company_profile_upsert_replaces() {
        let store = ClientStore::open().unwrap();
        let mut profile = CompanyFormData {
            company_name: "Rapport Labs".into(),
            leadership: vec![Leader {
                name: "Dana Reyes".into(),
                role: "CEO".into(),
                linkedin_url: String::new(),
            }],
            tech_stack: vec!["Rust".into()],
            ..Default::default()
        };
        store.upsert_company_profile("user-1", &profile).unwrap();
        profile.mission = "Shorter onboarding".into();
        store.upsert_company_profile("user-1", &profile).unwrap();

        let stored = store.get_company_profile("user-1").unwrap().unwrap();
        assert!(stored.onboarding_completed);
        assert_eq!(stored.form, profile);
    }

    #[test]
    fn persistent_store_survives_reopen() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("rapport.duckdb");
        let id = {
            let store = ClientStore::open_persistent(&path).unwrap();
            store.insert_client("user-1", &acme_client()).unwrap()
        };
        assert!(path.exists());

        let store = ClientStore::open_persistent(&path).unwrap();
        assert_eq!(store.client_count().unwrap(), 1);
        assert_eq!(store.get_client(id).unwrap().unwrap().form.company, "Acme Corp");
    }
}
