use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use rapport_core::{DraftError, DraftStore, WizardDraft};
use tracing::debug;

/// Keeps the wizard draft as pretty-printed JSON in a single file.
///
/// Saves go through a temporary file in the same directory and a rename, so
/// a crash mid-write leaves the previous draft intact.
pub struct JsonFileDraftStore {
    path: PathBuf,
}

impl JsonFileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }
}

impl DraftStore for JsonFileDraftStore {
    fn save(&self, draft: &WizardDraft) -> Result<(), DraftError> {
        let bytes = serde_json::to_vec_pretty(draft).map_err(DraftError::Encode)?;
        let dir = self.dir();
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| DraftError::Io(e.error))?;
        debug!(path = %self.path.display(), step = draft.step, "draft saved");
        Ok(())
    }

    fn load(&self) -> Result<Option<WizardDraft>, DraftError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let draft = serde_json::from_slice(&bytes).map_err(DraftError::Corrupt)?;
        Ok(Some(draft))
    }

    fn clear(&self) -> Result<(), DraftError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "draft cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
