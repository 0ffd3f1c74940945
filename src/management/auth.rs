use std::path::{Path, PathBuf};

use crate::{error::Res, types::Credentials, warning};

/// File-backed storage for the [`Credentials`] record.
///
/// Pure data access: it never decides whether a token is usable.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    /// Reads the record from disk.
    ///
    /// A missing file yields the empty record. So does a corrupt one, after a
    /// warning, so that the next successful authorization overwrites it.
    pub async fn load(&self) -> Credentials {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return Credentials::default(),
        };

        match serde_json::from_str(&content) {
            Ok(credentials) => credentials,
            Err(e) => {
                warning!(
                    "Ignoring unreadable token cache {}: {}",
                    self.path.display(),
                    e
                );
                Credentials::default()
            }
        }
    }

    pub async fn save(&self, credentials: &Credentials) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(credentials)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
