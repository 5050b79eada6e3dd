//! Credentials storage for the CLI.
//!
//! The signed-in user is kept in `~/.spherag/credentials.json` so that
//! `spherag login` in one invocation is visible to `spherag farms` in the next.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{classify_io_error, SystemError};

/// The configuration directory name under `$HOME`.
pub const CONFIG_DIR: &str = ".spherag";

const CREDENTIALS_FILE: &str = "credentials.json";

/// The signed-in user and the bearer token the API issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub auth_token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            auth_token: auth_token.into(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.auth_token.is_empty()
    }
}

/// `~/.spherag`, or `None` when there is no home directory.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR))
}

/// Manages the credentials file.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Manager for `~/.spherag/credentials.json`.
    pub fn new() -> Result<Self, SystemError> {
        let dir = config_dir().ok_or(SystemError::NoHomeDirectory)?;
        Ok(Self::with_path(dir.join(CREDENTIALS_FILE)))
    }

    /// Manager for an explicit file, used by tests.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Read the stored credentials.
    ///
    /// A missing file is `Ok(None)`. An unreadable or malformed file is an
    /// error so the caller can tell the user to sign in again.
    pub fn load(&self) -> Result<Option<Credentials>, SystemError> {
        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(classify_io_error(
                    e,
                    Some(self.credentials_path.clone()),
                    "read credentials",
                ))
            }
        };

        let creds: Credentials =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| SystemError::IoError {
                operation: "parse credentials".to_string(),
                path: Some(self.credentials_path.clone()),
                message: e.to_string(),
            })?;
        Ok(Some(creds))
    }

    /// Write the credentials, creating `~/.spherag` if needed.
    pub fn save(&self, credentials: &Credentials) -> Result<(), SystemError> {
        let path = &self.credentials_path;
        let io_err = |e: std::io::Error, op: &str| classify_io_error(e, Some(path.clone()), op);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(e, "create config directory"))?;
        }

        let file = File::create(path).map_err(|e| io_err(e, "write credentials"))?;
        restrict_permissions(&file).map_err(|e| io_err(e, "restrict credentials"))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials).map_err(|e| {
            SystemError::IoError {
                operation: "write credentials".to_string(),
                path: Some(path.clone()),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|e| io_err(e, "write credentials"))
    }

    /// Remove the credentials file. Succeeds when there is nothing to remove.
    pub fn clear(&self) -> Result<(), SystemError> {
        match fs::remove_file(&self.credentials_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(classify_io_error(
                e,
                Some(self.credentials_path.clone()),
                "delete credentials",
            )),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(file: &File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> std::io::Result<()> {
    Ok(())
}
