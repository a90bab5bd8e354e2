//! Bill-in-progress session persistence.
//!
//! The CLI keeps the bill being assembled in a JSON file between
//! invocations; the file is the single-session analogue of per-user UI
//! state. Finalizing or abandoning the bill clears it.

use billing_engine::models::Bill;
use hospital_core::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the bill-in-progress, if a session exists.
    pub fn load(&self) -> Result<Option<Bill>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let bill = serde_json::from_str(&raw)?;
        Ok(Some(bill))
    }

    /// Load the bill-in-progress, failing when no session exists.
    pub fn load_required(&self) -> Result<Bill, AppError> {
        self.load()?.ok_or_else(|| {
            AppError::NotFound(anyhow::anyhow!(
                "no bill in progress; run `hospbill bill new` first"
            ))
        })
    }

    pub fn save(&self, bill: &Bill) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(bill)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
