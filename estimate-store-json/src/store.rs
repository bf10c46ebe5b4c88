//! JSON key-value file store.
//!
//! The browser original kept its state as JSON blobs under a few
//! localStorage keys. This backend keeps the same shape on disk: one JSON
//! file per key inside a data directory, plus a `version` stamp. Blob
//! granularity is unchanged — saved estimates live in a single file that is
//! rewritten whole, exactly like the original's `saved_estimates` key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use estimate_core::models::{AppSettings, CompanyInfo, SavedEstimate};
use estimate_core::store::{EstimateStore, StoreError};

/// On-disk data format version, stamped into the data directory and into
/// export bundles.
pub const DATA_VERSION: &str = "1.1.0";

const SETTINGS_FILE: &str = "settings.json";
const COMPANY_INFO_FILE: &str = "company_info.json";
const SAVED_ESTIMATES_FILE: &str = "saved_estimates.json";
const VERSION_FILE: &str = "version";
const PROBE_FILE: &str = ".probe";

/// File-backed [`EstimateStore`].
pub struct JsonFileStore {
    root: PathBuf,
}

/// Reads the settings blob without opening a store and without logging.
///
/// The CLI needs the stored debug flag to pick its log filter before any
/// subscriber exists; going through [`JsonFileStore::open`] at that point
/// would drop the open/load log events. A missing or corrupt blob yields
/// the defaults, same as the store's own load path.
pub fn peek_settings(root: &Path) -> AppSettings {
    fs::read_to_string(root.join(SETTINGS_FILE))
        .ok()
        .and_then(|text| serde_json::from_str::<AppSettings>(&text).ok())
        .unwrap_or_default()
        .sanitized()
}

impl JsonFileStore {
    /// Opens (creating if needed) the store at `root`.
    ///
    /// Probes writability the way the original probed localStorage: a
    /// throwaway write plus removal. A store that cannot take the probe is
    /// reported as [`StoreError::Unavailable`] up front instead of failing
    /// on the first save.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", root.display())))?;

        let probe = root.join(PROBE_FILE);
        fs::write(&probe, b"probe")
            .and_then(|()| fs::remove_file(&probe))
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", root.display())))?;

        let store = Self { root };
        store.stamp_version()?;
        debug!(root = %store.root.display(), "opened estimate store");
        Ok(store)
    }

    /// Directory this store lives in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stored data-format version, if the stamp exists.
    pub fn data_version(&self) -> Option<String> {
        fs::read_to_string(self.root.join(VERSION_FILE))
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn stamp_version(&self) -> Result<(), StoreError> {
        let path = self.root.join(VERSION_FILE);
        if !path.exists() {
            fs::write(&path, DATA_VERSION).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(())
    }

    /// Loads a blob, falling back to its default when the file is missing
    /// or unreadable as JSON. Corruption is logged, not propagated; the
    /// original resets the blob and keeps going.
    fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        file: &str,
    ) -> Result<T, StoreError> {
        let path = self.root.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(file, error = %e, "corrupt blob, falling back to default");
                Ok(T::default())
            }
        }
    }

    /// Writes a blob through a temp file and rename, so a crash mid-write
    /// cannot leave a half-written JSON file behind.
    fn write_blob<T: Serialize>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.root.join(file);
        let tmp = self.root.join(format!("{file}.tmp"));
        let mut f = fs::File::create(&tmp).map_err(|e| StoreError::Io(e.to_string()))?;
        f.write_all(json.as_bytes())
            .map_err(|e| StoreError::Io(e.to_string()))?;
        drop(f);
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }

    fn remove_if_present(
        &self,
        file: &str,
    ) -> Result<(), StoreError> {
        match fs::remove_file(self.root.join(file)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

impl EstimateStore for JsonFileStore {
    fn load_settings(&self) -> Result<AppSettings, StoreError> {
        self.load_or_default::<AppSettings>(SETTINGS_FILE)
            .map(AppSettings::sanitized)
    }

    fn save_settings(
        &self,
        settings: &AppSettings,
    ) -> Result<(), StoreError> {
        self.write_blob(SETTINGS_FILE, settings)
    }

    fn load_company_info(&self) -> Result<CompanyInfo, StoreError> {
        self.load_or_default(COMPANY_INFO_FILE)
    }

    fn save_company_info(
        &self,
        info: &CompanyInfo,
    ) -> Result<(), StoreError> {
        self.write_blob(COMPANY_INFO_FILE, info)
    }

    fn list_estimates(&self) -> Result<Vec<SavedEstimate>, StoreError> {
        self.load_or_default(SAVED_ESTIMATES_FILE)
    }

    fn get_estimate(
        &self,
        id: Uuid,
    ) -> Result<SavedEstimate, StoreError> {
        self.list_estimates()?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound)
    }

    fn save_estimate(
        &self,
        estimate: &SavedEstimate,
    ) -> Result<(), StoreError> {
        let mut estimates = self.list_estimates()?;
        match estimates.iter_mut().find(|e| e.id == estimate.id) {
            Some(existing) => *existing = estimate.clone(),
            None => estimates.push(estimate.clone()),
        }
        self.write_blob(SAVED_ESTIMATES_FILE, &estimates)
    }

    fn delete_estimate(
        &self,
        id: Uuid,
    ) -> Result<(), StoreError> {
        let mut estimates = self.list_estimates()?;
        let before = estimates.len();
        estimates.retain(|e| e.id != id);
        if estimates.len() == before {
            return Err(StoreError::NotFound);
        }
        self.write_blob(SAVED_ESTIMATES_FILE, &estimates)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        self.remove_if_present(SETTINGS_FILE)?;
        self.remove_if_present(COMPANY_INFO_FILE)?;
        self.remove_if_present(SAVED_ESTIMATES_FILE)?;
        warn!("all stored settings and estimates cleared");
        Ok(())
    }
}
