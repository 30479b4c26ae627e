// prefs.rs — persisted user preferences
//
// Stored as JSON at <config_dir>/mega_comparison/prefs.json:
//   { "language": "zh" }

use crate::error::{Error, Result};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "mega_comparison";
const PREFS_FILE: &str = "prefs.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub language: Option<Language>,
}

pub fn prefs_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join(PREFS_FILE))
        .ok_or(Error::NoConfigDir)
}

impl Prefs {
    /// Read prefs from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the platform location; any failure is logged and yields defaults.
    pub fn load() -> Self {
        let loaded = prefs_path().and_then(|p| {
            let prefs = Self::load_from(&p)?;
            log::debug!(
                "{}",
                crate::i18n::tr_with("log.prefs_loaded", &[("path", p.display().to_string())])
            );
            Ok(prefs)
        });
        loaded.unwrap_or_else(|e| {
            log::warn!(
                "{}",
                crate::i18n::tr_with("error.prefs_load", &[("err", e.to_string())])
            );
            Self::default()
        })
    }

    /// Save to the platform location; failures are only logged.
    pub fn save(&self) {
        match prefs_path().and_then(|p| self.save_to(&p).map(|_| p)) {
            Ok(p) => log::debug!(
                "{}",
                crate::i18n::tr_with("log.prefs_saved", &[("path", p.display().to_string())])
            ),
            Err(e) => log::warn!(
                "{}",
                crate::i18n::tr_with("error.prefs_save", &[("err", e.to_string())])
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mega_comparison_prefs_{}_{}", tag, std::process::id()))
            .join(PREFS_FILE)
    }

    #[test]
    fn test_missing_file_is_default() {
        let prefs = Prefs::load_from(&temp_path("missing")).expect("defaults");
        assert_eq!(prefs, Prefs::default());
        assert_eq!(prefs.language, None);
    }

    #[test]
    fn test_language_persists_under_fixed_key() {
        let path = temp_path("save");
        let prefs = Prefs { language: Some(Language::Zh) };
        prefs.save_to(&path).expect("save");

        let raw = std::fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["language"], "zh");

        assert_eq!(Prefs::load_from(&path).expect("load"), prefs);
        let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, "{ not json").expect("write");
        let err = Prefs::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        let _ = std::fs::remove_dir_all(path.parent().expect("parent"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let prefs: Prefs = serde_json::from_str(r#"{"language":"en","theme":"dark"}"#).expect("parse");
        assert_eq!(prefs.language, Some(Language::En));
        let empty: Prefs = serde_json::from_str("{}").expect("parse");
        assert_eq!(empty.language, None);
    }
}
