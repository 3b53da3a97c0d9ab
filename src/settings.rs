//! User preferences
//!
//! Persisted separately from the round under their own key.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Scorecard preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Address the mail export is sent to
    pub export_recipient: Option<String>,
    /// Ask before wiping the card for a new round
    pub confirm_new_round: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_recipient: None,
            confirm_new_round: true,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "golf-score-settings";

    /// Set the export address; blank input clears it
    pub fn set_export_recipient(&mut self, recipient: &str) {
        let recipient = recipient.trim();
        self.export_recipient = (!recipient.is_empty()).then(|| recipient.to_string());
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(err) => log::warn!("Stored settings are corrupt: {err}"),
            },
            Ok(None) => {}
            Err(err) => log::warn!("Could not read settings: {err}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Forget stored settings; the next load gives defaults
    pub fn clear(storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.remove_item(Self::STORAGE_KEY)?;
        log::info!("Settings cleared");
        Ok(())
    }
}
