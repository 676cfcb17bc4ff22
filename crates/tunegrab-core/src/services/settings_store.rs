//! Live download options.
//!
//! The store hands out copies. A batch dispatched with one copy is never
//! affected by later changes to the store.

use std::sync::{PoisonError, RwLock};

use crate::download::DownloadOptions;
use crate::settings::{OptionsUpdate, SettingsError, validate_options};

/// Holder of the options the next batch will be dispatched with.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<DownloadOptions>,
}

impl SettingsStore {
    /// Create a store seeded with `initial`.
    pub fn new(initial: DownloadOptions) -> Result<Self, SettingsError> {
        validate_options(&initial)?;
        Ok(Self {
            current: RwLock::new(initial),
        })
    }

    /// Copy of the current options.
    pub fn current(&self) -> DownloadOptions {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the options wholesale.
    pub fn replace(&self, options: DownloadOptions) -> Result<(), SettingsError> {
        validate_options(&options)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = options;
        Ok(())
    }

    /// Apply a partial update and return the resulting options.
    ///
    /// The update is validated as a whole; on error nothing changes.
    pub fn apply(&self, update: &OptionsUpdate) -> Result<DownloadOptions, SettingsError> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = guard.clone();
        next.merge(update);
        validate_options(&next)?;

        tracing::debug!(
            target: "tunegrab.settings",
            format = %next.audio_format,
            quality = %next.audio_quality,
            thumbnail = next.embed_thumbnail,
            metadata = next.add_metadata,
            "Options updated"
        );
        guard.clone_from(&next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::{AudioFormat, AudioQuality};

    #[test]
    fn test_defaults() {
        let store = SettingsStore::default();
        assert_eq!(store.current(), DownloadOptions::default());
    }

    #[test]
    fn test_new_rejects_invalid() {
        let result = SettingsStore::new(DownloadOptions::default().with_template(""));
        assert!(matches!(result, Err(SettingsError::EmptyOutputTemplate)));
    }

    #[test]
    fn test_current_is_a_copy() {
        let store = SettingsStore::default();
        let before = store.current();

        store
            .replace(DownloadOptions::default().with_format(AudioFormat::Flac))
            .unwrap();

        assert_eq!(before.audio_format, AudioFormat::Mp3);
        assert_eq!(store.current().audio_format, AudioFormat::Flac);
    }

    #[test]
    fn test_apply_merges() {
        let store = SettingsStore::default();
        let updated = store
            .apply(&OptionsUpdate {
                audio_quality: Some(AudioQuality::Low),
                add_metadata: Some(false),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.audio_quality, AudioQuality::Low);
        assert!(!updated.add_metadata);
        assert_eq!(store.current(), updated);
    }

    #[test]
    fn test_invalid_update_changes_nothing() {
        let store = SettingsStore::default();
        let result = store.apply(&OptionsUpdate {
            audio_format: Some(AudioFormat::Wav),
            output_template: Some("   ".to_string()),
            ..Default::default()
        });

        assert_eq!(result, Err(SettingsError::EmptyOutputTemplate));
        assert_eq!(store.current(), DownloadOptions::default());
    }
}
