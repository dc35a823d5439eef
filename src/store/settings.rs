use std::fmt;

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    storage::{LocalStorage, FONT_SIZE_KEY, LANGUAGE_KEY, REDUCED_MOTION_KEY},
};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "English (US)")]
    EnglishUs,
    Spanish,
    French,
    German,
}

impl Language {
    pub const ALL: [Language; 4] = [Self::EnglishUs, Self::Spanish, Self::French, Self::German];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::EnglishUs => "English (US)",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
        }
    }
    pub const fn locale(&self) -> &'static str {
        match self {
            Self::EnglishUs => "en-US",
            Self::Spanish => "es-ES",
            Self::French => "fr-FR",
            Self::German => "de-DE",
        }
    }
    pub const fn page_title(&self) -> &'static str {
        match self {
            Self::EnglishUs => "Chirper - Home",
            Self::Spanish => "Chirper - Inicio",
            Self::French => "Chirper - Accueil",
            Self::German => "Chirper - Startseite",
        }
    }

    /// Look up a language by label; anything unknown maps to the first option
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|language| language.label() == label.trim())
            .unwrap_or_else(|| {
                warn!("Unknown language `{}`, using {}", label, Self::default());
                Self::default()
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Preferences mirrored into local storage on every change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub language: Language,
    pub font_size: FontSize,
    pub reduced_motion: bool,
    pub error: Option<String>,
}

impl SettingsState {
    /// Settings as last persisted, defaults where nothing usable is stored
    pub fn load(storage: &impl LocalStorage) -> Self {
        let language = storage
            .load::<String>(LANGUAGE_KEY)
            .map(|label| Language::from_label(&label))
            .unwrap_or_default();
        Self {
            language,
            font_size: storage.load(FONT_SIZE_KEY).unwrap_or_default(),
            reduced_motion: storage.load(REDUCED_MOTION_KEY).unwrap_or_default(),
            error: None,
        }
    }

    pub fn locale(&self) -> &'static str {
        self.language.locale()
    }
    pub fn page_title(&self) -> &'static str {
        self.language.page_title()
    }

    pub fn set_language(&mut self, storage: &mut impl LocalStorage, value: &str) -> Result<Language> {
        let language = Language::from_label(value);
        self.language = language;
        storage.save(LANGUAGE_KEY, &language.label())?;
        info!("Language set to {} ({})", language, language.locale());
        Ok(language)
    }

    pub fn set_font_size(&mut self, storage: &mut impl LocalStorage, font_size: FontSize) -> Result<()> {
        self.font_size = font_size;
        storage.save(FONT_SIZE_KEY, &font_size)
    }

    pub fn toggle_reduced_motion(&mut self, storage: &mut impl LocalStorage) -> Result<bool> {
        self.reduced_motion = !self.reduced_motion;
        storage.save(REDUCED_MOTION_KEY, &self.reduced_motion)?;
        Ok(self.reduced_motion)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStorage;

    use super::*;

    #[test]
    fn language_survives_reload() {
        for language in Language::ALL {
            let mut storage = MemoryStorage::new();
            let mut settings = SettingsState::load(&storage);
            settings.set_language(&mut storage, language.label()).unwrap();

            let reloaded = SettingsState::load(&storage);
            assert_eq!(reloaded.language, language);
            assert_eq!(
                storage.get_item(LANGUAGE_KEY).unwrap(),
                Some(format!("\"{}\"", language.label()))
            );
        }
    }

    #[test]
    fn unknown_language_falls_back() {
        let mut storage = MemoryStorage::new();
        let mut settings = SettingsState::load(&storage);
        settings.set_language(&mut storage, "Spanish").unwrap();

        let language = settings.set_language(&mut storage, "Klingon").unwrap();
        assert_eq!(language, Language::EnglishUs);
        assert_eq!(settings.locale(), "en-US");
        assert_eq!(SettingsState::load(&storage).language, Language::EnglishUs);
    }

    #[test]
    fn language_derives_locale_and_title() {
        let mut storage = MemoryStorage::new();
        let mut settings = SettingsState::default();
        settings.set_language(&mut storage, "German").unwrap();
        assert_eq!(settings.locale(), "de-DE");
        assert_eq!(settings.page_title(), "Chirper - Startseite");
    }

    #[test]
    fn defaults_when_nothing_stored() {
        let mut storage = MemoryStorage::new();
        storage.set_item(FONT_SIZE_KEY, "\"huge\"").unwrap();

        let settings = SettingsState::load(&storage);
        assert_eq!(settings.language, Language::EnglishUs);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(!settings.reduced_motion);
    }

    #[test]
    fn font_size_and_motion_write_through() {
        let mut storage = MemoryStorage::new();
        let mut settings = SettingsState::load(&storage);
        settings.set_font_size(&mut storage, FontSize::Large).unwrap();
        assert!(settings.toggle_reduced_motion(&mut storage).unwrap());

        let reloaded = SettingsState::load(&storage);
        assert_eq!(reloaded.font_size, FontSize::Large);
        assert!(reloaded.reduced_motion);

        let mut settings = reloaded;
        assert!(!settings.toggle_reduced_motion(&mut storage).unwrap());
        assert!(!SettingsState::load(&storage).reduced_motion);
    }
}
