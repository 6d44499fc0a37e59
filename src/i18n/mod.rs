//! Internationalization module
//!
//! Provides translations for English (en) and French (fr).
//! Supports automatic language detection based on system locale.

mod en;
mod fr;

use std::collections::HashMap;

/// Language codes with a translation table, and their display names
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("fr", "Fran\u{00E7}ais")];

/// Internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    current_lang: String,
    translations: HashMap<String, String>,
}

impl I18n {
    /// Create a new I18n instance with the specified language
    pub fn new(lang: &str) -> Self {
        let mut i18n = Self {
            current_lang: String::new(),
            translations: HashMap::new(),
        };
        i18n.set_language(lang);
        i18n
    }

    /// Set the current language
    pub fn set_language(&mut self, lang: &str) {
        let lang = if lang == "auto" {
            detect_system_language()
        } else {
            lang.to_string()
        };

        self.translations = match lang.as_str() {
            "fr" => fr::get_translations(),
            _ => en::get_translations(),
        };
        self.current_lang = if lang == "fr" { lang } else { "en".to_string() };

        log::debug!("Language set to: {}", self.current_lang);
    }

    /// Get a translated string by key
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Get a translated string with `{name}` placeholders filled in
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }

    /// Get the current language code
    pub fn current_language(&self) -> &str {
        &self.current_lang
    }

    /// Whether `lang` is accepted by `new` without falling back ("auto" included)
    pub fn is_supported(lang: &str) -> bool {
        lang == "auto" || LANGUAGES.iter().any(|(code, _)| *code == lang)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("en")
    }
}

/// Detect system language from the usual locale variables
fn detect_system_language() -> String {
    let lang_env = std::env::var("LANG")
        .or_else(|_| std::env::var("LC_ALL"))
        .or_else(|_| std::env::var("LC_MESSAGES"))
        .unwrap_or_else(|_| "en".to_string());

    // "fr_FR.UTF-8" -> "fr"
    let lang_code = lang_env
        .split('_')
        .next()
        .unwrap_or("en")
        .split('.')
        .next()
        .unwrap_or("en");

    match lang_code {
        "fr" => "fr".to_string(),
        _ => "en".to_string(),
    }
}
