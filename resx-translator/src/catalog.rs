//! Supported-language catalog.
//!
//! The catalog only feeds language pickers; translation itself works with bare codes.
//! Fetching therefore never fails: any problem yields an empty catalog, and callers
//! fall back to the built-in list with [`LanguageCatalog::or_builtin`].

use std::{collections::BTreeMap, sync::Arc};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    config::ServiceConfig,
    error::Error,
    transport::{HttpRequest, Transport},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingDirection {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageDescriptor {
    pub code: String,
    /// Name in the service's display language (English unless configured otherwise).
    pub name: String,
    pub native_name: String,
    pub direction: WritingDirection,
}

/// Languages keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, LanguageDescriptor>,
}

#[derive(Deserialize)]
struct LanguagesResponse {
    #[serde(default)]
    translation: BTreeMap<String, WireLanguage>,
}

#[derive(Deserialize)]
struct WireLanguage {
    name: String,
    #[serde(rename = "nativeName")]
    native_name: String,
    #[serde(default)]
    dir: WritingDirection,
}

lazy_static! {
    static ref BUILTIN_CATALOG: LanguageCatalog = {
        use WritingDirection::*;
        let table: &[(&str, &str, &str, WritingDirection)] = &[
            ("ar", "Arabic", "العربية", Rtl),
            ("bg", "Bulgarian", "Български", Ltr),
            ("cs", "Czech", "Čeština", Ltr),
            ("da", "Danish", "Dansk", Ltr),
            ("de", "German", "Deutsch", Ltr),
            ("el", "Greek", "Ελληνικά", Ltr),
            ("en", "English", "English", Ltr),
            ("es", "Spanish", "Español", Ltr),
            ("fa", "Persian", "فارسی", Rtl),
            ("fi", "Finnish", "Suomi", Ltr),
            ("fr", "French", "Français", Ltr),
            ("he", "Hebrew", "עברית", Rtl),
            ("hi", "Hindi", "हिन्दी", Ltr),
            ("hu", "Hungarian", "Magyar", Ltr),
            ("id", "Indonesian", "Indonesia", Ltr),
            ("it", "Italian", "Italiano", Ltr),
            ("ja", "Japanese", "日本語", Ltr),
            ("ko", "Korean", "한국어", Ltr),
            ("nb", "Norwegian", "Norsk Bokmål", Ltr),
            ("nl", "Dutch", "Nederlands", Ltr),
            ("pl", "Polish", "Polski", Ltr),
            ("pt", "Portuguese (Brazil)", "Português (Brasil)", Ltr),
            ("pt-pt", "Portuguese (Portugal)", "Português (Portugal)", Ltr),
            ("ro", "Romanian", "Română", Ltr),
            ("ru", "Russian", "Русский", Ltr),
            ("sk", "Slovak", "Slovenčina", Ltr),
            ("sv", "Swedish", "Svenska", Ltr),
            ("th", "Thai", "ไทย", Ltr),
            ("tr", "Turkish", "Türkçe", Ltr),
            ("uk", "Ukrainian", "Українська", Ltr),
            ("ur", "Urdu", "اردو", Rtl),
            ("vi", "Vietnamese", "Tiếng Việt", Ltr),
            ("zh-Hans", "Chinese Simplified", "中文 (简体)", Ltr),
            ("zh-Hant", "Chinese Traditional", "繁體中文 (繁體)", Ltr),
        ];
        table
            .iter()
            .map(|(code, name, native_name, direction)| LanguageDescriptor {
                code: code.to_string(),
                name: name.to_string(),
                native_name: native_name.to_string(),
                direction: *direction,
            })
            .collect()
    };
}

impl FromIterator<LanguageDescriptor> for LanguageCatalog {
    fn from_iter<I: IntoIterator<Item = LanguageDescriptor>>(iter: I) -> Self {
        Self {
            languages: iter
                .into_iter()
                .map(|language| (language.code.clone(), language))
                .collect(),
        }
    }
}

impl LanguageCatalog {
    /// The static list shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN_CATALOG.clone()
    }

    /// Returns `self`, or the built-in list when `self` is empty.
    pub fn or_builtin(self) -> Self {
        if self.is_empty() { Self::builtin() } else { self }
    }

    /// Parses the body of `GET /languages?scope=translation`.
    pub fn from_response_body(body: &[u8]) -> Result<Self, Error> {
        let response: LanguagesResponse = serde_json::from_slice(body)?;
        Ok(response
            .translation
            .into_iter()
            .map(|(code, wire)| LanguageDescriptor {
                code,
                name: wire.name,
                native_name: wire.native_name,
                direction: wire.dir,
            })
            .collect())
    }

    pub fn get(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Descriptors ordered by code.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageDescriptor> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

/// Fetches the catalog once; returns an empty catalog on any failure.
pub async fn fetch_languages(transport: &dyn Transport, config: &ServiceConfig) -> LanguageCatalog {
    match try_fetch_languages(transport, config).await {
        Ok(catalog) => {
            debug!(languages = catalog.len(), "fetched language catalog");
            catalog
        }
        Err(e) => {
            warn!(error = %e, "language catalog unavailable");
            LanguageCatalog::default()
        }
    }
}

async fn try_fetch_languages(
    transport: &dyn Transport,
    config: &ServiceConfig,
) -> Result<LanguageCatalog, Error> {
    let url = config.url_for("languages", &[("scope", "translation")])?;
    let response = transport.execute(HttpRequest::get(url)).await?;
    if !response.is_success() {
        return Err(Error::TranslationService {
            status: response.status,
            message: "language listing failed".to_string(),
        });
    }
    LanguageCatalog::from_response_body(&response.body)
}

/// A catalog fetched at most once per instance.
///
/// A successful fetch is kept and served read-only afterwards; failed fetches are
/// not remembered, so the next call asks the service again.
pub struct CachedCatalog {
    transport: Arc<dyn Transport>,
    config: ServiceConfig,
    cell: OnceCell<LanguageCatalog>,
}

impl CachedCatalog {
    pub fn new(transport: Arc<dyn Transport>, config: ServiceConfig) -> Self {
        Self {
            transport,
            config,
            cell: OnceCell::new(),
        }
    }

    /// The fetched catalog, or `None` if the service could not provide one.
    pub async fn get(&self) -> Option<&LanguageCatalog> {
        self.cell
            .get_or_try_init(|| async {
                let catalog = fetch_languages(self.transport.as_ref(), &self.config).await;
                if catalog.is_empty() { Err(()) } else { Ok(catalog) }
            })
            .await
            .ok()
    }

    /// The fetched catalog, or the built-in list.
    pub async fn languages(&self) -> LanguageCatalog {
        match self.get().await {
            Some(catalog) => catalog.clone(),
            None => LanguageCatalog::builtin(),
        }
    }
}
