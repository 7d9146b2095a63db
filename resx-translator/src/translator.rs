//! The translation batch call.
//!
//! All entries of a document go out in one `POST /translate` request, and the
//! response is matched back to them purely by position. The call either yields one
//! translated string per entry or fails; there is no partial result.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::ServiceConfig,
    error::Error,
    extract::TranslationEntry,
    transport::{HttpRequest, Transport},
};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// One element of the service's response array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationResult {
    #[serde(default)]
    pub translations: Vec<TranslationVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationVariant {
    pub text: String,
    #[serde(default)]
    pub to: String,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    error: ServiceErrorDetail,
}

#[derive(Deserialize)]
struct ServiceErrorDetail {
    message: String,
}

/// Sends translation batches through an injected [`Transport`].
#[derive(Clone)]
pub struct Translator {
    transport: Arc<dyn Transport>,
    config: ServiceConfig,
}

impl Translator {
    pub fn new(transport: Arc<dyn Transport>, config: ServiceConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Translates `entries` from `from` to `to`, returning one string per entry in order.
    ///
    /// An empty batch returns immediately without contacting the service.
    pub async fn translate_batch(
        &self,
        entries: &[TranslationEntry],
        from: &str,
        to: &str,
    ) -> Result<Vec<String>, Error> {
        if entries.is_empty() {
            debug!("nothing to translate, skipping service call");
            return Ok(Vec::new());
        }

        let url = self
            .config
            .url_for("translate", &[("from", from), ("to", to)])?;
        let body = serde_json::to_vec(entries)?;
        let request = HttpRequest::post(url, body)
            .with_header(SUBSCRIPTION_KEY_HEADER, self.config.key.clone())
            .with_header(SUBSCRIPTION_REGION_HEADER, self.config.region.clone())
            .with_header("Content-Type", "application/json; charset=UTF-8");

        debug!(entries = entries.len(), from, to, "sending translation batch");
        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            return Err(Error::TranslationService {
                status: response.status,
                message: service_error_message(&response.body),
            });
        }

        let translated = flatten_results(&response.body);
        if translated.len() != entries.len() {
            return Err(Error::TranslationCountMismatch {
                expected: entries.len(),
                actual: translated.len(),
            });
        }

        debug!(translated = translated.len(), "translation batch complete");
        Ok(translated)
    }
}

/// First variant of every result; a body that does not decode yields nothing.
fn flatten_results(body: &[u8]) -> Vec<String> {
    let results: Vec<TranslationResult> = match serde_json::from_slice(body) {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, "translation response did not decode");
            return Vec::new();
        }
    };

    results
        .into_iter()
        .filter_map(|result| result.translations.into_iter().next())
        .map(|variant| variant.text)
        .collect()
}

fn service_error_message(body: &[u8]) -> String {
    if let Ok(parsed) = serde_json::from_slice::<ServiceErrorBody>(body) {
        return parsed.error.message;
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        "no response body".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_takes_first_variant() {
        let body = br#"[
            {"translations":[{"text":"Bonjour","to":"fr"},{"text":"Salut","to":"fr-CA"}]},
            {"translations":[{"text":"Au revoir","to":"fr"}]}
        ]"#;
        assert_eq!(flatten_results(body), vec!["Bonjour", "Au revoir"]);
    }

    #[test]
    fn test_flatten_skips_empty_variants() {
        let body = br#"[{"translations":[]},{"translations":[{"text":"x","to":"de"}]}]"#;
        assert_eq!(flatten_results(body), vec!["x"]);
    }

    #[test]
    fn test_flatten_malformed_body() {
        assert!(flatten_results(b"<html>gateway error</html>").is_empty());
        assert!(flatten_results(b"{}").is_empty());
    }

    #[test]
    fn test_service_error_message() {
        let body = br#"{"error":{"code":401000,"message":"The request is not authorized because credentials are missing or invalid."}}"#;
        assert_eq!(
            service_error_message(body),
            "The request is not authorized because credentials are missing or invalid."
        );
        assert_eq!(service_error_message(b"  Forbidden \n"), "Forbidden");
        assert_eq!(service_error_message(b""), "no response body");
    }
}
