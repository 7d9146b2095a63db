//! End-to-end translation of one resx document.
//!
//! The stages run strictly in sequence: validate inputs, parse, check the schema
//! version, extract entries, one translate call, pair results with records, render.
//! Every input check happens before the network is touched, and nothing is written
//! unless all stages succeeded.
//!
//! The returned futures hold no resources beyond the in-flight request; dropping one
//! abandons the run and leaves the destination untouched.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use unic_langid::LanguageIdentifier;

use crate::{
    document::Document,
    error::Error,
    extract::extract_entries,
    render::RenderStrategy,
    traits::Parser,
    translator::Translator,
    validation::validate_version,
};

/// What to translate into what, and how to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub source_language: String,
    pub target_language: String,
    pub strategy: RenderStrategy,
}

impl TranslationJob {
    pub fn new(source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            strategy: RenderStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: RenderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Rejects empty, malformed or identical language codes.
    pub fn validate(&self) -> Result<(), Error> {
        let source = parse_language(&self.source_language, "source")?;
        let target = parse_language(&self.target_language, "target")?;
        if source == target {
            return Err(Error::invalid_input(format!(
                "source and target language are both `{}`",
                self.source_language.trim()
            )));
        }
        Ok(())
    }
}

fn parse_language(code: &str, role: &str) -> Result<LanguageIdentifier, Error> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::invalid_input(format!("{role} language is empty")));
    }
    code.parse::<LanguageIdentifier>().map_err(|_| {
        Error::invalid_input(format!("{role} language `{code}` is not a valid language code"))
    })
}

/// Outcome of [`translate_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    pub output: PathBuf,
    /// Number of data records written with translated values.
    pub records: usize,
    pub bytes: usize,
}

/// Translates a resx document held in memory and returns the output file's bytes.
pub async fn translate_document(
    source: &[u8],
    job: &TranslationJob,
    translator: &Translator,
) -> Result<Vec<u8>, Error> {
    run(source, job, translator).await.map(|(bytes, _)| bytes)
}

/// Reads `input`, translates it, and writes the result to `output`.
///
/// `output` is only created once the translated bytes exist, so a failed run never
/// leaves a partial file behind and never modifies `input`.
pub async fn translate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    job: &TranslationJob,
    translator: &Translator,
) -> Result<TranslationReport, Error> {
    let input = input.as_ref();
    let output = output.as_ref();

    check_request(job, translator)?;
    let source = tokio::fs::read(input)
        .await
        .map_err(|e| Error::invalid_input(format!("cannot read `{}`: {e}", input.display())))?;

    let (bytes, records) = run(&source, job, translator).await?;

    tokio::fs::write(output, &bytes)
        .await
        .map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        records,
        from = %job.source_language,
        to = %job.target_language,
        "translated resource file"
    );
    Ok(TranslationReport {
        output: output.to_path_buf(),
        records,
        bytes: bytes.len(),
    })
}

fn check_request(job: &TranslationJob, translator: &Translator) -> Result<(), Error> {
    job.validate()?;
    translator.config().validate()
}

async fn run(
    source: &[u8],
    job: &TranslationJob,
    translator: &Translator,
) -> Result<(Vec<u8>, usize), Error> {
    check_request(job, translator)?;

    let document = Document::from_bytes(source)?;
    validate_version(&document)?;

    let extraction = extract_entries(&document);
    debug!(entries = extraction.len(), "extracted translatable records");

    let translations = translator
        .translate_batch(
            extraction.entries(),
            job.source_language.trim(),
            job.target_language.trim(),
        )
        .await?;
    let translated = extraction.pair_with(translations)?;

    let bytes = job.strategy.renderer().render(&document, &translated)?;
    Ok((bytes, translated.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_rejects_identical_languages() {
        let job = TranslationJob::new("fr", "fr");
        assert!(matches!(job.validate(), Err(Error::InvalidInput(_))));

        let job = TranslationJob::new("en-US", " en-us ");
        assert!(matches!(job.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_job_rejects_empty_or_malformed_codes() {
        assert!(TranslationJob::new("", "fr").validate().is_err());
        assert!(TranslationJob::new("en", "  ").validate().is_err());
        assert!(TranslationJob::new("en", "not a code").validate().is_err());
    }

    #[test]
    fn test_job_accepts_distinct_codes() {
        assert!(TranslationJob::new("en", "fr").validate().is_ok());
        assert!(TranslationJob::new("zh-Hans", "zh-Hant").validate().is_ok());
        assert!(TranslationJob::new("pt", "pt-PT").validate().is_ok());
    }

    #[test]
    fn test_job_default_strategy() {
        let job = TranslationJob::new("en", "de").with_strategy(RenderStrategy::Tree);
        assert_eq!(job.strategy, RenderStrategy::Tree);
        assert_eq!(
            TranslationJob::new("en", "de").strategy,
            RenderStrategy::Template
        );
    }
}
