#![forbid(unsafe_code)]
//! Translate `.resx` resource files through the Microsoft Translator Text API.
//!
//! The crate parses a resx document, checks that it declares schema version 2.0,
//! sends every named `data` value to the service in a single batch, and renders a new
//! resx file with the translated values in the same order under the same names.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use resx_translator::{ReqwestTransport, ServiceConfig, TranslationJob, Translator, translate_file};
//!
//! # async fn run() -> Result<(), resx_translator::Error> {
//! let config = ServiceConfig::new("<subscription key>", "westeurope");
//! let transport = Arc::new(ReqwestTransport::new(&config)?);
//! let translator = Translator::new(transport, config);
//!
//! let job = TranslationJob::new("en", "fr");
//! translate_file("Strings.resx", "Strings.fr.resx", &job, &translator).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! - [`document`]: resx document model and parser
//! - [`validation`]: schema version gate
//! - [`extract`]: ordered entry extraction and positional pairing
//! - [`translator`]: the single batch call to the service
//! - [`render`]: tree and template output strategies
//! - [`catalog`]: supported-language listing with a built-in fallback

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod render;
pub mod traits;
pub mod translator;
pub mod transport;
pub mod validation;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{CachedCatalog, LanguageCatalog, LanguageDescriptor, WritingDirection, fetch_languages},
    config::{DEFAULT_ENDPOINT, ServiceConfig},
    document::{DataRecord, Document, HeaderRecord, RecordHandle},
    error::Error,
    extract::{Extraction, TranslatedRecords, TranslationEntry, extract_entries},
    pipeline::{TranslationJob, TranslationReport, translate_document, translate_file},
    render::{RenderStrategy, Renderer, TemplateRenderer, TreeRenderer},
    translator::Translator,
    transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport},
    validation::validate_version,
};
