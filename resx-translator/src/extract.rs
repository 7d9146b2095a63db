//! Entry extraction: turns a document into the ordered list of texts to translate.
//!
//! [`translatable_records`] is the single traversal that decides which records take
//! part in a run. Extraction records the handles it visited, and the renderers only
//! ever look records up through those handles, so the Nth translated string always
//! lands on the Nth extracted record.

use serde::Serialize;

use crate::{
    document::{DataRecord, Document, RecordHandle},
    error::Error,
};

/// One unit of text sent to the translation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationEntry {
    #[serde(rename = "Text")]
    pub text: String,
}

impl TranslationEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Named data records in document order.
pub fn translatable_records(
    document: &Document,
) -> impl Iterator<Item = (RecordHandle, &str, &DataRecord)> {
    document
        .records()
        .filter_map(|(handle, record)| record.name.as_deref().map(|name| (handle, name, record)))
}

/// Text sent for a record: verbatim under `xml:space="preserve"`, trimmed otherwise.
pub fn entry_text(record: &DataRecord) -> &str {
    if record.preserve_whitespace {
        &record.value
    } else {
        record.value.trim()
    }
}

/// The ordered entries of one run together with the records they came from.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    handles: Vec<RecordHandle>,
    entries: Vec<TranslationEntry>,
}

impl Extraction {
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn handles(&self) -> &[RecordHandle] {
        &self.handles
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds translated strings to the extracted records by position.
    ///
    /// Fails with [`Error::TranslationCountMismatch`] unless there is exactly one
    /// string per entry; nothing is ever partially applied.
    pub fn pair_with(&self, translations: Vec<String>) -> Result<TranslatedRecords, Error> {
        if translations.len() != self.handles.len() {
            return Err(Error::TranslationCountMismatch {
                expected: self.handles.len(),
                actual: translations.len(),
            });
        }
        Ok(TranslatedRecords {
            pairs: self.handles.iter().copied().zip(translations).collect(),
        })
    }
}

/// Translated values keyed by the handle of the record they replace.
#[derive(Debug, Clone, Default)]
pub struct TranslatedRecords {
    pairs: Vec<(RecordHandle, String)>,
}

impl TranslatedRecords {
    /// Pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordHandle, &str)> {
        self.pairs.iter().map(|(h, v)| (*h, v.as_str()))
    }

    pub fn get(&self, handle: RecordHandle) -> Option<&str> {
        self.pairs
            .binary_search_by_key(&handle, |(h, _)| *h)
            .ok()
            .map(|i| self.pairs[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Walks the document once and collects one entry per named data record.
pub fn extract_entries(document: &Document) -> Extraction {
    let (handles, entries) = translatable_records(document)
        .map(|(handle, _, record)| (handle, TranslationEntry::new(entry_text(record))))
        .unzip();
    Extraction { handles, entries }
}
