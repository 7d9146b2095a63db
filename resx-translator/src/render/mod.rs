//! Output rendering: turns a document plus its translated values into resx bytes.
//!
//! Two interchangeable strategies implement [`Renderer`]:
//!
//! - [`TemplateRenderer`] regenerates the file from the fixed resx preamble and one
//!   `<data>` snippet per translated record.
//! - [`TreeRenderer`] re-serializes the parsed document, keeping opaque elements such
//!   as `assembly` or `metadata`, and swapping in the translated values.
//!
//! Both emit every translated record with `xml:space="preserve"`, drop comments and
//! nameless records, and declare the four standard resx headers.

pub mod boilerplate;
pub mod template;
pub mod tree;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use template::TemplateRenderer;
pub use tree::TreeRenderer;

use crate::{
    document::Document,
    error::Error,
    extract::{TranslatedRecords, translatable_records},
};

/// Produces the bytes of a translated resx file.
pub trait Renderer: Send + Sync {
    fn render(&self, document: &Document, translated: &TranslatedRecords) -> Result<Vec<u8>, Error>;
}

/// Selects one of the available [`Renderer`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStrategy {
    /// Re-serialize the parsed document.
    Tree,
    /// Regenerate the file from the fixed resx template.
    #[default]
    Template,
}

impl RenderStrategy {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderStrategy::Tree => Box::new(TreeRenderer),
            RenderStrategy::Template => Box::new(TemplateRenderer),
        }
    }
}

impl Display for RenderStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderStrategy::Tree => write!(f, "tree"),
            RenderStrategy::Template => write!(f, "template"),
        }
    }
}

/// Accepts `tree` and `template`, case-insensitively.
impl FromStr for RenderStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(RenderStrategy::Tree),
            "template" => Ok(RenderStrategy::Template),
            other => Err(Error::invalid_input(format!(
                "unknown render strategy `{other}` (expected `tree` or `template`)"
            ))),
        }
    }
}

/// Ensures `translated` covers exactly the named records of `document`.
pub(crate) fn check_alignment(
    document: &Document,
    translated: &TranslatedRecords,
) -> Result<(), Error> {
    let expected = translatable_records(document).count();
    if expected != translated.len() {
        return Err(Error::TranslationCountMismatch {
            expected,
            actual: translated.len(),
        });
    }
    for (handle, _) in translated.iter() {
        let named = document
            .record(handle)
            .is_some_and(|record| record.name.is_some());
        if !named {
            return Err(Error::invalid_input(format!(
                "translated value refers to item {} which is not a named data record",
                handle.index()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::{DataRecord, HeaderRecord},
        extract::extract_entries,
        traits::Parser,
        validation::validate_version,
    };

    fn sample_document() -> Document {
        let mut document = Document::new();
        document.push_header(HeaderRecord::new("version", "2.0"));
        document.push_record(DataRecord::new("Greeting", "Hello").with_comment("hi"));
        document.push_record(DataRecord {
            name: None,
            value: "orphan".to_string(),
            ..DataRecord::default()
        });
        document.push_record(DataRecord::new("Farewell", "Goodbye").with_preserve_whitespace(true));
        document
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            RenderStrategy::from_str("tree").unwrap(),
            RenderStrategy::Tree
        );
        assert_eq!(
            RenderStrategy::from_str(" TEMPLATE ").unwrap(),
            RenderStrategy::Template
        );
        assert!(RenderStrategy::from_str("xslt").is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [RenderStrategy::Tree, RenderStrategy::Template] {
            assert_eq!(
                RenderStrategy::from_str(&strategy.to_string()).unwrap(),
                strategy
            );
        }
        assert_eq!(RenderStrategy::default(), RenderStrategy::Template);
    }

    #[test]
    fn test_strategies_agree_on_structure() {
        let document = sample_document();
        let extraction = extract_entries(&document);
        let translated = extraction
            .pair_with(vec!["Bonjour".to_string(), "Au revoir".to_string()])
            .unwrap();

        let mut outputs = Vec::new();
        for strategy in [RenderStrategy::Tree, RenderStrategy::Template] {
            let bytes = strategy.renderer().render(&document, &translated).unwrap();
            let reparsed = Document::from_bytes(&bytes).unwrap();
            validate_version(&reparsed).unwrap();

            let records: Vec<_> = reparsed
                .records()
                .map(|(_, r)| (r.name.clone().unwrap(), r.value.clone(), r.comment.clone()))
                .collect();
            let mut headers: Vec<_> = reparsed
                .headers()
                .map(|h| (h.name.clone(), h.value.clone()))
                .collect();
            headers.sort();
            outputs.push((records, headers));
        }

        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(
            outputs[0].0,
            vec![
                ("Greeting".to_string(), "Bonjour".to_string(), None),
                ("Farewell".to_string(), "Au revoir".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_mismatched_translations_are_rejected() {
        let document = sample_document();
        let other = Document::from_str(
            r#"<root><resheader name="version"><value>2.0</value></resheader><data name="Only"><value>x</value></data></root>"#,
        )
        .unwrap();
        let translated = extract_entries(&other)
            .pair_with(vec!["y".to_string()])
            .unwrap();

        for strategy in [RenderStrategy::Tree, RenderStrategy::Template] {
            let result = strategy.renderer().render(&document, &translated);
            assert!(matches!(
                result,
                Err(Error::TranslationCountMismatch {
                    expected: 2,
                    actual: 1
                })
            ));
        }
    }
}
