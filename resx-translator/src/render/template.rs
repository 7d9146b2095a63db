//! Template rendering: the fixed resx preamble plus one snippet per record.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::{
    document::{Document, ROOT_ELEMENT},
    error::Error,
    extract::TranslatedRecords,
    render::{
        Renderer,
        boilerplate::{SCHEMA, SCHEMA_COMMENT, STANDARD_HEADERS, XML_DECLARATION, indented},
        check_alignment,
    },
};

/// Regenerates the output file as text instead of serializing the parsed tree.
///
/// Only the record names and translated values are taken from the document, so the
/// output is always the canonical resx shape regardless of how the input was laid out.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl Renderer for TemplateRenderer {
    fn render(&self, document: &Document, translated: &TranslatedRecords) -> Result<Vec<u8>, Error> {
        check_alignment(document, translated)?;

        let mut content = preamble();
        for (handle, value) in translated.iter() {
            let name = document
                .record(handle)
                .and_then(|record| record.name.as_deref())
                .unwrap_or_default();
            push_record(&mut content, name, value);
        }
        let _ = writeln!(content, "</{ROOT_ELEMENT}>");

        Ok(content.into_bytes())
    }
}

/// Declaration, schema and the four standard headers.
pub fn preamble() -> String {
    let mut content = String::with_capacity(SCHEMA.len() + SCHEMA_COMMENT.len() + 1024);
    let _ = writeln!(content, "{XML_DECLARATION}");
    let _ = writeln!(content, "<{ROOT_ELEMENT}>");
    content.push_str(&indented(SCHEMA_COMMENT, "  "));
    content.push_str(&indented(SCHEMA, "  "));
    for (name, value) in STANDARD_HEADERS {
        let _ = write!(
            content,
            "  <resheader name=\"{}\">\n    <value>{}</value>\n  </resheader>\n",
            escape(name),
            escape(value)
        );
    }
    content
}

fn push_record(content: &mut String, name: &str, value: &str) {
    let _ = write!(
        content,
        "  <data name=\"{}\" xml:space=\"preserve\">\n    <value>{}</value>\n  </data>\n",
        escape(name),
        escape(value)
    );
}
