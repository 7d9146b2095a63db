//! Tree serialization of a [`Document`] through `quick-xml`.

use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    document::{DataRecord, Document, HeaderRecord, Item, ROOT_ELEMENT, RecordHandle},
    error::Error,
    extract::TranslatedRecords,
    render::{
        Renderer,
        boilerplate::{SCHEMA, STANDARD_HEADERS, indented},
        check_alignment,
    },
};

/// Re-serializes the parsed document with translated values swapped in.
///
/// Opaque children (`assembly`, `metadata`, custom headers, the original schema) are
/// written back as they were read. If the source lacked the schema or any of the
/// standard headers, the standard ones are added so the output stands on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer;

impl Renderer for TreeRenderer {
    fn render(&self, document: &Document, translated: &TranslatedRecords) -> Result<Vec<u8>, Error> {
        check_alignment(document, translated)?;
        let mut out = Vec::new();
        TreeWriter::translated(document, translated).write(&mut out)?;
        Ok(out)
    }
}

pub(crate) struct TreeWriter<'a> {
    document: &'a Document,
    /// `None` writes the document exactly as parsed.
    translated: Option<&'a TranslatedRecords>,
}

impl<'a> TreeWriter<'a> {
    pub(crate) fn faithful(document: &'a Document) -> Self {
        Self {
            document,
            translated: None,
        }
    }

    pub(crate) fn translated(document: &'a Document, translated: &'a TranslatedRecords) -> Self {
        Self {
            document,
            translated: Some(translated),
        }
    }

    pub(crate) fn write<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

        let completing = self.translated.is_some();
        if completing && !self.document.has_schema() {
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
            xml_writer
                .get_mut()
                .write_all(indented(SCHEMA, "  ").trim_end().as_bytes())?;
        }

        let mut missing_headers: Vec<HeaderRecord> = if completing {
            STANDARD_HEADERS
                .iter()
                .filter(|(name, _)| self.document.header(name).is_none())
                .map(|(name, value)| HeaderRecord::new(*name, *value))
                .collect()
        } else {
            Vec::new()
        };

        for (index, item) in self.document.items().iter().enumerate() {
            match item {
                Item::Opaque(element) => {
                    indent(&mut xml_writer)?;
                    for event in element.events() {
                        xml_writer.write_event(event.borrow())?;
                    }
                }
                Item::Header(header) => {
                    write_header(&mut xml_writer, header)?;
                }
                Item::Data(record) => {
                    for header in missing_headers.drain(..) {
                        write_header(&mut xml_writer, &header)?;
                    }
                    self.write_record(&mut xml_writer, index, record)?;
                }
            }
        }
        for header in missing_headers.drain(..) {
            write_header(&mut xml_writer, &header)?;
        }

        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }

    fn write_record<W: Write>(
        &self,
        xml_writer: &mut Writer<W>,
        index: usize,
        record: &DataRecord,
    ) -> Result<(), Error> {
        let Some(translated) = self.translated else {
            let comment = record.comment.as_deref();
            return write_data(xml_writer, record, &record.value, comment, record.preserve_whitespace);
        };

        match translated.get(RecordHandle::from_index(index)) {
            Some(value) => write_data(xml_writer, record, value, None, true),
            // Nameless records never reach the output.
            None => Ok(()),
        }
    }
}

fn indent<W: Write>(xml_writer: &mut Writer<W>) -> Result<(), Error> {
    xml_writer.write_event(Event::Text(BytesText::new("\n  ")))?;
    Ok(())
}

fn write_header<W: Write>(xml_writer: &mut Writer<W>, header: &HeaderRecord) -> Result<(), Error> {
    indent(xml_writer)?;
    let mut elem = BytesStart::new("resheader");
    elem.push_attribute(("name", header.name.as_str()));
    xml_writer.write_event(Event::Start(elem))?;
    write_child(xml_writer, "value", &header.value)?;
    indent(xml_writer)?;
    xml_writer.write_event(Event::End(BytesEnd::new("resheader")))?;
    Ok(())
}

fn write_data<W: Write>(
    xml_writer: &mut Writer<W>,
    record: &DataRecord,
    value: &str,
    comment: Option<&str>,
    preserve_whitespace: bool,
) -> Result<(), Error> {
    indent(xml_writer)?;
    let mut elem = BytesStart::new("data");
    if let Some(name) = &record.name {
        elem.push_attribute(("name", name.as_str()));
    }
    if let Some(type_name) = &record.type_name {
        elem.push_attribute(("type", type_name.as_str()));
    }
    if let Some(mime_type) = &record.mime_type {
        elem.push_attribute(("mimetype", mime_type.as_str()));
    }
    if preserve_whitespace {
        elem.push_attribute(("xml:space", "preserve"));
    }
    xml_writer.write_event(Event::Start(elem))?;
    write_child(xml_writer, "value", value)?;
    if let Some(comment) = comment {
        write_child(xml_writer, "comment", comment)?;
    }
    indent(xml_writer)?;
    xml_writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}

fn write_child<W: Write>(xml_writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), Error> {
    xml_writer.write_event(Event::Text(BytesText::new("\n    ")))?;
    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
    xml_writer.write_event(Event::Text(BytesText::new(text)))?;
    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
