//! In-memory model of a `.resx` resource document.
//!
//! Only the direct children of `<root>` are modelled: `resheader` records, `data`
//! records, and everything else (`xsd:schema`, `assembly`, `metadata`, comments)
//! kept as an opaque event stream so it can be written back untouched.
//!
//! Records are addressed by [`RecordHandle`], the position of the record in the
//! document's item list. Handles stay valid for the lifetime of the document, which
//! is what lets translated text land on the record it was extracted from.

use std::io::{BufRead, Write};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{error::Error, render::tree::TreeWriter, traits::Parser};

/// Name of the element every resx document is wrapped in.
pub const ROOT_ELEMENT: &str = "root";

/// Name of the header that gates acceptance of a document.
pub const VERSION_HEADER: &str = "version";

/// The only schema version this crate reads and writes.
pub const EXPECTED_VERSION: &str = "2.0";

/// Qualified name of the embedded XML schema block.
pub const SCHEMA_ELEMENT: &str = "xsd:schema";

/// Stable reference to one item of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordHandle(usize);

impl RecordHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the referenced item in [`Document::items`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// A `<resheader name="...">` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub name: String,
    pub value: String,
}

impl HeaderRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A `<data name="...">` record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataRecord {
    /// Required by the format, but tolerated as missing; such records are never translated.
    pub name: Option<String>,
    /// Text of the nested `<value>` element, or the element's own text when there is none.
    pub value: String,
    pub comment: Option<String>,
    /// Whether the record carries `xml:space="preserve"`.
    pub preserve_whitespace: bool,
    pub type_name: Option<String>,
    pub mime_type: Option<String>,
}

impl DataRecord {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }
}

/// Any other child of `<root>`, captured as the events that make it up.
#[derive(Debug, Clone)]
pub struct OpaqueElement {
    pub name: String,
    pub(crate) events: Vec<Event<'static>>,
}

impl OpaqueElement {
    pub(crate) fn events(&self) -> &[Event<'static>] {
        &self.events
    }
}

#[derive(Debug, Clone)]
pub enum Item {
    Header(HeaderRecord),
    Data(DataRecord),
    Opaque(OpaqueElement),
}

/// A parsed resx document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    root_present: bool,
    items: Vec<Item>,
}

impl Document {
    /// Creates an empty document with a `<root>` element and no items.
    pub fn new() -> Self {
        Self {
            root_present: true,
            items: Vec::new(),
        }
    }

    /// Whether the source contained a top-level `<root>` element.
    pub fn has_root(&self) -> bool {
        self.root_present
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn push_header(&mut self, header: HeaderRecord) {
        self.items.push(Item::Header(header));
    }

    pub fn push_record(&mut self, record: DataRecord) -> RecordHandle {
        self.items.push(Item::Data(record));
        RecordHandle(self.items.len() - 1)
    }

    /// Header records in document order.
    pub fn headers(&self) -> impl Iterator<Item = &HeaderRecord> {
        self.items.iter().filter_map(|item| match item {
            Item::Header(header) => Some(header),
            _ => None,
        })
    }

    /// First header with the given name.
    pub fn header(&self, name: &str) -> Option<&HeaderRecord> {
        self.headers().find(|h| h.name == name)
    }

    /// Data records in document order, including records without a name.
    pub fn records(&self) -> impl Iterator<Item = (RecordHandle, &DataRecord)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Item::Data(record) => Some((RecordHandle(index), record)),
                _ => None,
            })
    }

    pub fn record(&self, handle: RecordHandle) -> Option<&DataRecord> {
        match self.items.get(handle.0) {
            Some(Item::Data(record)) => Some(record),
            _ => None,
        }
    }

    /// Whether any opaque child is an `xsd:schema` block.
    pub fn has_schema(&self) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, Item::Opaque(o) if o.name == SCHEMA_ELEMENT))
    }
}

impl Parser for Document {
    fn from_str(s: &str) -> Result<Self, Error> {
        parse_document(Reader::from_str(s))
    }

    /// Writes the document back as parsed, comments and nameless records included.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error> {
        TreeWriter::faithful(self).write(writer)
    }
}

fn parse_document<R: BufRead>(mut xml_reader: Reader<R>) -> Result<Document, Error> {
    let mut buf = Vec::new();
    let mut document = Document::default();
    let mut in_root = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) if in_root => {
                let name = e.name().as_ref().to_vec();
                let item = match name.as_slice() {
                    b"resheader" => Item::Header(parse_header(&e, &mut xml_reader)?),
                    b"data" => Item::Data(parse_data(&e, &mut xml_reader)?),
                    _ => Item::Opaque(capture_element(e.into_owned(), &mut xml_reader)?),
                };
                document.items.push(item);
            }
            Event::Empty(e) if in_root => {
                let name = e.name().as_ref().to_vec();
                let item = match name.as_slice() {
                    b"resheader" => Item::Header(HeaderRecord {
                        name: required_name(&e, "resheader")?,
                        value: String::new(),
                    }),
                    b"data" => Item::Data(data_attributes(&e)?),
                    _ => Item::Opaque(OpaqueElement {
                        name: element_name(&e),
                        events: vec![Event::Empty(e.into_owned())],
                    }),
                };
                document.items.push(item);
            }
            Event::Comment(e) if in_root => {
                document.items.push(Item::Opaque(OpaqueElement {
                    name: "#comment".to_string(),
                    events: vec![Event::Comment(e.into_owned())],
                }));
            }
            Event::End(e) if in_root && e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                in_root = false;
            }
            Event::Start(e) if !document.root_present => {
                if e.name().as_ref() == ROOT_ELEMENT.as_bytes() {
                    document.root_present = true;
                    in_root = true;
                } else {
                    // Foreign top-level element; leave it out of the model.
                    let mut skip = Vec::new();
                    xml_reader.read_to_end_into(e.name(), &mut skip)?;
                }
            }
            Event::Empty(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                document.root_present = true;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(document)
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn required_name(e: &BytesStart, element: &str) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::invalid_schema(format!(
        "{element} element missing 'name'"
    )))
}

fn data_attributes(e: &BytesStart) -> Result<DataRecord, Error> {
    let mut record = DataRecord::default();
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"name" => record.name = Some(value),
            b"type" => record.type_name = Some(value),
            b"mimetype" => record.mime_type = Some(value),
            b"xml:space" => record.preserve_whitespace = value == "preserve",
            _ => {}
        }
    }
    Ok(record)
}

fn parse_header<R: BufRead>(
    e: &BytesStart,
    xml_reader: &mut Reader<R>,
) -> Result<HeaderRecord, Error> {
    let name = required_name(e, "resheader")?;
    let children = read_children(xml_reader, b"resheader")?;
    Ok(HeaderRecord {
        name,
        value: children.value.unwrap_or(children.text),
    })
}

fn parse_data<R: BufRead>(e: &BytesStart, xml_reader: &mut Reader<R>) -> Result<DataRecord, Error> {
    let mut record = data_attributes(e)?;
    let children = read_children(xml_reader, b"data")?;
    record.value = children.value.unwrap_or(children.text);
    record.comment = children.comment;
    Ok(record)
}

#[derive(Default)]
struct Children {
    value: Option<String>,
    comment: Option<String>,
    /// Text directly inside the parent, outside of any child element.
    text: String,
}

/// Reads the `<value>`/`<comment>` children of a record up to its closing tag.
fn read_children<R: BufRead>(xml_reader: &mut Reader<R>, parent: &[u8]) -> Result<Children, Error> {
    let mut buf = Vec::new();
    let mut children = Children::default();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let text = read_text(xml_reader, &name)?;
                match name.as_slice() {
                    b"value" => children.value = Some(text),
                    b"comment" => children.comment = Some(text),
                    _ => {}
                }
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"value" => children.value = Some(String::new()),
                b"comment" => children.comment = Some(String::new()),
                _ => {}
            },
            Event::Text(e) => children.text.push_str(&e.unescape()?),
            Event::CData(e) => children.text.push_str(&xml_reader.decoder().decode(&e)?),
            Event::End(e) if e.name().as_ref() == parent => break,
            Event::Eof => {
                return Err(Error::invalid_schema(format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(parent)
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if children.text.trim().is_empty() {
        children.text.clear();
    }
    Ok(children)
}

/// Collects the text content of an element, ignoring nested markup.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>, element: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&xml_reader.decoder().decode(&e)?),
            Event::Start(_) => depth += 1,
            Event::End(e) if depth == 0 && e.name().as_ref() == element => break,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => {
                return Err(Error::invalid_schema(format!(
                    "unexpected end of document inside <{}>",
                    String::from_utf8_lossy(element)
                )));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

fn capture_element<R: BufRead>(
    start: BytesStart<'static>,
    xml_reader: &mut Reader<R>,
) -> Result<OpaqueElement, Error> {
    let name = element_name(&start);
    let mut events = vec![Event::Start(start)];
    let mut buf = Vec::new();
    let mut depth = 1usize;

    while depth > 0 {
        let event = xml_reader.read_event_into(&mut buf)?.into_owned();
        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::invalid_schema(format!(
                    "unexpected end of document inside <{name}>"
                )));
            }
            _ => {}
        }
        events.push(event);
        buf.clear();
    }

    Ok(OpaqueElement { name, events })
}
