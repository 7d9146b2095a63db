//! Traits for reading and writing resource documents.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one resource document from/to one file.
///
/// Byte-oriented entry points sniff a byte-order mark first, so UTF-16 and
/// UTF-8-with-BOM files parse the same as plain UTF-8 ones.
///
/// # Example
///
/// ```rust,no_run
/// use resx_translator::{Document, traits::Parser};
/// let document = Document::read_from("Strings.resx")?;
/// document.write_to("Strings.copy.resx")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from decoded UTF-8 text.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from any reader, decoding it according to its byte-order mark.
    fn from_reader<R: Read>(reader: R) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(reader);

        let mut decoded = String::new();
        decoder
            .read_to_string(&mut decoded)
            .map_err(|e| Error::invalid_input(format!("cannot decode source document: {e}")))?;

        Self::from_str(&decoded)
    }

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::invalid_input(format!("cannot open `{}`: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let (encoding, bom_len) =
            encoding_rs::Encoding::for_bom(bytes).unwrap_or((encoding_rs::UTF_8, 0));
        let (decoded, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            return Err(Error::invalid_schema(format!(
                "source document is not valid {}",
                encoding.name()
            )));
        }
        Self::from_str(&decoded)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush().map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
