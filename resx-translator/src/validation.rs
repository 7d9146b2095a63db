//! Schema version gate applied to every document before it is processed.

use crate::{
    document::{Document, EXPECTED_VERSION, VERSION_HEADER},
    error::Error,
};

impl Document {
    /// Whether the document has a `<root>` and declares `version` = `2.0` in any header.
    ///
    /// The value must match exactly; surrounding whitespace is a mismatch.
    pub fn declares_expected_version(&self) -> bool {
        self.has_root()
            && self
                .headers()
                .any(|h| h.name == VERSION_HEADER && h.value == EXPECTED_VERSION)
    }
}

/// Rejects documents that are not resx version 2.0.
///
/// A missing root, a missing version header and a different version are reported
/// identically: in every case the file cannot be used.
pub fn validate_version(document: &Document) -> Result<(), Error> {
    if document.declares_expected_version() {
        Ok(())
    } else {
        Err(Error::invalid_schema(format!(
            "document does not declare resx version {EXPECTED_VERSION}"
        )))
    }
}
