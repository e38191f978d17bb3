//! Writing the descriptor back to disk

use keil_fs::io;

use crate::document::DescriptorDocument;
use crate::error::{Error, Result};
use crate::markup;

impl DescriptorDocument {
    /// Serialize to UTF-8 XML with two-space indentation, under the
    /// declaration the document was read with.
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        markup::write_document(self.root(), self.declaration()).map_err(|e| Error::Serialize {
            message: e.to_string(),
        })
    }

    /// Write the whole document to [`path`](Self::path) in a single atomic
    /// replace; the file is either fully old or fully new.
    pub fn save(&self) -> Result<()> {
        let bytes = self.to_xml_bytes()?;
        io::write_atomic(self.path(), &bytes)?;
        tracing::debug!(path = %self.path(), bytes = bytes.len(), "Saved descriptor");
        Ok(())
    }
}
