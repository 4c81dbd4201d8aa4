use crate::error::{Error, Result};
use std::io::{Read, Seek};
use tracing::warn;
use zip::ZipArchive;

/// The one entry in a docx container that holds the textual content
pub const DOCUMENT_XML_PATH: &str = "word/document.xml";

/// Raw artifacts extracted from a docx container: the document body XML
/// and, when present, an embedded cover image.
#[derive(Debug)]
pub struct Docx {
    pub xml_data: Vec<u8>,
    pub image: Option<Vec<u8>>,
}

impl Docx {
    /// Open a docx container and extract its body XML plus at most one
    /// embedded JPEG. Entries are scanned exactly once, stopping early
    /// when both artifacts have been captured. A missing image is fine;
    /// a missing document body is not.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let mut xml_data: Option<Vec<u8>> = None;
        let mut image: Option<Vec<u8>> = None;

        for i in 0..archive.len() {
            if xml_data.is_some() && image.is_some() {
                break;
            }

            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_ascii_lowercase();

            if image.is_none() && (name.ends_with(".jpg") || name.ends_with(".jpeg")) {
                let mut data = Vec::with_capacity(entry.size() as usize);
                match entry.read_to_end(&mut data) {
                    Ok(_) => image = Some(data),
                    // an unreadable image never invalidates the document
                    Err(e) => warn!("Failed to read embedded image {}: {}", name, e),
                }
            } else if xml_data.is_none() && name == DOCUMENT_XML_PATH {
                let mut data = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut data)?;
                xml_data = Some(data);
            }
        }

        let xml_data = xml_data.ok_or(Error::MissingDocumentBody(DOCUMENT_XML_PATH))?;

        Ok(Docx { xml_data, image })
    }
}
