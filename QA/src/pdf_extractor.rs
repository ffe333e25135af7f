use crate::models::PageText;
use anyhow::{Context, Result};
use pdf_extract::extract_text_from_mem_by_pages;
use std::any::Any;
use std::fs;
use std::panic;
use std::path::Path;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Page number → text for the PDF at `path`, or an empty map when the
    /// file cannot be read or decoded. The failure is logged, not returned.
    pub fn extract(&self, file_path: impl AsRef<Path>) -> PageText {
        match self.try_extract(file_path) {
            Ok(pages) => pages,
            Err(e) => {
                log::error!("Error reading PDF: {:#}", e);
                PageText::new()
            }
        }
    }

    pub fn extract_from_bytes(&self, bytes: &[u8]) -> PageText {
        match self.try_extract_from_bytes(bytes) {
            Ok(pages) => pages,
            Err(e) => {
                log::error!("Error reading PDF: {:#}", e);
                PageText::new()
            }
        }
    }

    pub fn try_extract(&self, file_path: impl AsRef<Path>) -> Result<PageText> {
        let file_path = file_path.as_ref();
        log::info!("Processing PDF: {}", file_path.display());

        // The handle is dropped here; decoding works on the owned buffer.
        let bytes = fs::read(file_path)
            .with_context(|| format!("failed to open {}", file_path.display()))?;

        self.try_extract_from_bytes(&bytes)
            .with_context(|| format!("failed to decode {}", file_path.display()))
    }

    pub fn try_extract_from_bytes(&self, bytes: &[u8]) -> Result<PageText> {
        // pdf-extract panics on some malformed inputs instead of returning an error.
        let pages = panic::catch_unwind(|| extract_text_from_mem_by_pages(bytes))
            .map_err(|payload| {
                anyhow::anyhow!("PDF decoder panicked: {}", panic_message(payload.as_ref()))
            })??;

        let text_by_page: PageText = pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| (idx as u32 + 1, text))
            .collect();

        log::info!("Extracted text from {} pages", text_by_page.len());
        Ok(text_by_page)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
