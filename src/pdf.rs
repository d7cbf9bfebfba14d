use crate::document::ReportDocument;
use anyhow::{Context, Result};
use pdf_oxide::api::PdfBuilder;

/// Hand the content model to the PDF collaborator and get the artifact back
/// as in-memory bytes. No filesystem intermediary; the caller decides where
/// (and whether) the bytes land.
pub fn pdf_bytes(doc: &ReportDocument, author: &str) -> Result<Vec<u8>> {
    let pdf = PdfBuilder::new()
        .title(doc.title.as_str())
        .author(author)
        .from_markdown(&doc.to_markdown())
        .with_context(|| "rendering PDF")?;
    Ok(pdf.into_bytes())
}
