use std::sync::Arc;

use super::pdf::PdfEngine;
use crate::core::RenderResult;
use crate::models::{DisplayText, Flag, InvoicePayload};
use crate::templates::{generate_qr_base64, TemplateEngine};

/// QR encoding, template rendering and optional PDF printing for one payload.
pub struct InvoiceGenerator {
    templates: TemplateEngine,
    pdf_engine: Arc<dyn PdfEngine>,
}

impl InvoiceGenerator {
    pub fn new(templates: TemplateEngine, pdf_engine: Arc<dyn PdfEngine>) -> Self {
        InvoiceGenerator {
            templates,
            pdf_engine,
        }
    }

    pub fn generate_html(&self, mut payload: InvoicePayload) -> RenderResult<String> {
        embed_qr_code(&mut payload);
        self.templates.render(&payload)
    }

    pub async fn generate_pdf(&self, payload: InvoicePayload) -> RenderResult<Vec<u8>> {
        let html = self.generate_html(payload)?;
        self.pdf_engine.html_to_pdf(html).await
    }
}

/// Fills `qr_code_base64` when a QR is requested. An encoding failure only
/// drops the image; the document still renders.
pub fn embed_qr_code(payload: &mut InvoicePayload) {
    if !payload.wants_qr_code() {
        return;
    }

    match generate_qr_base64(&payload.qr_code_data) {
        Ok(encoded) => payload.qr_code_base64 = DisplayText::from(encoded),
        Err(e) => {
            tracing::error!("Error generating QR code: {}", e);
            crate::metrics::record_error("qr", "qr_code");
            payload.show_qr_code = Flag(false);
        }
    }
}
