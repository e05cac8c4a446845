#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use invoice_renderer::api::{ApiState, AppConfig};
use invoice_renderer::core::{RenderError, RenderResult};
use invoice_renderer::generators::PdfEngine;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const FAKE_PDF: &[u8] = b"%PDF-1.4 fake";

/// Returns a fixed PDF and keeps the last HTML it was handed.
#[derive(Default)]
pub struct FakePdfEngine {
    pub last_html: Mutex<Option<String>>,
}

#[async_trait]
impl PdfEngine for FakePdfEngine {
    async fn html_to_pdf(&self, html: String) -> RenderResult<Vec<u8>> {
        *self.last_html.lock().unwrap() = Some(html);
        Ok(FAKE_PDF.to_vec())
    }
}

pub struct FailingPdfEngine;

#[async_trait]
impl PdfEngine for FailingPdfEngine {
    async fn html_to_pdf(&self, _html: String) -> RenderResult<Vec<u8>> {
        Err(RenderError::Browser("chromium exited".to_string()))
    }
}

pub fn app_state(config: AppConfig, engine: Arc<dyn PdfEngine>) -> web::Data<ApiState> {
    web::Data::new(ApiState::with_pdf_engine(config, engine).expect("test state"))
}

pub fn default_state() -> web::Data<ApiState> {
    app_state(AppConfig::default(), Arc::new(FakePdfEngine::default()))
}

pub fn invoice_body() -> Value {
    json!({
        "invoice_number": "INV-001",
        "invoice_date": "01/04/2024",
        "company_name": "Acme Traders",
        "company_gstin": "27AAACA1234A1Z5",
        "customer_name": "Kirana Store",
        "products": [
            {
                "serial_no": 1,
                "hsn_code": "0902",
                "product_name": "Assam Tea 250g",
                "qty": 10,
                "net_value": "1180.00"
            }
        ],
        "net_receivable": "1180.00",
        "amount_in_words": "One Thousand One Hundred Eighty Only"
    })
}

pub fn ewaybill_body() -> Value {
    let mut body = invoice_body();
    body["ewb_number"] = json!("331000123456");
    body["vehicle_number"] = json!("MH12AB1234");
    body
}
