use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Local;
use serde_json::{json, Value};

use super::error::{ApiError, ApiResult};
use super::state::ApiState;
use crate::core::RenderError;
use crate::metrics;
use crate::models::{self, DocumentKind, InvoicePayload, OutputFormat};

const NO_JSON_MESSAGE: &str = "No JSON data provided";

/// Query string as ordered pairs; a repeated key keeps its first value.
pub type QueryPairs = web::Query<Vec<(String, String)>>;

/// Render an invoice as HTML, or as PDF with `?format=pdf`.
pub async fn generate_invoice(
    query: QueryPairs,
    body: web::Json<Value>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    render_document(DocumentKind::Invoice, query.into_inner(), body.into_inner(), &state).await
}

/// Same pipeline as invoices, with e-way bill defaults and the extra `ewb_number` check.
pub async fn generate_ewaybill(
    query: QueryPairs,
    body: web::Json<Value>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    render_document(DocumentKind::EwayBill, query.into_inner(), body.into_inner(), &state).await
}

async fn render_document(
    kind: DocumentKind,
    query: Vec<(String, String)>,
    body: Value,
    state: &ApiState,
) -> ApiResult<HttpResponse> {
    let format = OutputFormat::from_query(first_param(&query, "format"));

    let mut payload = parse_payload(body).map_err(|e| {
        metrics::record_error(kind.as_str(), "validation");
        e
    })?;

    if kind == DocumentKind::EwayBill {
        payload.apply_ewaybill_defaults();
    }

    if let Err(e) = payload.validate(kind) {
        tracing::warn!(kind = %kind, "Rejected document: {}", e);
        metrics::record_error(kind.as_str(), "validation");
        return Err(e.into());
    }

    let _timer = metrics::start_timer(format.as_str());

    match format {
        OutputFormat::Pdf => {
            let filename = payload.attachment_name(kind);
            let pdf = state
                .generator
                .generate_pdf(payload)
                .await
                .map_err(|e| render_failed(kind, e))?;

            metrics::record_generated(kind.as_str(), format.as_str());
            tracing::info!(kind = %kind, size = pdf.len(), "Generated {}", filename);

            Ok(HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(filename)],
                })
                .body(pdf))
        }
        OutputFormat::Html => {
            let html = state
                .generator
                .generate_html(payload)
                .map_err(|e| render_failed(kind, e))?;

            metrics::record_generated(kind.as_str(), format.as_str());
            tracing::debug!(kind = %kind, size = html.len(), "Generated HTML document");

            Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html))
        }
    }
}

fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Only a non-empty JSON object counts as document data.
fn parse_payload(body: Value) -> ApiResult<InvoicePayload> {
    match body {
        Value::Object(map) if !map.is_empty() => Ok(serde_json::from_value(Value::Object(map))?),
        _ => Err(ApiError::bad_request(NO_JSON_MESSAGE)),
    }
}

fn render_failed(kind: DocumentKind, err: RenderError) -> ApiError {
    let stage = match err {
        RenderError::Template(_) => "template",
        RenderError::QrCode(_) => "qr_code",
        _ => "pdf",
    };
    tracing::error!(kind = %kind, stage, "Document generation failed: {}", err);
    metrics::record_error(kind.as_str(), stage);
    err.into()
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339()
    }))
}

pub async fn template_schema() -> HttpResponse {
    HttpResponse::Ok().json(models::template_schema())
}

pub async fn ewaybill_schema() -> HttpResponse {
    HttpResponse::Ok().json(models::ewaybill_schema())
}

pub async fn metrics_endpoint() -> ApiResult<HttpResponse> {
    let buffer = metrics::render()?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

/// Maps body extraction failures onto the service's JSON error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let api_error = match &err {
        JsonPayloadError::ContentType => ApiError::bad_request(NO_JSON_MESSAGE),
        JsonPayloadError::Deserialize(e) if is_empty_body(e) => ApiError::bad_request(NO_JSON_MESSAGE),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ApiError::payload_too_large(err.to_string())
        }
        _ => ApiError::bad_request(format!("Validation error: {}", err)),
    };

    tracing::debug!("Rejected request body: {}", err);
    api_error.into()
}

/// EOF before the first token. A truncated document fails later in the input.
fn is_empty_body(err: &serde_json::Error) -> bool {
    err.is_eof() && err.line() == 1 && err.column() == 0
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected query string: {}", err);
    ApiError::bad_request(format!("Validation error: {}", err)).into()
}
