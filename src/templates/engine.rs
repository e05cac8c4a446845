use minijinja::Environment;
use serde::Serialize;
use std::path::Path;

use super::helpers;
use crate::core::RenderResult;

/// Name under which the document template is registered. The `.html`
/// suffix switches minijinja to HTML auto-escaping.
pub const INVOICE_TEMPLATE_NAME: &str = "invoice.html";

const EMBEDDED_INVOICE_TEMPLATE: &str = include_str!("../../templates/invoice.html");

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Engine backed by the template compiled into the binary.
    pub fn new() -> RenderResult<Self> {
        Self::from_source(EMBEDDED_INVOICE_TEMPLATE.to_string())
    }

    /// Prefers `<dir>/invoice.html` when present, otherwise the embedded template.
    pub fn with_template_dir(dir: Option<&Path>) -> RenderResult<Self> {
        let Some(dir) = dir else {
            return Self::new();
        };

        let path = dir.join(INVOICE_TEMPLATE_NAME);
        if !path.is_file() {
            tracing::warn!("Template override not found at {:?}, using embedded template", path);
            return Self::new();
        }

        let source = std::fs::read_to_string(&path)?;
        tracing::info!("Loaded template override: {:?}", path);
        Self::from_source(source)
    }

    fn from_source(source: String) -> RenderResult<Self> {
        let mut env = Environment::new();

        env.add_function("qr_code", helpers::qr_code_function);
        env.add_template_owned(INVOICE_TEMPLATE_NAME, source)?;

        Ok(TemplateEngine { env })
    }

    pub fn render<S: Serialize>(&self, context: &S) -> RenderResult<String> {
        let template = self.env.get_template(INVOICE_TEMPLATE_NAME)?;
        let rendered = template.render(context)?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoicePayload;
    use serde_json::{json, Value};

    /// Renders the embedded template with a payload typed the way the API sees it.
    fn render_payload(body: Value) -> String {
        let payload: InvoicePayload = serde_json::from_value(body).unwrap();
        TemplateEngine::new().unwrap().render(&payload).unwrap()
    }

    #[test]
    fn embedded_template_compiles() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn values_are_html_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render(&json!({"company_name": "<b>Acme & Sons</b>"}))
            .unwrap();

        assert!(html.contains("&lt;b&gt;Acme &amp; Sons&lt;"));
        assert!(!html.contains("<b>Acme"));
    }

    #[test]
    fn invoice_type_falls_back_to_tax_invoice() {
        let engine = TemplateEngine::new().unwrap();

        let html = engine.render(&json!({"invoice_type": ""})).unwrap();
        assert!(html.contains("<div class=\"invoice-header\">TAX INVOICE</div>"));
        assert!(html.contains("<title>Invoice Template</title>"));

        let html = engine.render(&json!({"invoice_type": "CREDIT NOTE"})).unwrap();
        assert!(html.contains("<div class=\"invoice-header\">CREDIT NOTE</div>"));
    }

    #[test]
    fn missing_override_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::with_template_dir(Some(dir.path())).unwrap();

        let html = engine.render(&json!({})).unwrap();
        assert!(html.contains("invoice-container"));
    }

    #[test]
    fn override_template_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(INVOICE_TEMPLATE_NAME),
            "<p>{{ invoice_number }}</p>",
        )
        .unwrap();

        let engine = TemplateEngine::with_template_dir(Some(dir.path())).unwrap();
        let html = engine.render(&json!({"invoice_number": "INV-9"})).unwrap();

        assert_eq!(html, "<p>INV-9</p>");
    }

    #[test]
    fn broken_override_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INVOICE_TEMPLATE_NAME), "{% if %}").unwrap();

        assert!(TemplateEngine::with_template_dir(Some(dir.path())).is_err());
    }

    #[test]
    fn qr_code_function_is_registered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(INVOICE_TEMPLATE_NAME),
            "{{ qr_code(irn_number) }}",
        )
        .unwrap();

        let engine = TemplateEngine::with_template_dir(Some(dir.path())).unwrap();
        let html = engine.render(&json!({"irn_number": "IRN-1"})).unwrap();

        assert!(html.starts_with("iVBORw0KGgo"));
    }

    #[test]
    fn einvoice_block_follows_flag() {
        let off = render_payload(json!({"irn_number": "IRN-77"}));
        assert!(!off.contains("<div class=\"einvoice-info\">"));
        assert!(!off.contains("IRN-77"));

        let on = render_payload(json!({"is_einvoice": true, "irn_number": "IRN-77"}));
        assert!(on.contains("<div class=\"einvoice-info\">"));
        assert!(on.contains("IRN-77"));
    }

    #[test]
    fn ack_details_only_when_present() {
        let without = render_payload(json!({"is_einvoice": true}));
        assert!(!without.contains("Ack No:"));
        assert!(!without.contains("Ack Date:"));

        let with = render_payload(json!({
            "is_einvoice": true,
            "ack_no": 112010036563310u64,
            "ack_date": "2024-04-01 10:15"
        }));
        assert!(with.contains("<strong>Ack No:</strong> 112010036563310"));
        assert!(with.contains("<strong>Ack Date:</strong> 2024-04-01 10:15"));
    }

    #[test]
    fn status_badges_use_lowercase_class() {
        let html = render_payload(json!({
            "is_einvoice": true,
            "einvoice_status": "GENERATED",
            "is_ewaybill": true,
            "ewaybill_status": "Pending"
        }));

        assert!(html.contains("einvoice-status status-generated"));
        assert!(html.contains("ewaybill-status status-pending"));
    }

    #[test]
    fn qr_image_needs_flag_and_image_data() {
        let image = r#"<img src="data:image/png;base64,"#;

        let flag_only = render_payload(json!({"is_einvoice": true, "show_qr_code": true}));
        assert!(!flag_only.contains(image));

        let data_only = render_payload(json!({"is_einvoice": true, "qr_code_base64": "iVBORw0KGgo"}));
        assert!(!data_only.contains(image));

        let both = render_payload(json!({
            "is_einvoice": true,
            "show_qr_code": true,
            "qr_code_base64": "iVBORw0KGgo"
        }));
        assert!(both.contains("data:image/png;base64,iVBORw0KGgo"));
        assert!(both.contains("class=\"qr-code-image\""));
    }

    #[test]
    fn signed_invoice_line_follows_flag() {
        let line = "Digitally signed invoice available on the portal";

        assert!(!render_payload(json!({"is_einvoice": true})).contains(line));
        assert!(render_payload(json!({"is_einvoice": true, "signed_invoice_available": "yes"}))
            .contains(line));
    }

    #[test]
    fn ewaybill_portal_hint_needs_government_portal() {
        let hint = "Verify at: https://ewaybillgst.gov.in";

        assert!(!render_payload(json!({"is_ewaybill": true})).contains(hint));
        assert!(render_payload(json!({"is_ewaybill": true, "government_portal": "GSTN"}))
            .contains(hint));
    }

    #[test]
    fn transport_grid_needs_transporter_or_vehicle() {
        let grid = "<div class=\"transport-details\">";

        let none = render_payload(json!({"is_ewaybill": true, "driver_name": "Ravi"}));
        assert!(!none.contains(grid));

        let by_transporter = render_payload(json!({"is_ewaybill": true, "transporter_name": "Speed Logistics"}));
        assert!(by_transporter.contains(grid));
        assert!(by_transporter.contains("Speed Logistics"));

        let by_vehicle = render_payload(json!({"is_ewaybill": true, "vehicle_number": "MH12AB1234"}));
        assert!(by_vehicle.contains(grid));
        assert!(by_vehicle.contains("MH12AB1234"));
    }

    #[test]
    fn extensions_row_needs_flag_and_nonzero_count() {
        let row = "<span>Extensions:</span>";
        let base = json!({"is_ewaybill": true, "vehicle_number": "MH12AB1234"});

        let with = |extra: Value| {
            let mut body = base.clone();
            for (key, value) in extra.as_object().unwrap() {
                body[key] = value.clone();
            }
            render_payload(body)
        };

        assert!(!with(json!({"extension_count": 2})).contains(row));
        assert!(!with(json!({"has_extensions": true})).contains(row));
        assert!(!with(json!({"has_extensions": true, "extension_count": 0})).contains(row));

        let shown = with(json!({"has_extensions": true, "extension_count": 2}));
        assert!(shown.contains(row));
        assert!(shown.contains("<span>2</span>"));
    }

    #[test]
    fn one_row_per_tax_slab() {
        let row = "<div class=\"tax-row\">";
        let baseline = render_payload(json!({"invoice_number": "INV-1"})).matches(row).count();

        let html = render_payload(json!({
            "tax_slabs": [
                {"taxable_amount": "1000.00", "cgst_rate": "9", "cgst_amount": "90.00"},
                {"taxable_amount": "500.00", "cgst_rate": "2.5", "cgst_amount": "12.50"}
            ]
        }));

        assert_eq!(html.matches(row).count(), baseline + 2);
        assert!(html.contains("<span>1000.00</span>"));
        assert!(html.contains("<span>12.50</span>"));
    }
}
