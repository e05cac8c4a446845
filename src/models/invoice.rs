use serde::{Deserialize, Serialize};

use super::display::{DisplayText, Flag};
use super::document::DocumentKind;
use crate::core::{RenderError, RenderResult};

pub const DEFAULT_EWAYBILL_INVOICE_TYPE: &str = "TAX INVOICE WITH E-WAY BILL";
pub const DEFAULT_EWAYBILL_DOCUMENT_TYPE: &str = "ORIGINAL FOR CONSIGNEE";
pub const DEFAULT_EWAYBILL_COMPLIANCE_NOTE: &str =
    "E-Way Bill generated under Rule 138 of the CGST Rules, 2017. \
     It must accompany the consignment for the entire movement of goods.";

/// Fields every document needs, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "invoice_number",
    "invoice_date",
    "company_name",
    "customer_name",
    "products",
    "net_receivable",
];

pub const EWAYBILL_REQUIRED_FIELDS: [&str; 1] = ["ewb_number"];

/// Invoice / e-way bill payload. Amounts arrive pre-computed and are only displayed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicePayload {
    // Header
    pub invoice_number: DisplayText,
    pub invoice_date: DisplayText,
    pub invoice_type: DisplayText,
    pub document_type: DisplayText,

    // E-invoice
    pub is_einvoice: Flag,
    pub irn_number: DisplayText,
    pub ack_no: DisplayText,
    pub ack_date: DisplayText,
    pub einvoice_status: DisplayText,
    pub show_qr_code: Flag,
    pub qr_code_data: DisplayText,
    pub qr_code_base64: DisplayText,
    pub government_portal: DisplayText,
    pub einvoice_compliance_note: DisplayText,
    pub signed_invoice_available: Flag,

    // E-way bill
    pub is_ewaybill: Flag,
    pub ewb_number: DisplayText,
    pub ewb_date: DisplayText,
    pub ewb_valid_until: DisplayText,
    pub ewaybill_status: DisplayText,
    pub ewaybill_compliance_note: Option<DisplayText>,

    // Transport
    pub transporter_name: DisplayText,
    pub transporter_id: DisplayText,
    pub vehicle_number: DisplayText,
    pub driver_name: DisplayText,
    pub driver_mobile: DisplayText,
    pub transport_distance: DisplayText,
    pub transport_mode: DisplayText,
    pub from_place: DisplayText,
    pub from_pincode: DisplayText,
    pub from_state_code: DisplayText,
    pub to_place: DisplayText,
    pub to_pincode: DisplayText,
    pub to_state_code: DisplayText,
    pub has_extensions: Flag,
    pub extension_count: DisplayText,

    // Seller
    pub company_name: DisplayText,
    pub company_address: DisplayText,
    pub company_city: DisplayText,
    pub company_gstin: DisplayText,
    pub company_pan: DisplayText,
    pub company_fssai: DisplayText,
    pub company_gst_state: DisplayText,
    pub company_state_code: DisplayText,
    pub sm_name: DisplayText,
    pub beat_name: DisplayText,
    pub sm_contact: DisplayText,
    pub sm_mobile: DisplayText,

    // Buyer
    pub customer_name: DisplayText,
    pub customer_address: DisplayText,
    pub retailer_code: DisplayText,
    pub po_so_ref: DisplayText,
    pub customer_pan: DisplayText,
    pub customer_gstin: DisplayText,
    pub payment_mode: DisplayText,
    pub customer_contact: DisplayText,
    pub drug_license: DisplayText,
    pub customer_fssai: DisplayText,
    pub customer_gst_state: DisplayText,
    pub customer_state_code: DisplayText,
    pub vehicle: DisplayText,

    pub products: Vec<LineItem>,

    // Totals row
    pub total_items: DisplayText,
    pub total_cs: DisplayText,
    pub total_qty: DisplayText,
    pub total_free: DisplayText,
    pub grand_total: DisplayText,
    pub total_pri_disc: DisplayText,
    pub total_sec_disc: DisplayText,
    pub total_lnd_disc: DisplayText,
    pub total_taxable_amt: DisplayText,
    pub total_cgst_amt: DisplayText,
    pub total_sgst_amt: DisplayText,

    pub tax_slabs: Vec<TaxSlab>,

    // Financial summary
    pub pre_tax_scheme_amt: DisplayText,
    pub net_amount: DisplayText,
    pub total_cgst: DisplayText,
    pub total_sgst: DisplayText,
    pub cash_disc_deducted: DisplayText,
    pub tcs_tax_amt: DisplayText,
    pub credit_adj: DisplayText,
    pub round_off: DisplayText,
    pub net_receivable: DisplayText,
    pub amount_in_words: DisplayText,

    // Footer
    pub reverse_charge_basis: DisplayText,
    pub return_policy_note: DisplayText,
    pub jurisdiction: DisplayText,
    pub bank_account_no: DisplayText,
    pub bank_name: DisplayText,
    pub bank_ifsc: DisplayText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub serial_no: DisplayText,
    pub hsn_code: DisplayText,
    pub product_name: DisplayText,
    pub mrp: DisplayText,
    pub cs: DisplayText,
    pub qty: DisplayText,
    pub free: DisplayText,
    pub upc: DisplayText,
    pub gross_rate: DisplayText,
    pub total: DisplayText,
    pub pri_disc: DisplayText,
    pub sec_disc: DisplayText,
    pub lnd_disc: DisplayText,
    pub taxable_amt: DisplayText,
    pub cgst_rate: DisplayText,
    pub cgst_amt: DisplayText,
    pub sgst_rate: DisplayText,
    pub sgst_amt: DisplayText,
    pub net_rate: DisplayText,
    pub net_value: DisplayText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSlab {
    pub taxable_amount: DisplayText,
    pub cgst_rate: DisplayText,
    pub cgst_amount: DisplayText,
    pub sgst_rate: DisplayText,
    pub sgst_amount: DisplayText,
}

impl InvoicePayload {
    /// Checks required fields for the given document kind.
    pub fn validate(&self, kind: DocumentKind) -> RenderResult<()> {
        let missing: Vec<&str> = self.missing_fields(kind);

        if missing.is_empty() {
            return Ok(());
        }

        let message = match kind {
            DocumentKind::Invoice => format!("Missing required fields: {}", missing.join(", ")),
            DocumentKind::EwayBill => format!(
                "Missing required fields for E-Way Bill: {}",
                missing.join(", ")
            ),
        };

        Err(RenderError::Validation(message))
    }

    pub fn missing_fields(&self, kind: DocumentKind) -> Vec<&'static str> {
        let mut required: Vec<&'static str> = REQUIRED_FIELDS.to_vec();
        if kind == DocumentKind::EwayBill {
            required.extend_from_slice(&EWAYBILL_REQUIRED_FIELDS);
        }

        required
            .into_iter()
            .filter(|field| !self.has_field(field))
            .collect()
    }

    fn has_field(&self, field: &str) -> bool {
        match field {
            "invoice_number" => !self.invoice_number.is_blank(),
            "invoice_date" => !self.invoice_date.is_blank(),
            "company_name" => !self.company_name.is_blank(),
            "customer_name" => !self.customer_name.is_blank(),
            "products" => !self.products.is_empty(),
            "net_receivable" => !self.net_receivable.is_blank(),
            "ewb_number" => !self.ewb_number.is_blank(),
            _ => false,
        }
    }

    /// Flags and headings the e-way bill endpoint sets on every request.
    pub fn apply_ewaybill_defaults(&mut self) {
        self.is_ewaybill = Flag(true);

        if self.invoice_type.is_blank() {
            self.invoice_type = DisplayText::from(DEFAULT_EWAYBILL_INVOICE_TYPE);
        }
        if self.document_type.is_blank() {
            self.document_type = DisplayText::from(DEFAULT_EWAYBILL_DOCUMENT_TYPE);
        }
        // An explicit empty note opts out of the default text.
        if self.ewaybill_compliance_note.is_none() {
            self.ewaybill_compliance_note =
                Some(DisplayText::from(DEFAULT_EWAYBILL_COMPLIANCE_NOTE));
        }
    }

    /// File name offered in the `Content-Disposition` header of a PDF response.
    pub fn attachment_name(&self, kind: DocumentKind) -> String {
        let name = match kind {
            DocumentKind::Invoice => format!("invoice_{}.pdf", self.invoice_number.trim()),
            DocumentKind::EwayBill => format!("ewaybill_{}.pdf", self.ewb_number.trim()),
        };
        sanitize_filename::sanitize(name)
    }

    pub fn wants_qr_code(&self) -> bool {
        self.show_qr_code.is_set() && !self.qr_code_data.is_blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_invoice() -> InvoicePayload {
        serde_json::from_value(json!({
            "invoice_number": "INV-001",
            "invoice_date": "01/04/2024",
            "company_name": "Acme Traders",
            "customer_name": "Kirana Store",
            "products": [{"serial_no": 1, "product_name": "Tea 250g", "qty": "10"}],
            "net_receivable": "1180.00"
        }))
        .unwrap()
    }

    #[test]
    fn minimal_invoice_is_valid() {
        assert!(minimal_invoice().validate(DocumentKind::Invoice).is_ok());
    }

    #[test]
    fn reports_all_missing_fields_in_order() {
        let payload: InvoicePayload = serde_json::from_value(json!({
            "invoice_date": "01/04/2024",
            "company_name": "",
            "products": []
        }))
        .unwrap();

        let err = payload.validate(DocumentKind::Invoice).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: invoice_number, company_name, customer_name, products, net_receivable"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn ewaybill_requires_ewb_number() {
        let payload = minimal_invoice();

        let err = payload.validate(DocumentKind::EwayBill).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields for E-Way Bill: ewb_number"
        );
    }

    #[test]
    fn ewaybill_defaults_keep_caller_values() {
        let mut payload = minimal_invoice();
        payload.document_type = DisplayText::from("DUPLICATE FOR TRANSPORTER");
        payload.apply_ewaybill_defaults();

        assert!(payload.is_ewaybill.is_set());
        assert_eq!(payload.invoice_type.as_str(), DEFAULT_EWAYBILL_INVOICE_TYPE);
        assert_eq!(payload.document_type.as_str(), "DUPLICATE FOR TRANSPORTER");
        assert_eq!(
            payload.ewaybill_compliance_note.as_ref().map(|n| n.as_str()),
            Some(DEFAULT_EWAYBILL_COMPLIANCE_NOTE)
        );
    }

    #[test]
    fn explicit_empty_compliance_note_is_kept() {
        let mut payload: InvoicePayload =
            serde_json::from_value(json!({"ewaybill_compliance_note": ""})).unwrap();
        payload.apply_ewaybill_defaults();

        assert_eq!(
            payload.ewaybill_compliance_note.as_ref().map(|n| n.as_str()),
            Some("")
        );
    }

    #[test]
    fn attachment_names_are_sanitized() {
        let mut payload = minimal_invoice();
        payload.invoice_number = DisplayText::from("INV/2024/001");
        payload.ewb_number = DisplayText::from("331000123456");

        assert_eq!(
            payload.attachment_name(DocumentKind::Invoice),
            "invoice_INV2024001.pdf"
        );
        assert_eq!(
            payload.attachment_name(DocumentKind::EwayBill),
            "ewaybill_331000123456.pdf"
        );
    }

    #[test]
    fn qr_code_needs_flag_and_data() {
        let mut payload = minimal_invoice();
        payload.qr_code_data = DisplayText::from("signed-qr");
        assert!(!payload.wants_qr_code());

        payload.show_qr_code = Flag(true);
        assert!(payload.wants_qr_code());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let payload: InvoicePayload =
            serde_json::from_value(json!({"invoice_number": 42, "custom": {"x": 1}})).unwrap();
        assert_eq!(payload.invoice_number.as_str(), "42");
    }
}
