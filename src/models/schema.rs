use serde_json::{Map, Value};

use super::invoice::{EWAYBILL_REQUIRED_FIELDS, REQUIRED_FIELDS};

const DOCUMENT_FIELDS: &[(&str, &str)] = &[
    ("invoice_number", "string - Invoice number"),
    ("invoice_date", "string - Invoice date (DD/MM/YYYY)"),
    ("invoice_type", "string - Type of invoice (default: TAX INVOICE)"),
    ("document_type", "string - Document type (e.g., ORIGINAL FOR RECIPIENT)"),
    ("is_einvoice", "boolean - Whether this is an E-Invoice"),
    ("irn_number", "string - IRN number for E-Invoice"),
    ("ack_no", "string - Acknowledgement number"),
    ("ack_date", "string - Acknowledgement date"),
    ("einvoice_status", "string - E-Invoice status (GENERATED, PENDING, FAILED)"),
    ("show_qr_code", "boolean - Whether to show QR code"),
    ("qr_code_data", "string - QR code data content"),
    ("government_portal", "string - Government portal URL"),
    ("einvoice_compliance_note", "string - Compliance note for E-Invoice"),
    ("signed_invoice_available", "boolean - Whether signed invoice is available"),
    ("is_ewaybill", "boolean - Whether this is an E-Way Bill"),
    ("ewb_number", "string - E-Way Bill number"),
    ("ewb_date", "string - E-Way Bill generation date"),
    ("ewb_valid_until", "string - E-Way Bill validity date"),
    ("ewaybill_status", "string - E-Way Bill status (GENERATED, PENDING, FAILED)"),
    ("ewaybill_compliance_note", "string - Compliance note for E-Way Bill"),
    ("transporter_name", "string - Transporter name"),
    ("transporter_id", "string - Transporter ID/GSTIN"),
    ("vehicle_number", "string - Vehicle registration number"),
    ("driver_name", "string - Driver name"),
    ("driver_mobile", "string - Driver mobile number"),
    ("transport_distance", "string - Transport distance in KM"),
    ("transport_mode", "string - Mode of transport (Road/Rail/Air/Ship)"),
    ("from_place", "string - Origin place"),
    ("from_pincode", "string - Origin pincode"),
    ("from_state_code", "string - Origin state code"),
    ("to_place", "string - Destination place"),
    ("to_pincode", "string - Destination pincode"),
    ("to_state_code", "string - Destination state code"),
    ("has_extensions", "boolean - Whether E-Way Bill has extensions"),
    ("extension_count", "number - Number of extensions applied"),
    ("company_name", "string - Company name"),
    ("company_address", "string - Company address"),
    ("company_city", "string - Company city"),
    ("company_gstin", "string - Company GSTIN"),
    ("company_pan", "string - Company PAN"),
    ("company_fssai", "string - Company FSSAI license"),
    ("company_gst_state", "string - Company GST state"),
    ("company_state_code", "string - Company state code"),
    ("sm_name", "string - Sales manager name"),
    ("beat_name", "string - Beat name"),
    ("sm_contact", "string - Sales manager contact"),
    ("sm_mobile", "string - Sales manager mobile"),
    ("customer_name", "string - Customer name"),
    ("customer_address", "string - Customer address"),
    ("retailer_code", "string - Retailer code"),
    ("po_so_ref", "string - PO/SO reference"),
    ("customer_pan", "string - Customer PAN"),
    ("customer_gstin", "string - Customer GSTIN"),
    ("payment_mode", "string - Payment mode"),
    ("customer_contact", "string - Customer contact"),
    ("drug_license", "string - Drug license number"),
    ("customer_fssai", "string - Customer FSSAI"),
    ("customer_gst_state", "string - Customer GST state"),
    ("customer_state_code", "string - Customer state code"),
    ("vehicle", "string - Vehicle information"),
];

const LINE_ITEM_FIELDS: &[(&str, &str)] = &[
    ("serial_no", "number - Serial number"),
    ("hsn_code", "string - HSN code"),
    ("product_name", "string - Product name"),
    ("mrp", "string - MRP"),
    ("cs", "string - Cases"),
    ("qty", "string - Quantity"),
    ("free", "string - Free quantity"),
    ("upc", "string - UPC"),
    ("gross_rate", "string - Gross rate"),
    ("total", "string - Total amount"),
    ("pri_disc", "string - Primary discount"),
    ("sec_disc", "string - Secondary discount"),
    ("lnd_disc", "string - L&D discount"),
    ("taxable_amt", "string - Taxable amount"),
    ("cgst_rate", "string - CGST rate"),
    ("cgst_amt", "string - CGST amount"),
    ("sgst_rate", "string - SGST rate"),
    ("sgst_amt", "string - SGST amount"),
    ("net_rate", "string - Net rate"),
    ("net_value", "string - Net value"),
];

const TOTALS_FIELDS: &[(&str, &str)] = &[
    ("total_items", "string - Total number of items"),
    ("total_cs", "string - Total cases"),
    ("total_qty", "string - Total quantity"),
    ("total_free", "string - Total free quantity"),
    ("grand_total", "string - Grand total"),
    ("total_pri_disc", "string - Total primary discount"),
    ("total_sec_disc", "string - Total secondary discount"),
    ("total_lnd_disc", "string - Total L&D discount"),
    ("total_taxable_amt", "string - Total taxable amount"),
    ("total_cgst_amt", "string - Total CGST amount"),
    ("total_sgst_amt", "string - Total SGST amount"),
];

const TAX_SLAB_FIELDS: &[(&str, &str)] = &[
    ("taxable_amount", "string - Taxable amount for this slab"),
    ("cgst_rate", "string - CGST rate"),
    ("cgst_amount", "string - CGST amount"),
    ("sgst_rate", "string - SGST rate"),
    ("sgst_amount", "string - SGST amount"),
];

const SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("pre_tax_scheme_amt", "string - Pre-tax scheme amount"),
    ("net_amount", "string - Net amount"),
    ("total_cgst", "string - Total CGST"),
    ("total_sgst", "string - Total SGST"),
    ("cash_disc_deducted", "string - Cash discount deducted"),
    ("tcs_tax_amt", "string - TCS tax amount"),
    ("credit_adj", "string - Credit adjustment"),
    ("round_off", "string - Round off amount"),
    ("net_receivable", "string - Net receivable amount"),
    ("amount_in_words", "string - Amount in words"),
    ("reverse_charge_basis", "string - Reverse charge basis (Yes/No)"),
    ("return_policy_note", "string - Return policy note"),
    ("jurisdiction", "string - Jurisdiction"),
    ("bank_account_no", "string - Bank account number"),
    ("bank_name", "string - Bank name"),
    ("bank_ifsc", "string - Bank IFSC code"),
];

const EWAYBILL_SPECIFIC_FIELDS: &[(&str, &str)] = &[
    ("ewb_number", "string - E-Way Bill number (required)"),
    ("ewb_date", "string - E-Way Bill generation date"),
    ("ewb_valid_until", "string - E-Way Bill validity end date/time"),
    ("ewaybill_status", "string - Status: GENERATED/PENDING/FAILED"),
    ("transporter_name", "string - Name of the transporter"),
    ("transporter_id", "string - Transporter GSTIN or ID"),
    ("vehicle_number", "string - Vehicle registration number"),
    ("driver_name", "string - Driver's name"),
    ("driver_mobile", "string - Driver's mobile number"),
    ("transport_distance", "string - Distance in kilometers"),
    ("transport_mode", "string - Road/Rail/Air/Ship"),
    ("from_place", "string - Origin city/place"),
    ("from_pincode", "string - Origin pincode"),
    ("from_state_code", "string - Origin state code"),
    ("to_place", "string - Destination city/place"),
    ("to_pincode", "string - Destination pincode"),
    ("to_state_code", "string - Destination state code"),
    ("has_extensions", "boolean - Whether validity was extended"),
    ("extension_count", "number - Number of extensions applied"),
];

const EWAYBILL_AUTOMATIC_FIELDS: &[(&str, &str)] = &[
    ("is_ewaybill", "boolean - Automatically set to true"),
    ("invoice_type", "string - Automatically set to 'TAX INVOICE WITH E-WAY BILL'"),
    ("document_type", "string - Automatically set to 'ORIGINAL FOR CONSIGNEE'"),
    ("ewaybill_compliance_note", "string - Auto-generated compliance text"),
];

fn describe(fields: &[(&str, &str)]) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, description)| (name.to_string(), Value::from(*description)))
        .collect()
}

/// Field-by-field description of the payload accepted by `/generate-invoice`.
pub fn template_schema() -> Value {
    let mut schema = describe(DOCUMENT_FIELDS);
    schema.insert(
        "products".to_string(),
        Value::Array(vec![Value::Object(describe(LINE_ITEM_FIELDS))]),
    );
    schema.extend(describe(TOTALS_FIELDS));
    schema.insert(
        "tax_slabs".to_string(),
        Value::Array(vec![Value::Object(describe(TAX_SLAB_FIELDS))]),
    );
    schema.extend(describe(SUMMARY_FIELDS));

    Value::Object(schema)
}

/// E-way bill specifics: required fields, transport fields and what the endpoint fills in.
pub fn ewaybill_schema() -> Value {
    let required: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .chain(EWAYBILL_REQUIRED_FIELDS.iter())
        .copied()
        .collect();

    let mut schema = Map::new();
    schema.insert("required_fields".to_string(), Value::from(required));
    schema.insert(
        "ewaybill_specific".to_string(),
        Value::Object(describe(EWAYBILL_SPECIFIC_FIELDS)),
    );
    schema.insert(
        "automatic_fields".to_string(),
        Value::Object(describe(EWAYBILL_AUTOMATIC_FIELDS)),
    );

    Value::Object(schema)
}
