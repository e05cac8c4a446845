pub mod engine;
pub mod helpers;

pub use engine::{TemplateEngine, INVOICE_TEMPLATE_NAME};
pub use helpers::{generate_qr_base64, generate_qr_png};
