pub mod invoice;
pub mod pdf;

pub use invoice::InvoiceGenerator;
pub use pdf::{BrowserSettings, ChromePdfEngine, PdfEngine};
