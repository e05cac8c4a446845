pub mod api;
pub mod core;
pub mod generators;
pub mod metrics;
pub mod models;
pub mod templates;

// Re-export commonly used types
pub use crate::core::{PdfConfig, RenderError, RenderResult};
pub use generators::{ChromePdfEngine, InvoiceGenerator, PdfEngine};
pub use models::{DocumentKind, InvoicePayload, OutputFormat};
pub use templates::TemplateEngine;
