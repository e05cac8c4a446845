pub mod display;
pub mod document;
pub mod invoice;
pub mod schema;

pub use display::*;
pub use document::*;
pub use invoice::*;
pub use schema::*;
