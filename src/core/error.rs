use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Validation(String),

    #[error("Error generating HTML: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Error generating QR code: {0}")]
    QrCode(String),

    #[error("Error generating PDF: {0}")]
    Browser(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RenderError::Validation(_))
    }
}

impl From<qrcode::types::QrError> for RenderError {
    fn from(error: qrcode::types::QrError) -> Self {
        RenderError::QrCode(error.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(error: image::ImageError) -> Self {
        RenderError::QrCode(error.to_string())
    }
}

impl From<tokio::task::JoinError> for RenderError {
    fn from(error: tokio::task::JoinError) -> Self {
        RenderError::Browser(format!("render task aborted: {}", error))
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
