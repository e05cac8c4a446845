use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::core::{Orientation, PageSize, PdfConfig};
use crate::generators::{BrowserSettings, ChromePdfEngine, InvoiceGenerator, PdfEngine};
use crate::templates::TemplateEngine;

#[derive(Clone)]
pub struct ApiState {
    pub generator: Arc<InvoiceGenerator>,
    pub config: Arc<AppConfig>,
}

/// Service settings, read from the environment (`PORT`, `TEMPLATE_DIR`, ...).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_payload_bytes: usize,
    pub template_dir: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
    pub chrome_sandbox: bool,
    pub browser_timeout_secs: u64,
    pub pdf_page_size: String,
    pub pdf_orientation: String,
    pub enable_compression: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8088,
            max_payload_bytes: 2_097_152, // 2MB
            template_dir: None,
            temp_dir: None,
            chrome_path: None,
            chrome_sandbox: false,
            browser_timeout_secs: 30,
            pdf_page_size: "A4".to_string(),
            pdf_orientation: "portrait".to_string(),
            enable_compression: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(config::Environment::default().try_parsing(true))
    }

    pub fn load(environment: config::Environment) -> anyhow::Result<Self> {
        let defaults = AppConfig::default();

        let settings = config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("max_payload_bytes", defaults.max_payload_bytes as i64)?
            .set_default("chrome_sandbox", defaults.chrome_sandbox)?
            .set_default("browser_timeout_secs", defaults.browser_timeout_secs as i64)?
            .set_default("pdf_page_size", defaults.pdf_page_size)?
            .set_default("pdf_orientation", defaults.pdf_orientation)?
            .set_default("enable_compression", defaults.enable_compression)?
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            chrome_path: self.chrome_path.clone(),
            sandbox: self.chrome_sandbox,
            timeout: Duration::from_secs(self.browser_timeout_secs),
            temp_dir: self.temp_dir.clone().unwrap_or_else(std::env::temp_dir),
        }
    }

    pub fn pdf_config(&self) -> anyhow::Result<PdfConfig> {
        let page_size: PageSize = self
            .pdf_page_size
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        let orientation: Orientation = self
            .pdf_orientation
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        Ok(PdfConfig::builder()
            .page_size(page_size)
            .orientation(orientation)
            .build())
    }
}

impl ApiState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let engine = ChromePdfEngine::new(config.browser_settings(), config.pdf_config()?);
        Self::with_pdf_engine(config, Arc::new(engine))
    }

    /// Builds the state around a caller-supplied PDF engine.
    pub fn with_pdf_engine(
        config: AppConfig,
        pdf_engine: Arc<dyn PdfEngine>,
    ) -> anyhow::Result<Self> {
        let templates = TemplateEngine::with_template_dir(config.template_dir.as_deref())?;

        Ok(ApiState {
            generator: Arc::new(InvoiceGenerator::new(templates, pdf_engine)),
            config: Arc::new(config),
        })
    }
}
