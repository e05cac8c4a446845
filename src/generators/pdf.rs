use async_trait::async_trait;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::core::{PdfConfig, RenderError, RenderResult};

/// Converts a rendered HTML document into PDF bytes.
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn html_to_pdf(&self, html: String) -> RenderResult<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Chromium binary; auto-detected when `None`.
    pub chrome_path: Option<PathBuf>,
    pub sandbox: bool,
    pub timeout: Duration,
    pub temp_dir: PathBuf,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        BrowserSettings {
            chrome_path: None,
            sandbox: false,
            timeout: Duration::from_secs(30),
            temp_dir: std::env::temp_dir(),
        }
    }
}

/// Prints HTML through a headless Chromium launched per document.
pub struct ChromePdfEngine {
    browser: BrowserSettings,
    pdf: PdfConfig,
}

impl ChromePdfEngine {
    pub fn new(browser: BrowserSettings, pdf: PdfConfig) -> Self {
        ChromePdfEngine { browser, pdf }
    }
}

#[async_trait]
impl PdfEngine for ChromePdfEngine {
    async fn html_to_pdf(&self, html: String) -> RenderResult<Vec<u8>> {
        let start = Instant::now();

        // Chromium needs an absolute file:// URL
        let temp_dir = tokio::fs::canonicalize(&self.browser.temp_dir).await?;
        let html_path = temp_dir.join(format!("invoice_{}.html", Uuid::new_v4()));
        tokio::fs::write(&html_path, html).await?;

        let result = tokio::task::spawn_blocking({
            let browser = self.browser.clone();
            let pdf = self.pdf.clone();
            let html_path = html_path.clone();
            move || print_file_to_pdf(&browser, &pdf, &html_path)
        }).await;

        // Clean up regardless of outcome
        let _ = tokio::fs::remove_file(&html_path).await;

        let pdf_bytes = result??;

        tracing::debug!(
            "Printed PDF ({} bytes) in {} ms",
            pdf_bytes.len(),
            start.elapsed().as_millis()
        );

        Ok(pdf_bytes)
    }
}

fn print_file_to_pdf(
    settings: &BrowserSettings,
    pdf: &PdfConfig,
    html_path: &Path,
) -> RenderResult<Vec<u8>> {
    let options = LaunchOptions::default_builder()
        .headless(true)
        .sandbox(settings.sandbox)
        .path(settings.chrome_path.clone())
        .idle_browser_timeout(settings.timeout)
        .build()
        .map_err(|e| RenderError::Browser(format!("invalid launch options: {}", e)))?;

    let browser = Browser::new(options).map_err(browser_error)?;
    let tab = browser.new_tab().map_err(browser_error)?;
    tab.set_default_timeout(settings.timeout);

    let url = format!("file://{}", html_path.display());
    tab.navigate_to(&url).map_err(browser_error)?;
    tab.wait_until_navigated().map_err(browser_error)?;

    let bytes = tab
        .print_to_pdf(Some(print_options(pdf)))
        .map_err(browser_error)?;

    Ok(bytes)
}

/// Maps the page geometry onto Chromium's print parameters (inches).
pub fn print_options(config: &PdfConfig) -> PrintToPdfOptions {
    let (paper_width, paper_height) = config.page_size.dimensions_inches();

    PrintToPdfOptions {
        landscape: Some(config.is_landscape()),
        print_background: Some(config.print_background),
        scale: Some(config.scale),
        paper_width: Some(paper_width),
        paper_height: Some(paper_height),
        margin_top: Some(config.margin.top),
        margin_bottom: Some(config.margin.bottom),
        margin_left: Some(config.margin.left),
        margin_right: Some(config.margin.right),
        ..Default::default()
    }
}

fn browser_error(err: anyhow::Error) -> RenderError {
    RenderError::Browser(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Margin, Orientation};

    #[test]
    fn default_print_options_are_a4_portrait() {
        let options = print_options(&PdfConfig::default());

        assert_eq!(options.landscape, Some(false));
        assert_eq!(options.print_background, Some(true));
        assert_eq!(options.margin_top, Some(0.3));
        assert_eq!(options.margin_left, Some(0.3));
        let width = options.paper_width.unwrap();
        assert!((width - 8.27).abs() < 0.01);
    }

    #[test]
    fn custom_geometry_is_forwarded() {
        let config = PdfConfig::builder()
            .orientation(Orientation::Landscape)
            .margin(Margin::new(0.5, 0.4, 0.2, 0.1))
            .print_background(false)
            .build();

        let options = print_options(&config);
        assert_eq!(options.landscape, Some(true));
        assert_eq!(options.print_background, Some(false));
        assert_eq!(options.margin_bottom, Some(0.4));
        assert_eq!(options.margin_right, Some(0.1));
    }
}
