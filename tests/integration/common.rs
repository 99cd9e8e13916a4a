use listing_scout::config::Config;
use listing_scout::output::WriteMode;
use listing_scout::pipeline::{Coordinator, RateLimiter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Listing markup with every field present
pub const FULL_LISTING: &str = r#"
<html>
<head><title>123 Main St | Zillow</title></head>
<body>
    <h1 class="ds-address-container">123 Main St, Springfield, IL 62701</h1>
    <div class="summary"><span data-testid="price">$450,000</span></div>
    <div class="facts">
        <div><span>Lot size</span></div>
        <div><span>0.25 Acres</span></div>
    </div>
    <div class="stats">
        <div><span>$/sqft</span></div>
        <div>$215</div>
    </div>
    <dl><dt><strong>12 days</strong> on Zillow</dt></dl>
</body>
</html>
"#;

/// Listing markup without a price anywhere
pub const NO_PRICE_LISTING: &str = r#"
<html><body>
    <h1 data-testid="bdp-address">9 Elm St, Dover, DE 19901</h1>
    <p>Contact agent for details.</p>
</body></html>
"#;

/// A scratch directory holding the output file and error log
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("listings.csv")
    }

    pub fn error_log(&self) -> PathBuf {
        self.dir.path().join("errors.log")
    }

    /// Configuration accepting the mock server's host with a short timeout
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.site.domain = "127.0.0.1".to_string();
        config.fetch.timeout_secs = 1;
        config.output.error_log = self.error_log().display().to_string();
        config
    }

    /// A coordinator with no pause between requests
    pub fn coordinator(&self, mode: WriteMode) -> Coordinator {
        self.coordinator_with_threshold(mode, 20)
    }

    pub fn coordinator_with_threshold(&self, mode: WriteMode, threshold: usize) -> Coordinator {
        Coordinator::new(self.config(), self.output(), mode)
            .expect("Failed to build coordinator")
            .with_rate_limiter(RateLimiter::from_parts(
                Duration::ZERO,
                Duration::ZERO,
                threshold,
            ))
    }
}

/// Reads a CSV file into its header and data rows
pub fn read_rows(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open output");
    let header = reader
        .headers()
        .expect("Failed to read header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("Failed to read row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (header, rows)
}
