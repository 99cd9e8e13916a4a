use serde::Deserialize;

/// Chrome-on-Windows identification string sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Main configuration structure for Listing-Scout
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub output: OutputConfig,
}

/// The single site listings are scraped from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Token the URL host must contain (e.g., "zillow.com")
    pub domain: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "zillow.com".to_string(),
        }
    }
}

/// HTTP request configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Browser identification header
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Pacing between requests and the batch-size warning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Lower bound of the random pause between requests (seconds)
    #[serde(rename = "min-delay-secs")]
    pub min_delay_secs: f64,

    /// Upper bound of the random pause between requests (seconds)
    #[serde(rename = "max-delay-secs")]
    pub max_delay_secs: f64,

    /// Batches larger than this need operator confirmation
    #[serde(rename = "volume-threshold")]
    pub volume_threshold: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 5.0,
            max_delay_secs: 8.0,
            volume_threshold: 20,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix of the timestamped default output file name
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,

    /// Path of the append-only failure log
    #[serde(rename = "error-log")]
    pub error_log: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "zillow_data".to_string(),
            error_log: "scraper_errors.log".to_string(),
        }
    }
}
