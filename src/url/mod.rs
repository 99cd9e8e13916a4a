//! URL handling module for Listing-Scout
//!
//! This module decides whether a candidate string is a listing URL for the
//! configured site. It never touches the network.

use url::Url;

/// Checks that a candidate string is an absolute HTTP(S) URL on the expected site
///
/// The host must contain `domain_token` (compared case-insensitively), so
/// `www.zillow.com` and `zillow.com` both match the token `zillow.com`.
/// Empty and malformed input returns `false`.
///
/// # Examples
///
/// ```
/// use listing_scout::url::validate;
///
/// assert!(validate("https://www.zillow.com/homedetails/123_zpid/", "zillow.com"));
/// assert!(!validate("https://www.example.com/homedetails/123_zpid/", "zillow.com"));
/// assert!(!validate("not a url", "zillow.com"));
/// ```
pub fn validate(candidate: &str, domain_token: &str) -> bool {
    let candidate = candidate.trim();
    if candidate.is_empty() || domain_token.is_empty() {
        return false;
    }

    let parsed = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match parsed.host_str() {
        Some(host) => host
            .to_lowercase()
            .contains(&domain_token.to_lowercase()),
        None => false,
    }
}
