//! Endpoint URL helpers.

use crate::api::QUERY_ENDPOINT;

/// Default backend location when neither the CLI nor the config names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Strip trailing slashes so endpoints can be appended without doubling them.
///
/// ```
/// use copilot_chat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:5001/"), "http://localhost:5001");
/// assert_eq!(normalize_base_url("https://copilot.example///"), "https://copilot.example");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash.
///
/// ```
/// use copilot_chat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:5001/", "/api/query"),
///     "http://localhost:5001/api/query"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}

pub fn query_url(base_url: &str) -> String {
    construct_api_url(base_url, QUERY_ENDPOINT)
}
