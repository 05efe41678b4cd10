/// Environment variable holding the Together AI credential.
pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "TOGETHER_BASE_URL";

/// Public Together AI endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";

/// Reads the credential from the environment.
///
/// Called once per extraction, never cached. An empty value counts as missing.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
}

/// Resolves the API base URL: explicit value first, then the environment, then the default.
pub fn resolve_base_url(explicit: Option<String>) -> String {
    explicit
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}
