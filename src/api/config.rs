use url::Url;

use super::error::ApiError;

/// Used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable holding the API host (optionally with scheme/path).
pub const BASE_URL_ENV: &str = "GENE_VISION_API_URL";

/// Environment variable forcing the scheme: `true` → https, `false` → http.
pub const SECURE_ENV: &str = "GENE_VISION_API_SECURE";

const API_SUFFIX: &str = "/api";

// ---------------------------------------------------------------------------
// ApiConfig
// ---------------------------------------------------------------------------

/// Where the API lives. Passed explicitly to [`ApiClient::new`](super::ApiClient::new).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiConfig {
    /// Override endpoint; `None` means [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Force the scheme; `None` lets the host decide.
    pub secure: Option<bool>,
}

impl ApiConfig {
    /// Read [`BASE_URL_ENV`] and [`SECURE_ENV`]. Call `dotenv()` first to
    /// pick up a `.env` file.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty());
        let secure = std::env::var(SECURE_ENV).ok().and_then(|v| parse_flag(&v));
        ApiConfig { base_url, secure }
    }

    /// Normalise the configured value into the API root URL.
    ///
    /// * no scheme → `https://`, or `http://` for a local host
    /// * `secure` overrides whatever scheme was chosen or given
    /// * trailing slashes removed, then exactly one `/api` suffix
    pub fn resolve_base_url(&self) -> Result<Url, ApiError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);

        let (given_scheme, rest) = split_scheme(raw);
        let host = host_of(rest);
        if host.is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "no host".to_string(),
            });
        }
        let local = is_local_host(host);

        let scheme = match self.secure {
            Some(true) => "https",
            Some(false) => "http",
            None => given_scheme.unwrap_or(if local { "http" } else { "https" }),
        };

        let mut path = rest.trim_end_matches('/').to_string();
        if !path.ends_with(API_SUFFIX) {
            path.push_str(API_SUFFIX);
        }

        let candidate = format!("{scheme}://{path}");
        let url = Url::parse(&candidate).map_err(|e| ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ApiError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "no host".to_string(),
            });
        }
        Ok(url)
    }
}

// -- helpers --

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_scheme(raw: &str) -> (Option<&'static str>, &str) {
    for scheme in ["https", "http"] {
        let prefix_len = scheme.len() + 3;
        let matches = raw
            .get(..prefix_len)
            .is_some_and(|head| head.eq_ignore_ascii_case(&format!("{scheme}://")));
        if matches {
            return (Some(scheme), &raw[prefix_len..]);
        }
    }
    (None, raw)
}

/// Host part of `host[:port][/path]`, without the port.
fn host_of(rest: &str) -> &str {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    if let Some(v6) = authority.strip_prefix('[') {
        return v6.split(']').next().unwrap_or("");
    }
    authority.split(':').next().unwrap_or("")
}

fn is_local_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == "localhost"
        || host.ends_with(".localhost")
        || host == "127.0.0.1"
        || host == "0.0.0.0"
        || host == "::1"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(base_url: Option<&str>, secure: Option<bool>) -> String {
        ApiConfig {
            base_url: base_url.map(String::from),
            secure,
        }
        .resolve_base_url()
        .unwrap()
        .to_string()
    }

    #[test]
    fn default_is_local_dev_server() {
        assert_eq!(resolve(None, None), "http://localhost:8080/api");
        assert_eq!(resolve(Some("   "), None), "http://localhost:8080/api");
    }

    #[test]
    fn schemeless_remote_host_gets_https() {
        assert_eq!(resolve(Some("genes.example.org"), None), "https://genes.example.org/api");
    }

    #[test]
    fn schemeless_local_host_stays_http() {
        assert_eq!(resolve(Some("localhost:9000"), None), "http://localhost:9000/api");
        assert_eq!(resolve(Some("127.0.0.1:8080/"), None), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn explicit_scheme_is_kept() {
        assert_eq!(resolve(Some("http://genes.example.org"), None), "http://genes.example.org/api");
        assert_eq!(resolve(Some("HTTPS://genes.example.org"), None), "https://genes.example.org/api");
    }

    #[test]
    fn secure_flag_forces_scheme() {
        assert_eq!(resolve(Some("localhost:8080"), Some(true)), "https://localhost:8080/api");
        assert_eq!(resolve(Some("https://genes.example.org"), Some(false)), "http://genes.example.org/api");
    }

    #[test]
    fn exactly_one_api_suffix() {
        assert_eq!(resolve(Some("https://x.org/api"), None), "https://x.org/api");
        assert_eq!(resolve(Some("https://x.org/api/"), None), "https://x.org/api");
        assert_eq!(resolve(Some("https://x.org///"), None), "https://x.org/api");
        assert_eq!(resolve(Some("https://x.org/v2"), None), "https://x.org/v2/api");
    }

    #[test]
    fn garbage_is_rejected() {
        for bad in ["https://", "https:///api", "http://exa mple.org"] {
            let cfg = ApiConfig {
                base_url: Some(bad.into()),
                secure: None,
            };
            assert!(
                matches!(cfg.resolve_base_url(), Err(ApiError::InvalidBaseUrl { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn host_extraction() {
        assert_eq!(host_of("localhost:8080/api"), "localhost");
        assert_eq!(host_of("[::1]:8080"), "::1");
        assert_eq!(host_of("x.org"), "x.org");
        assert!(is_local_host("LOCALHOST"));
        assert!(!is_local_host("localhost.example.org"));
    }
}
