use url::Url;

use crate::config::FaviconConfig;

/// Short brand token for a raw URL: `https://www.example.com/x` gives `example`.
///
/// Unparsable input falls back to the lowercased text before the first `.`.
pub fn extract_brand_name(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => {
            let host = url.host_str().unwrap_or_default();
            let host = host.strip_prefix("www.").unwrap_or(host);
            let mut labels = host.split('.');
            match (labels.next(), labels.next()) {
                (Some(first), Some(_)) => first.to_string(),
                _ => host.to_string(),
            }
        }
        Err(_) => {
            let lowered = raw.to_lowercase();
            match lowered.split_once('.') {
                Some((head, _)) => head.to_string(),
                None => lowered,
            }
        }
    }
}

/// Favicon-service URL for the input's hostname, or an empty string when the
/// input is not a URL. Nothing is fetched here.
pub fn logo_url(raw: &str, favicon: &FaviconConfig) -> String {
    match Url::parse(raw) {
        Ok(url) => format!(
            "{}?sz={}&domain={}",
            favicon.service_url,
            favicon.size,
            url.host_str().unwrap_or_default()
        ),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://www.example.com/path", "example")]
    #[case("https://sub.example.co.in", "sub")]
    #[case("https://localhost:8080/", "localhost")]
    #[case("http://WWW.Example.ORG", "example")]
    #[case("https://wwwexample.com", "wwwexample")]
    #[case("not a url", "not a url")]
    #[case("Example.com", "example")]
    #[case("mailto:someone@example.com", "")]
    #[case("", "")]
    fn brand_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(extract_brand_name(raw), expected);
    }

    #[test]
    fn logo_url_uses_hostname() {
        let cfg = FaviconConfig::default();
        assert_eq!(
            logo_url("https://example.com", &cfg),
            "https://www.google.com/s2/favicons?sz=128&domain=example.com"
        );
        assert_eq!(
            logo_url("https://www.example.com/a/b?c=d", &cfg),
            "https://www.google.com/s2/favicons?sz=128&domain=www.example.com"
        );
    }

    #[test]
    fn logo_url_is_empty_for_unparsable_input() {
        assert_eq!(logo_url("example.com", &FaviconConfig::default()), "");
    }

    #[test]
    fn logo_url_honours_configured_service() {
        let cfg = FaviconConfig {
            service_url: "https://icons.test/get".to_string(),
            size: 64,
        };
        assert_eq!(
            logo_url("https://example.com", &cfg),
            "https://icons.test/get?sz=64&domain=example.com"
        );
    }
}
