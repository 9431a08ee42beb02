//! Comparison keys derived from raw record fields.
//!
//! Everything here is a pure string transform. The matcher and the lookup
//! index must agree on these keys, so both go through this module.

use std::sync::OnceLock;

use regex::Regex;

/// Sub-domain prefixes that do not change which site a URL points at.
const EQUIVALENT_PREFIXES: [&str; 3] = ["www.", "m.", "mobile."];

fn scheme_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?:https?://|www\.)+").expect("Invalid regex"))
}

fn strip_scheme(value: &str) -> &str {
    scheme_prefix()
        .find(value)
        .map_or(value, |prefix| &value[prefix.end()..])
}

/// Normalize a URL for exact-key comparison.
///
/// Lowercases, strips `http://`/`https://` and `www.` prefixes and trailing
/// slashes, and trims whitespace. Applied until stable, so the result is a
/// fixpoint: `normalize_url(normalize_url(x)) == normalize_url(x)`.
///
/// ```
/// use credsync_core::normalize::normalize_url;
///
/// assert_eq!(normalize_url("HTTPS://www.Example.com/"), "example.com");
/// assert_eq!(normalize_url("   "), "");
/// ```
#[must_use]
pub fn normalize_url(url: &str) -> String {
    let mut current = url.trim().to_lowercase();
    loop {
        let next = strip_scheme(current.trim())
            .trim_end_matches('/')
            .trim()
            .to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Host portion of a URL, without scheme, `www.`, path, query or port.
///
/// Returns `None` when nothing is left.
#[must_use]
pub fn extract_domain(url: &str) -> Option<String> {
    let lowered = url.trim().to_lowercase();
    let without_scheme = strip_scheme(&lowered);
    let host = without_scheme
        .split(['/', '?', ':'])
        .next()
        .unwrap_or_default()
        .trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Domain key used by the index; degrades to the literal url when no domain
/// can be extracted.
#[must_use]
pub fn domain_key(url: &str) -> String {
    extract_domain(url).unwrap_or_else(|| url.to_string())
}

#[must_use]
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Last two dot-separated labels of a domain.
///
/// Multi-part public suffixes are not special-cased: `accounts.example.co.uk`
/// yields `co.uk`.
#[must_use]
pub fn root_domain(domain: &str) -> String {
    let labels = domain.split('.').collect::<Vec<_>>();
    if labels.len() < 2 {
        return domain.to_string();
    }
    labels[labels.len() - 2..].join(".")
}

fn label_count(domain: &str) -> usize {
    domain.split('.').count()
}

fn strip_equivalent_prefix(domain: &str) -> &str {
    EQUIVALENT_PREFIXES
        .iter()
        .find_map(|prefix| domain.strip_prefix(prefix))
        .unwrap_or(domain)
}

/// Heuristic "same site" test between two domains.
///
/// Equal domains, domains sharing their last two labels, or domains that
/// become equal once a `www.`, `m.` or `mobile.` prefix is removed from either
/// side. Every rule treats both arguments the same way, so the relation is
/// symmetric.
#[must_use]
pub fn domains_similar(d1: &str, d2: &str) -> bool {
    if d1 == d2 {
        return true;
    }

    if label_count(d1) >= 2 && label_count(d2) >= 2 && root_domain(d1) == root_domain(d2) {
        return true;
    }

    let left = [d1, strip_equivalent_prefix(d1)];
    let right = [d2, strip_equivalent_prefix(d2)];
    left.iter().any(|l| right.iter().any(|r| l == r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_strips_scheme_www_and_slash() {
        assert_eq!(normalize_url("https://www.example.com/"), "example.com");
        assert_eq!(normalize_url("http://Example.com"), "example.com");
        assert_eq!(normalize_url("example.com/"), "example.com");
        assert_eq!(normalize_url("  www.a.com  "), "a.com");
    }

    #[test]
    fn normalize_url_keeps_paths() {
        assert_eq!(
            normalize_url("https://example.com/login/"),
            "example.com/login"
        );
    }

    #[test]
    fn normalize_url_empty_input_yields_empty() {
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("https://"), "");
        assert_eq!(normalize_url(" / "), "");
    }

    #[test]
    fn normalize_url_is_idempotent() {
        let inputs = [
            "https://www.example.com/",
            "http://http://x.com//",
            "www.www.a.com",
            "x.com/ /",
            "HTTPS://WWW.A.COM/PATH?Q=1",
            " https://  ",
            "ftp://files.example.com/",
            "",
        ];
        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn extract_domain_takes_host() {
        assert_eq!(
            extract_domain("https://www.example.com/path?x=1").as_deref(),
            Some("example.com")
        );
        assert_eq!(
            extract_domain("accounts.google.com:443/login").as_deref(),
            Some("accounts.google.com")
        );
        assert_eq!(extract_domain("a.com?next=/").as_deref(), Some("a.com"));
        assert_eq!(extract_domain("HTTP://A.COM").as_deref(), Some("a.com"));
    }

    #[test]
    fn extract_domain_returns_none_when_empty() {
        assert_eq!(extract_domain(""), None);
        assert_eq!(extract_domain("https://"), None);
        assert_eq!(extract_domain("https:///path"), None);
    }

    #[test]
    fn domain_key_degrades_to_literal_url() {
        assert_eq!(domain_key("https://a.com/x"), "a.com");
        assert_eq!(domain_key("https://"), "https://");
    }

    #[test]
    fn normalize_username_lowercases_and_trims() {
        assert_eq!(normalize_username("  Bob@Mail.com "), "bob@mail.com");
    }

    #[test]
    fn root_domain_takes_last_two_labels() {
        assert_eq!(root_domain("accounts.example.com"), "example.com");
        assert_eq!(root_domain("accounts.example.co.uk"), "co.uk");
        assert_eq!(root_domain("localhost"), "localhost");
    }

    #[test]
    fn domains_similar_rules() {
        assert!(domains_similar("a.com", "a.com"));
        assert!(domains_similar("login.a.com", "a.com"));
        assert!(domains_similar("m.twitter.com", "twitter.com"));
        assert!(domains_similar("mobile.site", "site"));
        assert!(domains_similar("www.intranet", "m.intranet"));
        assert!(!domains_similar("a.com", "b.com"));
        assert!(!domains_similar("localhost", "otherhost"));
    }

    #[test]
    fn domains_similar_is_symmetric() {
        let domains = [
            "a.com",
            "www.a.com",
            "m.a.com",
            "mobile.a.com",
            "b.com",
            "a.co.uk",
            "b.co.uk",
            "localhost",
            "www.localhost",
            "m.localhost",
            "mobile",
            "",
        ];
        for left in domains {
            for right in domains {
                assert_eq!(
                    domains_similar(left, right),
                    domains_similar(right, left),
                    "{left:?} vs {right:?}"
                );
            }
        }
    }
}
