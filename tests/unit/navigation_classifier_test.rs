//! Integration-level unit tests for address-bar classification.
//!
//! Each case feeds trimmed address-bar text through the classifier and checks
//! both the resulting URL and why it was chosen.

use rstest::rstest;
use tabshell::services::navigation_classifier::{classify, NavigationClassifier};
use tabshell::types::navigation::Resolution;

#[rstest]
#[case("127.0.0.1:5500", "http://127.0.0.1:5500")]
#[case("localhost:3000", "http://localhost:3000")]
#[case("devbox:8080", "http://devbox:8080")]
#[case("my-host_1:9000", "http://my-host_1:9000")]
#[case("192.168.0.10", "http://192.168.0.10")]
#[case("localhost", "http://localhost")]
fn local_addresses_get_plain_http(#[case] input: &str, #[case] expected: &str) {
    let target = classify(input);
    assert_eq!(target.url, expected);
    assert_eq!(target.resolution, Resolution::LocalAddress);
}

#[rstest]
#[case("example.com", "https://example.com")]
#[case("www.example.de", "https://www.example.de")]
#[case("docs.rs/regex", "https://docs.rs/regex")]
#[case("https://rust-lang.org", "https://rust-lang.org")]
#[case("http://example.org/a?b=c", "http://example.org/a?b=c")]
#[case("ftp://files.example.net", "ftp://files.example.net")]
#[case("HTTPS://Example.COM", "HTTPS://Example.COM")]
fn url_like_text_is_used_as_address(#[case] input: &str, #[case] expected: &str) {
    let target = classify(input);
    assert_eq!(target.url, expected);
    assert_eq!(target.resolution, Resolution::ExplicitUrl);
}

#[rstest]
#[case("openai docs", "https://duckduckgo.com/?q=openai+docs")]
#[case("rust", "https://duckduckgo.com/?q=rust")]
#[case("my site .com", "https://duckduckgo.com/?q=my+site+.com")]
#[case("c++ tutorial", "https://duckduckgo.com/?q=c%2B%2B+tutorial")]
#[case("wikipedia.de", "https://duckduckgo.com/?q=wikipedia.de")]
#[case("café", "https://duckduckgo.com/?q=caf%C3%A9")]
fn everything_else_is_searched(#[case] input: &str, #[case] expected: &str) {
    let target = classify(input);
    assert_eq!(target.url, expected);
    assert_eq!(target.resolution, Resolution::SearchQuery);
}

/// Local addresses win over every other rule, even ones that look like a
/// scheme-less URL with a port.
#[test]
fn local_address_takes_priority_over_url_rules() {
    let target = classify("localhost:8000");
    assert_eq!(target.resolution, Resolution::LocalAddress);
    assert!(!target.url.starts_with("https://"));
}

#[test]
fn search_engine_is_configurable() {
    let classifier = NavigationClassifier::new("https://search.example/?query=");
    let target = classifier.classify("rust borrow checker");
    assert_eq!(
        target.url,
        "https://search.example/?query=rust+borrow+checker"
    );
    assert_eq!(classifier.search_url(), "https://search.example/?query=");
}

#[test]
fn classification_is_deterministic() {
    let classifier = NavigationClassifier::default();
    assert_eq!(classifier.classify("example.com"), classifier.classify("example.com"));
}
