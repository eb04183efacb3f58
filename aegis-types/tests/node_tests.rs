use aegis_types::{Error, Node};
use std::str::FromStr;

// ── Decoding ──────────────────────────────────────────────────────

#[test]
fn decodes_url_and_secret() {
    let node = Node::from_str("http://10.0.0.2:8080|hunter2").unwrap();
    assert_eq!(node.base_url().as_str(), "http://10.0.0.2:8080/");
    assert_eq!(node.secret(), "hunter2");
}

#[test]
fn decodes_https_with_path_prefix() {
    let node = Node::from_str("https://dns.example.com/admin|s3cret").unwrap();
    assert_eq!(node.base_url().path(), "/admin");
    assert_eq!(node.secret(), "s3cret");
}

#[test]
fn empty_secret_is_allowed() {
    // Appliances without a password configured present an empty secret.
    let node = Node::from_str("http://10.0.0.2|").unwrap();
    assert_eq!(node.secret(), "");
}

#[test]
fn missing_separator_fails() {
    assert!(matches!(
        Node::from_str("http://10.0.0.2:8080"),
        Err(Error::InvalidFormat)
    ));
}

#[test]
fn extra_separator_fails() {
    assert!(matches!(
        Node::from_str("http://10.0.0.2|secret|extra"),
        Err(Error::InvalidFormat)
    ));
}

#[test]
fn unparsable_url_fails() {
    assert!(matches!(
        Node::from_str("not a url|secret"),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn pathless_scheme_is_rejected() {
    assert!(matches!(
        Node::from_str("mailto:admin@example.com|secret"),
        Err(Error::UnsupportedUrl(_))
    ));
}

// ── API path construction ─────────────────────────────────────────

#[test]
fn api_url_joins_endpoint() {
    let node = Node::from_str("http://10.0.0.2:8080|x").unwrap();
    assert_eq!(
        node.api_url("auth").as_str(),
        "http://10.0.0.2:8080/api/auth"
    );
}

#[test]
fn api_url_keeps_base_path_prefix() {
    let node = Node::from_str("https://dns.example.com/admin|x").unwrap();
    assert_eq!(
        node.api_url("teleporter").as_str(),
        "https://dns.example.com/admin/api/teleporter"
    );
}

#[test]
fn api_url_handles_nested_endpoints() {
    let node = Node::from_str("http://10.0.0.2|x").unwrap();
    assert_eq!(
        node.api_url("info/version").as_str(),
        "http://10.0.0.2/api/info/version"
    );
}

#[test]
fn api_url_ignores_trailing_slash_on_base() {
    let node = Node::from_str("http://10.0.0.2:8080/|x").unwrap();
    assert_eq!(
        node.api_url("auth").as_str(),
        "http://10.0.0.2:8080/api/auth"
    );
}

// ── Display ───────────────────────────────────────────────────────

#[test]
fn display_shows_url_only() {
    let node = Node::from_str("http://10.0.0.2:8080|hunter2").unwrap();
    let printed = node.to_string();
    assert_eq!(printed, "http://10.0.0.2:8080/");
    assert!(!printed.contains("hunter2"));
}

#[test]
fn debug_is_available_for_diagnostics() {
    let node = Node::from_str("http://10.0.0.2|x").unwrap();
    assert!(format!("{node:?}").contains("Node"));
}
