//! End-to-end coverage of the config-driven request policies: allowed
//! hosts, HTTPS redirect and HSTS.

use crate::common::{TestApp, routes};

#[tokio::test]
async fn disallowed_host_is_rejected_when_debug_is_off() {
    let app = TestApp::spawn_with(|config| {
        config.debug = false;
        config.allowed_hosts = vec!["example.com".into()];
    })
    .await;

    let res = app
        .get_with_header(routes::CONTENT, "host", "evil.com")
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "DISALLOWED_HOST");

    let res = app
        .get_with_header(routes::CONTENT, "host", "example.com:8000")
        .await;
    assert_eq!(res.status, 200, "allowed host with port: {}", res.text);
}

#[tokio::test]
async fn debug_mode_relaxes_the_host_check() {
    let app = TestApp::spawn_with(|config| {
        config.debug = true;
        config.allowed_hosts = vec!["example.com".into()];
    })
    .await;

    let res = app
        .get_with_header(routes::CONTENT, "host", "anything.goes")
        .await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn bracketed_ipv6_hosts_match_the_allow_list() {
    let app = TestApp::spawn_with(|config| {
        config.debug = false;
        config.allowed_hosts = vec!["[::1]".into()];
    })
    .await;

    let res = app
        .get_with_header(routes::CONTENT, "host", "[::1]:8000")
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let res = app
        .get_with_header(routes::CONTENT, "host", "[2001:db8::1]:8000")
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn plain_http_is_redirected_when_ssl_redirect_is_on() {
    let app = TestApp::spawn_with(|config| {
        config.security.ssl_redirect = true;
    })
    .await;

    let res = app.get(routes::CONTENT).await;
    assert_eq!(res.status, 301);
    let location = res.headers["location"].to_str().expect("location header");
    assert!(location.starts_with("https://"), "{location}");
    assert!(location.ends_with(routes::CONTENT), "{location}");

    // Traffic already terminated as HTTPS at the proxy passes through.
    let res = app
        .get_with_header(routes::CONTENT, "x-forwarded-proto", "https")
        .await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn hsts_header_is_stamped_when_configured() {
    let app = TestApp::spawn_with(|config| {
        config.security.hsts_seconds = 31_536_000;
    })
    .await;

    let res = app.get(routes::CONTENT).await;
    assert_eq!(res.status, 200);
    assert_eq!(
        res.headers["strict-transport-security"],
        "max-age=31536000"
    );

    let plain = TestApp::spawn().await;
    let res = plain.get(routes::CONTENT).await;
    assert!(!res.headers.contains_key("strict-transport-security"));
}
