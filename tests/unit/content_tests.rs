//! Unit tests for content variants, frameworks, and URL validation.

use mcp_ui_bridge::models::content::{
    Annotations, BlobContent, Framework, HtmlContent, RemoteDomContent, UiContent, UrlContent,
    MIME_TYPE_HTML, MIME_TYPE_URL_LIST,
};
use mcp_ui_bridge::AppError;

#[test]
fn framework_parses_known_tags() {
    assert_eq!("react".parse::<Framework>(), Ok(Framework::React));
    assert_eq!(
        "webcomponents".parse::<Framework>(),
        Ok(Framework::WebComponents)
    );
}

#[test]
fn framework_rejects_unknown_tag() {
    let err = "svelte".parse::<Framework>().expect_err("must fail");
    assert_eq!(
        err,
        AppError::Validation("unsupported remote-dom framework: svelte".into())
    );
}

#[test]
fn framework_display_matches_wire_tag() {
    assert_eq!(Framework::WebComponents.to_string(), "webcomponents");
}

#[test]
fn mime_type_per_variant() {
    assert_eq!(
        UiContent::from(HtmlContent::default()).mime_type(),
        MIME_TYPE_HTML
    );
    assert_eq!(
        UiContent::from(UrlContent::default()).mime_type(),
        MIME_TYPE_URL_LIST
    );
    assert_eq!(
        UiContent::from(RemoteDomContent {
            framework: Some(Framework::WebComponents),
            ..RemoteDomContent::default()
        })
        .mime_type(),
        "application/vnd.mcp-ui.remote-dom+javascript; framework=webcomponents"
    );
    assert_eq!(
        UiContent::from(BlobContent {
            mime_type: "font/woff2".into(),
            ..BlobContent::default()
        })
        .mime_type(),
        "font/woff2"
    );
}

#[test]
fn annotations_are_exposed_for_every_variant() {
    let annotations = Annotations {
        audience: vec!["assistant".into()],
        priority: None,
    };
    let content = UiContent::from(UrlContent {
        url: "https://example.com".into(),
        annotations: Some(annotations.clone()),
    });
    assert_eq!(content.annotations(), Some(&annotations));
    assert_eq!(UiContent::from(HtmlContent::default()).annotations(), None);
}

#[test]
fn url_content_accepts_https() {
    let content = UrlContent {
        url: "https://example.com/widget?id=1".into(),
        annotations: None,
    };
    assert!(content.validate().is_ok());
}

#[test]
fn url_content_rejects_non_http_scheme() {
    let content = UrlContent {
        url: "javascript:alert(1)".into(),
        annotations: None,
    };
    let err = content.validate().expect_err("must fail");
    assert!(err.to_string().contains("http or https"), "{err}");
}

#[test]
fn content_serializes_through_wire_envelope() {
    let content = UiContent::from(HtmlContent {
        html: "<div>Hello</div>".into(),
        annotations: None,
    });
    let json = serde_json::to_value(&content).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"mimeType": "text/html", "text": "<div>Hello</div>"})
    );
}

#[test]
fn content_deserialize_rejects_unknown_mime_type() {
    let result: Result<UiContent, _> =
        serde_json::from_str(r#"{"mimeType":"application/x-custom","text":"?"}"#);
    let err = result.expect_err("must fail");
    assert!(
        err.to_string().contains("unknown content mime type"),
        "{err}"
    );
}
