//! Panel resolvers.
//!
//! Two vizql endpoints expose the dashboard's zone tree for a session:
//! `bootstrapSession` (framed, several JSON documents in one body) and
//! `ensure-layout-for-sheet` (one plain JSON document). Each resolver
//! issues its request, reaches the zone tree, and hands it to
//! [`extract_panel_urls`].

use crate::acquisition::http_client::{form_data_body, HttpClient};
use crate::acquisition::markers::between;
use crate::config::ScrapeConfig;
use crate::error::{PanelError, PanelResult};
use crate::panels::PanelMap;
use crate::session::SessionToken;
use crate::zones::{descend, extract_panel_urls, BOOTSTRAP_ZONES_PATH, LAYOUT_ZONES_PATH};
use serde::de::IgnoredAny;
use serde_json::Value;

/// Ends the length prefix of the first bootstrap frame.
pub const FRAME_PREFIX_END: &str = ";";

/// Start of the secondary bootstrap frame, which terminates the primary one.
pub const SECONDARY_FRAME_MARKER: &str = "20;{\"";

/// Boundary for the hand-built ensure-layout multipart body.
pub const MULTIPART_BOUNDARY: &str = "---011000010111000001101001";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Isolate the primary JSON document of a bootstrap response.
///
/// The body looks like `<len>;{...primary...}20;{"...secondary...`. The
/// primary document is whatever lies between the first `;` and the
/// secondary frame marker. If nothing lies there, the document the marker
/// introduces is taken instead, up to its closing brace.
pub fn strip_bootstrap_body(body: &str) -> PanelResult<&str> {
    let span = between(body, FRAME_PREFIX_END, SECONDARY_FRAME_MARKER).ok_or_else(|| {
        if body.contains(FRAME_PREFIX_END) {
            PanelError::ParseError(format!(
                "bootstrap body has no `{SECONDARY_FRAME_MARKER}` frame marker"
            ))
        } else {
            PanelError::ParseError("bootstrap body has no frame length prefix".to_string())
        }
    })?;

    if !span.text.trim().is_empty() {
        return Ok(span.text);
    }

    // Skip `20;` and read exactly one object.
    let framed = &body[span.end + SECONDARY_FRAME_MARKER.len() - 2..];
    let mut stream = serde_json::Deserializer::from_str(framed).into_iter::<IgnoredAny>();
    match stream.next() {
        Some(Ok(_)) => Ok(&framed[..stream.byte_offset()]),
        Some(Err(e)) => Err(e.into()),
        None => Err(PanelError::ParseError(
            "bootstrap frame after marker is empty".to_string(),
        )),
    }
}

/// Parse a raw bootstrap response into resolved panels.
pub fn parse_bootstrap_panels(
    body: &str,
    token: &SessionToken,
    origin: &str,
) -> PanelResult<PanelMap> {
    let payload = strip_bootstrap_body(body)?;
    let root: Value = serde_json::from_str(payload)?;
    let zones = descend(&root, BOOTSTRAP_ZONES_PATH)?;
    Ok(extract_panel_urls(zones, token, origin))
}

/// Parse a raw ensure-layout response into resolved panels.
pub fn parse_layout_panels(
    body: &str,
    token: &SessionToken,
    origin: &str,
) -> PanelResult<PanelMap> {
    let root: Value = serde_json::from_str(body)?;
    let zones = descend(&root, LAYOUT_ZONES_PATH)?;
    Ok(extract_panel_urls(zones, token, origin))
}

/// Resolve panel images through the `bootstrapSession` endpoint.
pub async fn resolve_bootstrap_panels(
    client: &HttpClient,
    config: &ScrapeConfig,
    token: &SessionToken,
) -> PanelResult<PanelMap> {
    let headers = [
        ("user-agent", config.user_agent.as_str()),
        ("content-type", FORM_CONTENT_TYPE),
        ("cookie", config.locale_cookie.as_str()),
    ];

    let body = client
        .post_raw(
            &config.bootstrap_url(token.as_str()),
            config.bootstrap_form.clone(),
            &headers,
        )
        .await?
        .into_success_body()?;

    let panels = parse_bootstrap_panels(&body, token, &config.origin)?;
    tracing::info!("bootstrap: resolved {} panel(s)", panels.len());
    Ok(panels)
}

/// Resolve panel images through the `ensure-layout-for-sheet` command.
pub async fn resolve_layout_panels(
    client: &HttpClient,
    config: &ScrapeConfig,
    token: &SessionToken,
) -> PanelResult<PanelMap> {
    let (form, content_type) =
        form_data_body(MULTIPART_BOUNDARY, "targetSheet", &config.target_sheet);

    let headers = [
        ("cookie", config.locale_cookie.as_str()),
        ("user-agent", config.user_agent.as_str()),
        ("content-type", content_type.as_str()),
    ];

    let body = client
        .post_raw(&config.layout_url(token.as_str()), form, &headers)
        .await?
        .into_success_body()?;

    let panels = parse_layout_panels(&body, token, &config.origin)?;
    tracing::info!("layout refresh: resolved {} panel(s)", panels.len());
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "https://tableau.gatech.edu";

    fn presmodel(zones: Value) -> Value {
        json!({
            "applicationPresModel": { "workbookPresModel": {
                "dashboardPresModel": { "zones": zones }
            } }
        })
    }

    fn sample_zones() -> Value {
        json!({
            "7": {
                "worksheet": "Student Test Count",
                "presModelHolder": { "visual": {
                    "cacheUrlInfoJson": "{\"url\":\"/vizql/tile/student.png?sessionid=%SESSIONID%\"}"
                } }
            },
            "8": { "zoneType": "layout-basic" }
        })
    }

    #[test]
    fn test_strip_isolates_payload_after_marker() {
        assert_eq!(strip_bootstrap_body("junk;20;{\"a\":1}trailing").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_strip_primary_frame() {
        let body = "14;{\"primary\":true}20;{\"secondary\":1}";
        assert_eq!(strip_bootstrap_body(body).unwrap(), "{\"primary\":true}");
    }

    #[test]
    fn test_strip_missing_marker_is_parse_error() {
        let err = strip_bootstrap_body("123;{\"a\":1}").unwrap_err();
        assert!(matches!(err, PanelError::ParseError(_)));
    }

    #[test]
    fn test_strip_missing_prefix_is_parse_error() {
        let err = strip_bootstrap_body("{\"a\":1}").unwrap_err();
        assert!(matches!(err, PanelError::ParseError(_)));
    }

    #[test]
    fn test_strip_truncated_secondary_frame_is_parse_error() {
        let err = strip_bootstrap_body("x;20;{\"a\":").unwrap_err();
        assert!(matches!(err, PanelError::ParseError(_)));
    }

    #[test]
    fn test_parse_bootstrap_panels() {
        let primary = json!({ "worldUpdate": presmodel(sample_zones()) }).to_string();
        let body = format!("{};{primary}20;{{\"secondaryInfo\":{{}}}}", primary.len());

        let panels = parse_bootstrap_panels(&body, &SessionToken::new("S1"), ORIGIN).unwrap();
        assert_eq!(panels.len(), 1);
        assert_eq!(
            panels["studentTestCount"],
            "https://tableau.gatech.edu/vizql/tile/student.png?sessionid=S1"
        );
    }

    #[test]
    fn test_parse_bootstrap_malformed_json() {
        let body = "9;{\"worldUpdate\":20;{\"x\":1}";
        let err = parse_bootstrap_panels(body, &SessionToken::new("S"), ORIGIN).unwrap_err();
        assert!(matches!(err, PanelError::ParseError(_)));
    }

    #[test]
    fn test_parse_bootstrap_missing_zones_is_schema_error() {
        let body = "5;{\"worldUpdate\":{}}20;{\"x\":1}";
        let err = parse_bootstrap_panels(body, &SessionToken::new("S"), ORIGIN).unwrap_err();
        assert!(matches!(err, PanelError::SchemaError(_)));
    }

    #[test]
    fn test_parse_layout_panels() {
        let body = json!({
            "vqlCmdResponse": { "layoutStatus": presmodel(sample_zones()) }
        })
        .to_string();

        let panels = parse_layout_panels(&body, &SessionToken::new("S2"), ORIGIN).unwrap();
        assert_eq!(
            panels["studentTestCount"],
            "https://tableau.gatech.edu/vizql/tile/student.png?sessionid=S2"
        );
    }

    #[test]
    fn test_both_variants_agree_on_keys() {
        let token = SessionToken::new("S3");
        let bootstrap = format!(
            "1;{}20;{{\"secondaryInfo\":{{}}}}",
            json!({ "worldUpdate": presmodel(sample_zones()) })
        );
        let layout = json!({
            "vqlCmdResponse": { "layoutStatus": presmodel(sample_zones()) }
        })
        .to_string();

        let a = parse_bootstrap_panels(&bootstrap, &token, ORIGIN).unwrap();
        let b = parse_layout_panels(&layout, &token, ORIGIN).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_layout_is_idempotent() {
        let body = json!({
            "vqlCmdResponse": { "layoutStatus": presmodel(sample_zones()) }
        })
        .to_string();
        let token = SessionToken::new("S4");
        assert_eq!(
            parse_layout_panels(&body, &token, ORIGIN).unwrap(),
            parse_layout_panels(&body, &token, ORIGIN).unwrap()
        );
    }

    #[test]
    fn test_parse_layout_rejects_framed_body() {
        let err = parse_layout_panels("12;{\"a\":1}", &SessionToken::new("S"), ORIGIN).unwrap_err();
        assert!(matches!(err, PanelError::ParseError(_)));
    }
}
