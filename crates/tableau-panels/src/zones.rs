//! Zone tree walking.
//!
//! Both vizql responses embed the same dashboard presentation model, just
//! under different roots. Once the `zones` object is reached, a single
//! extraction routine turns it into a [`PanelMap`]; both resolvers must go
//! through it so they agree on which panels exist.

use crate::error::{PanelError, PanelResult};
use crate::panels::{short_key, PanelMap};
use crate::session::SessionToken;
use serde_json::{Map, Value};

/// Key path from the bootstrap response root to the zone tree.
pub const BOOTSTRAP_ZONES_PATH: &[&str] = &[
    "worldUpdate",
    "applicationPresModel",
    "workbookPresModel",
    "dashboardPresModel",
    "zones",
];

/// Key path from the ensure-layout response root to the zone tree.
pub const LAYOUT_ZONES_PATH: &[&str] = &[
    "vqlCmdResponse",
    "layoutStatus",
    "applicationPresModel",
    "workbookPresModel",
    "dashboardPresModel",
    "zones",
];

/// Placeholder the server leaves in cached image URLs.
pub const SESSION_PLACEHOLDER: &str = "%SESSIONID%";

/// Follow `path` from `root` and return the zone object at its end.
pub fn descend<'a>(root: &'a Value, path: &[&str]) -> PanelResult<&'a Map<String, Value>> {
    let mut node = root;
    for (depth, key) in path.iter().enumerate() {
        node = node.get(key).ok_or_else(|| {
            PanelError::SchemaError(format!("missing `{}`", path[..=depth].join(".")))
        })?;
    }

    node.as_object().ok_or_else(|| {
        PanelError::SchemaError(format!("`{}` is not an object", path.join(".")))
    })
}

/// Why a zone contributed nothing. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NoImage,
    BadCacheInfo,
    NoWorksheet,
    Untracked,
}

/// Collect the image URL of every tracked panel in `zones`.
///
/// Zones without PNG cache metadata, with unreadable metadata, or whose
/// worksheet is not in the panel table are skipped. Zones are visited in
/// document order, so when two zones map to the same short key the one
/// appearing later in the response wins.
pub fn extract_panel_urls(
    zones: &Map<String, Value>,
    token: &SessionToken,
    origin: &str,
) -> PanelMap {
    let mut panels = PanelMap::new();

    for (zone_id, zone) in zones {
        match panel_from_zone(zone, token, origin) {
            Ok((key, url)) => {
                tracing::debug!("zone {zone_id}: {key} -> {url}");
                panels.insert(key, url);
            }
            Err(Skip::BadCacheInfo) => {
                tracing::warn!("zone {zone_id}: unreadable PNG cache metadata, skipped")
            }
            Err(reason) => tracing::debug!("zone {zone_id}: skipped ({reason:?})"),
        }
    }

    panels
}

fn panel_from_zone(
    zone: &Value,
    token: &SessionToken,
    origin: &str,
) -> Result<(&'static str, String), Skip> {
    let cache_info = zone
        .get("presModelHolder")
        .and_then(|h| h.get("visual"))
        .and_then(|v| v.get("cacheUrlInfoJson"))
        .and_then(Value::as_str)
        .filter(|info| info.contains("png"))
        .ok_or(Skip::NoImage)?;

    let path = image_path(cache_info, token).ok_or(Skip::BadCacheInfo)?;

    let worksheet = zone
        .get("worksheet")
        .and_then(Value::as_str)
        .ok_or(Skip::NoWorksheet)?;
    let key = short_key(worksheet).ok_or(Skip::Untracked)?;

    Ok((key, format!("{}{path}", origin.trim_end_matches('/'))))
}

/// Decode a `cacheUrlInfoJson` string into its server-relative `url`, with
/// the session placeholder filled in.
pub fn image_path(cache_info: &str, token: &SessionToken) -> Option<String> {
    let filled = cache_info.replace(SESSION_PLACEHOLDER, token.as_str());
    let info: Value = serde_json::from_str(&filled).ok()?;
    info.get("url")?.as_str().map(str::to_string)
}
