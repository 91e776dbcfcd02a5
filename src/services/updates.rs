//! Security-update feed client.
//!
//! The feed is a JSON map from module id to update info. It is optional:
//! no configured source means no security findings, and a failed fetch
//! degrades to an empty map with a warning rather than aborting the run.

use crate::domain::models::UpdateInfo;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_feed_text(source: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let resp = client.get(source).send()?.error_for_status()?;
    Ok(resp.text()?)
}

pub fn load_update_feed(source: Option<&str>) -> anyhow::Result<HashMap<String, UpdateInfo>> {
    let Some(source) = source else {
        return Ok(HashMap::new());
    };
    let raw = if is_remote(source) {
        fetch_feed_text(source, 3000)?
    } else {
        std::fs::read_to_string(Path::new(source))?
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Feed load that never fails the run: errors become a stderr warning and
/// an empty map.
pub fn load_update_feed_lenient(source: Option<&str>) -> HashMap<String, UpdateInfo> {
    match load_update_feed(source) {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!(
                "warning: update feed unavailable, skipping security findings: {}",
                e
            );
            HashMap::new()
        }
    }
}
