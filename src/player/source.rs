use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::{PlayerError, Track};

/// Metadata fields of interest from `yt-dlp -j`.
#[derive(Debug, Deserialize)]
struct YtDlpTrack {
    title: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    original_url: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    view_count: Option<u64>,
    #[serde(default)]
    like_count: Option<u64>,
}

fn is_url(query: &str) -> bool {
    query.starts_with("http://") || query.starts_with("https://")
}

/// Resolve a link or search term into a playable track via yt-dlp. Plain
/// text becomes a single-result YouTube search.
pub async fn resolve(query: &str, requested_by: String) -> Result<Track, PlayerError> {
    let target = if is_url(query) {
        query.to_string()
    } else {
        format!("ytsearch1:{query}")
    };
    debug!("Resolving {:?} with yt-dlp", target);

    let output = Command::new("yt-dlp")
        .args(["-j", "-f", "bestaudio", "--no-playlist", "--no-warnings", &target])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PlayerError::ResolverFailed(stderr.trim().to_string()));
    }

    let metadata: YtDlpTrack = serde_json::from_slice(&output.stdout)?;
    let url = metadata
        .webpage_url
        .or(metadata.original_url)
        .unwrap_or(target);

    Ok(Track {
        title: metadata.title,
        url,
        duration: metadata
            .duration
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .map(Duration::from_secs_f64),
        thumbnail: metadata.thumbnail,
        requested_by,
        views: metadata.view_count,
        likes: metadata.like_count,
    })
}
