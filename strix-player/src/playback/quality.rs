//! Adaptive-quality variant selection for live HLS sources
//!
//! When the user prefers highest quality and the resolved URI is an HLS
//! playlist, the master manifest is fetched and the variant with the largest
//! declared vertical resolution becomes the effective playback URI. Every
//! failure on this path keeps the original URI; nothing here ever surfaces
//! to the user.

use m3u8_rs::Playlist;
use tracing::debug;
use url::Url;

/// One alternative-resolution stream from a master playlist; derived per
/// manifest fetch, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityVariant {
    pub height_px: u64,
    pub absolute_uri: String,
}

/// Heuristic for URIs that point at an HLS playlist
pub fn is_hls_playlist(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    path.ends_with(".m3u8") || path.ends_with(".m3u")
}

/// Parse a master playlist body into its resolution-carrying variants,
/// sorted descending by height. Variant URIs are resolved against the
/// manifest's own URL so relative references work.
pub fn parse_variants(body: &str, manifest_url: &Url) -> Vec<QualityVariant> {
    let master = match m3u8_rs::parse_playlist_res(body.as_bytes()) {
        Ok(Playlist::MasterPlaylist(master)) => master,
        Ok(Playlist::MediaPlaylist(_)) => {
            debug!("manifest is a media playlist, no variants to select");
            return Vec::new();
        }
        Err(e) => {
            debug!("master playlist parse failed: {:?}", e);
            return Vec::new();
        }
    };

    let mut variants: Vec<QualityVariant> = master
        .variants
        .iter()
        .filter_map(|variant| {
            let height = variant.resolution?.height;
            let absolute = match Url::parse(&variant.uri) {
                Ok(url) => url.to_string(),
                Err(_) => manifest_url.join(&variant.uri).ok()?.to_string(),
            };
            Some(QualityVariant {
                height_px: height,
                absolute_uri: absolute,
            })
        })
        .collect();

    variants.sort_by(|a, b| b.height_px.cmp(&a.height_px));
    variants
}

/// Fetch the manifest at `uri` and pick the highest-resolution variant.
/// Returns `None` on any failure, in which case the caller keeps `uri`.
pub async fn select_highest_variant(client: &reqwest::Client, uri: &str) -> Option<String> {
    let manifest_url = match Url::parse(uri) {
        Ok(url) => url,
        Err(e) => {
            debug!("not a parseable manifest URL ({}), keeping original", e);
            return None;
        }
    };

    let body = match client.get(uri).send().await {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!("manifest body read failed ({}), keeping original", e);
                return None;
            }
        },
        Err(e) => {
            debug!("manifest fetch failed ({}), keeping original", e);
            return None;
        }
    };

    let variants = parse_variants(&body, &manifest_url);
    let best = variants.first()?;
    debug!(
        height = best.height_px,
        uri = %best.absolute_uri,
        "adopting highest-resolution variant"
    );
    Some(best.absolute_uri.clone())
}
