//! Stream URI resolution
//!
//! A caller-supplied URL is used as-is when no channel list drives playback;
//! otherwise the URI is assembled Xtream-style from stored credentials:
//! `{base}/{live|movie|series}/{user}/{pass}/{id}.{ext}`.

use strix_common::types::{ChannelEntry, Credentials, MediaKind, PlayRequest};
use tracing::debug;

use crate::error::{Error, Result};
use crate::stores::CredentialProvider;

/// Assemble a stream URI from credentials and a content id
pub fn build_stream_uri(
    credentials: &Credentials,
    kind: MediaKind,
    stream_id: i64,
    extension: Option<&str>,
) -> String {
    let base = credentials.base_url.trim_end_matches('/');
    let ext = extension.unwrap_or_else(|| kind.default_extension());
    format!(
        "{}/{}/{}/{}/{}.{}",
        base,
        kind.url_segment(),
        credentials.username,
        credentials.password,
        stream_id,
        ext
    )
}

/// Resolve the playable URI for the request
///
/// The active channel (when a channel list is live) always forces a rebuild
/// from credentials; a pre-supplied URL only applies to single-source
/// sessions.
pub async fn resolve(
    request: &PlayRequest,
    active_channel: Option<&ChannelEntry>,
    credentials: &dyn CredentialProvider,
) -> Result<String> {
    if let Some(channel) = active_channel {
        let creds = credentials
            .credentials()
            .await
            .ok_or(Error::MissingCredentials)?;
        let uri = build_stream_uri(
            &creds,
            request.media_kind,
            channel.id,
            request.container_ext.as_deref(),
        );
        debug!(channel_id = channel.id, %uri, "resolved channel URI");
        return Ok(uri);
    }

    if let Some(url) = &request.stream_url {
        debug!(%url, "using caller-supplied stream URL");
        return Ok(url.clone());
    }

    let stream_id = request.stream_id.ok_or(Error::MissingStreamInfo)?;
    let creds = credentials
        .credentials()
        .await
        .ok_or(Error::MissingCredentials)?;
    let uri = build_stream_uri(
        &creds,
        request.media_kind,
        stream_id,
        request.container_ext.as_deref(),
    );
    debug!(stream_id, %uri, "resolved stream URI from credentials");
    Ok(uri)
}
