//! Shared test doubles: a scriptable fake media engine and in-memory stores

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use strix_common::types::{ChannelEntry, Credentials, MediaKind, PlayRequest, Track};
use strix_player::engine::{EngineSample, EngineStatus, MediaEngine};
use strix_player::error::Result;
use strix_player::stores::{
    CatalogStore, CredentialProvider, LockStore, SettingsStore,
};
use strix_player::Stores;

/// Everything the fake engine was asked to do, for assertions
#[derive(Debug, Default, Clone)]
pub struct EngineLog {
    pub sources: Vec<String>,
    pub seeks_to: Vec<u64>,
    pub seeks_by: Vec<i64>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub volumes: Vec<f64>,
    pub rates: Vec<f64>,
    pub audio_selections: Vec<Option<String>>,
    pub subtitle_selections: Vec<Option<String>>,
    /// Total trait-method invocations, samples included
    pub total_calls: usize,
}

struct EngineInner {
    sample: EngineSample,
    audio: Vec<Track>,
    subtitles: Vec<Track>,
    log: EngineLog,
}

/// Scriptable in-memory engine; tests poke its status between ticks
pub struct FakeEngine {
    inner: Mutex<EngineInner>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(EngineInner {
                sample: EngineSample::default(),
                audio: Vec::new(),
                subtitles: Vec::new(),
                log: EngineLog::default(),
            }),
        })
    }

    pub fn set_status(&self, status: EngineStatus) {
        self.inner.lock().unwrap().sample.status = status;
    }

    pub fn set_playing(&self, playing: bool) {
        self.inner.lock().unwrap().sample.playing = playing;
    }

    pub fn set_position(&self, position_ms: u64, duration_ms: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.sample.position_ms = position_ms;
        inner.sample.duration_ms = duration_ms;
    }

    pub fn set_audio_tracks(&self, tracks: Vec<Track>) {
        self.inner.lock().unwrap().audio = tracks;
    }

    pub fn set_subtitle_tracks(&self, tracks: Vec<Track>) {
        self.inner.lock().unwrap().subtitles = tracks;
    }

    pub fn log(&self) -> EngineLog {
        self.inner.lock().unwrap().log.clone()
    }
}

impl MediaEngine for FakeEngine {
    fn replace_source(&self, uri: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.sources.push(uri.to_string());
        inner.sample = EngineSample {
            position_ms: 0,
            duration_ms: 0,
            playing: false,
            status: EngineStatus::Loading,
        };
    }

    fn play(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.play_calls += 1;
        inner.sample.playing = true;
    }

    fn pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.pause_calls += 1;
        inner.sample.playing = false;
    }

    fn seek_to(&self, position_ms: u64) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.seeks_to.push(position_ms);
    }

    fn seek_by(&self, delta_ms: i64) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.seeks_by.push(delta_ms);
    }

    fn set_volume(&self, volume: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.volumes.push(volume);
    }

    fn set_rate(&self, rate: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.rates.push(rate);
    }

    fn select_audio_track(&self, id: Option<&str>) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.audio_selections.push(id.map(String::from));
    }

    fn select_subtitle_track(&self, id: Option<&str>) {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.log.subtitle_selections.push(id.map(String::from));
    }

    fn sample(&self) -> EngineSample {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.sample.clone()
    }

    fn audio_tracks(&self) -> Vec<Track> {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.audio.clone()
    }

    fn subtitle_tracks(&self) -> Vec<Track> {
        let mut inner = self.inner.lock().unwrap();
        inner.log.total_calls += 1;
        inner.subtitles.clone()
    }
}

pub struct StaticCredentials(pub Option<Credentials>);

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Option<Credentials> {
        self.0.clone()
    }
}

pub struct FakeLocks {
    pub locked: Vec<i64>,
    pub pin: String,
}

#[async_trait]
impl LockStore for FakeLocks {
    async fn is_content_locked(&self, content_id: i64) -> bool {
        self.locked.contains(&content_id)
    }

    async fn is_category_locked(&self, _category_id: i64) -> bool {
        false
    }

    async fn verify_pin(&self, pin: &str) -> bool {
        pin == self.pin
    }
}

pub struct FakeSettings {
    pub prefer_highest: bool,
}

#[async_trait]
impl SettingsStore for FakeSettings {
    async fn prefer_highest_quality(&self) -> bool {
        self.prefer_highest
    }
}

/// In-memory catalog recording every save/removal for assertions
#[derive(Default)]
pub struct MemoryCatalog {
    pub saves: Mutex<Vec<(i64, u64, u64)>>,
    pub removed: Mutex<Vec<i64>>,
    pub resume: Mutex<HashMap<i64, u64>>,
    pub favorites: Mutex<HashSet<(i64, &'static str)>>,
}

impl MemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn removed_ids(&self) -> Vec<i64> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn update_history(
        &self,
        content_id: i64,
        _kind: MediaKind,
        position_ms: u64,
        duration_ms: u64,
    ) -> Result<()> {
        self.saves
            .lock()
            .unwrap()
            .push((content_id, position_ms, duration_ms));
        Ok(())
    }

    async fn remove_from_history(&self, content_id: i64) -> Result<()> {
        self.removed.lock().unwrap().push(content_id);
        Ok(())
    }

    async fn resume_position(&self, content_id: i64) -> Result<Option<u64>> {
        Ok(self.resume.lock().unwrap().get(&content_id).copied())
    }

    async fn is_favorite(&self, content_id: i64, kind: MediaKind) -> Result<bool> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .contains(&(content_id, kind.as_str())))
    }

    async fn add_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()> {
        self.favorites
            .lock()
            .unwrap()
            .insert((content_id, kind.as_str()));
        Ok(())
    }

    async fn remove_favorite(&self, content_id: i64, kind: MediaKind) -> Result<()> {
        self.favorites
            .lock()
            .unwrap()
            .remove(&(content_id, kind.as_str()));
        Ok(())
    }
}

pub fn test_credentials() -> Credentials {
    Credentials {
        username: "user".into(),
        password: "pass".into(),
        base_url: "http://example.com".into(),
    }
}

/// Stores with open locks, quality preference off, and a fresh catalog
pub fn open_stores(catalog: Arc<MemoryCatalog>) -> Stores {
    Stores {
        credentials: Arc::new(StaticCredentials(Some(test_credentials()))),
        locks: Arc::new(FakeLocks {
            locked: Vec::new(),
            pin: "1234".into(),
        }),
        settings: Arc::new(FakeSettings {
            prefer_highest: false,
        }),
        catalog,
    }
}

pub fn movie_request(stream_id: i64) -> PlayRequest {
    PlayRequest {
        stream_id: Some(stream_id),
        media_kind: MediaKind::Movie,
        container_ext: Some("mkv".into()),
        ..Default::default()
    }
}

pub fn live_request(channels: Vec<ChannelEntry>, index: usize) -> PlayRequest {
    PlayRequest {
        media_kind: MediaKind::Live,
        channel_list: channels,
        current_channel_index: index,
        ..Default::default()
    }
}

/// Route test-run logs through the capture writer; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strix_player=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn channels(n: usize) -> Vec<ChannelEntry> {
    (0..n)
        .map(|i| ChannelEntry {
            id: 100 + i as i64,
            name: format!("Channel {}", i),
            icon: None,
        })
        .collect()
}
