//! Playback session orchestration
//!
//! Coordinates URI resolution, the engine lifecycle, track discovery,
//! channel navigation, input handling, and resume persistence. One session
//! exists per player screen; it is created with the route parameters and
//! torn down on unmount.
//!
//! Concurrency model: a single spawned loop samples the engine every poll
//! interval; input handlers run on the same runtime and share state through
//! `SharedState`. Two guards protect against stale async work: a `closed`
//! flag (nothing touches the engine after teardown) and a source generation
//! counter (results of an in-flight resolution are discarded once a newer
//! source replaces it).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use strix_common::events::{OverlayKind, PlaybackStatus, PlayerEvent};
use strix_common::types::{MediaKind, PlayRequest, Track};
use tokio::sync::RwLock;
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::config::PlayerConfig;
use crate::engine::{EngineSample, EngineStatus, MediaEngine};
use crate::error::{Error, Result};
use crate::playback::access::AccessGate;
use crate::playback::carousel::ChannelCarousel;
use crate::playback::gesture::{GestureEffect, GestureInputMapper};
use crate::playback::history::PositionPersistence;
use crate::playback::osd::OsdState;
use crate::playback::quality;
use crate::playback::source;
use crate::playback::tracks::TrackManager;
use crate::playback::transport::{SeekDirection, TransportController, SEEK_STEP_MS};
use crate::remote::RemoteCommand;
use crate::state::SharedState;
use crate::stores::{CatalogStore, CredentialProvider, LockStore, SettingsStore};

/// Injected collaborator stores
///
/// Everything the session reads from the outside world arrives here; there
/// is no global storage access anywhere in the controller.
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialProvider>,
    pub locks: Arc<dyn LockStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub catalog: Arc<dyn CatalogStore>,
}

/// One playback session, engine handle included
pub struct PlaybackSession {
    config: PlayerConfig,
    engine: Arc<dyn MediaEngine>,
    state: Arc<SharedState>,
    osd: Arc<OsdState>,
    stores: Stores,
    gate: AccessGate,
    transport: TransportController,

    request: RwLock<PlayRequest>,
    carousel: RwLock<ChannelCarousel>,
    tracks: RwLock<TrackManager>,
    gesture: Mutex<GestureInputMapper>,
    persistence: tokio::sync::Mutex<Option<PositionPersistence>>,

    /// Resume offset consumed by exactly one seek on the first ready
    /// observation of the current source
    pending_resume_ms: tokio::sync::Mutex<Option<u64>>,

    /// Set while a locked source waits for PIN authorization; the original
    /// request parameters stay in `request`/`carousel`
    pending_unlock: tokio::sync::Mutex<bool>,

    /// Continuously updated copy of the last engine sample, so teardown can
    /// act without touching the engine
    last_sample: RwLock<EngineSample>,

    /// Engine must not be touched once set
    closed: Arc<AtomicBool>,

    /// Bumped on every resolution; stale async results compare against it
    source_gen: AtomicU64,

    /// Self-handle for spawning the sampling loop
    me: Weak<Self>,

    http: reqwest::Client,
}

impl PlaybackSession {
    /// Create a session from route parameters and an engine handle
    pub fn new(
        request: PlayRequest,
        engine: Arc<dyn MediaEngine>,
        stores: Stores,
        config: PlayerConfig,
    ) -> Arc<Self> {
        let state = Arc::new(SharedState::new());
        let osd = Arc::new(OsdState::new(state.event_tx.clone()));
        let closed = Arc::new(AtomicBool::new(false));

        let channels = if request.media_kind == MediaKind::Live {
            request.channel_list.clone()
        } else {
            Vec::new()
        };
        let carousel = ChannelCarousel::new(channels, request.current_channel_index);

        let transport = TransportController::new(
            Arc::clone(&engine),
            Arc::clone(&state),
            Arc::clone(&osd),
            request.media_kind,
            Arc::clone(&closed),
        );

        Arc::new_cyclic(|me| Self {
            config,
            engine,
            state,
            osd,
            gate: AccessGate::new(Arc::clone(&stores.locks)),
            stores,
            transport,
            request: RwLock::new(request),
            carousel: RwLock::new(carousel),
            tracks: RwLock::new(TrackManager::new()),
            gesture: Mutex::new(GestureInputMapper::new()),
            persistence: tokio::sync::Mutex::new(None),
            pending_resume_ms: tokio::sync::Mutex::new(None),
            pending_unlock: tokio::sync::Mutex::new(false),
            last_sample: RwLock::new(EngineSample::default()),
            closed,
            source_gen: AtomicU64::new(0),
            me: me.clone(),
            http: reqwest::Client::new(),
        })
    }

    /// Shared state handle for host rendering
    pub fn state(&self) -> Arc<SharedState> {
        Arc::clone(&self.state)
    }

    /// OSD visibility queries for host rendering
    pub fn osd(&self) -> &OsdState {
        &self.osd
    }

    /// Subscribe to the session's event stream
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<PlayerEvent> {
        self.state.subscribe_events()
    }

    /// Resolve the initial source and start the sampling loop
    pub async fn start(&self) {
        info!("starting playback session");

        // Favorite status is informational; failures only log
        let (content_id, kind) = {
            let request = self.request.read().await;
            (request.content_id(), request.media_kind)
        };
        if let Some(id) = content_id {
            match self.stores.catalog.is_favorite(id, kind).await {
                Ok(is_favorite) => self.state.broadcast_event(PlayerEvent::FavoriteStatus {
                    content_id: id,
                    kind,
                    is_favorite,
                    timestamp: chrono::Utc::now(),
                }),
                Err(e) => debug!("favorite lookup failed: {}", e),
            }
        }

        self.resolve_or_gate().await;
        self.spawn_poll_loop();
    }

    /// Tear the session down; the engine handle is considered released and
    /// is never touched again. The final history decision uses the cached
    /// last sample.
    pub async fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.source_gen.fetch_add(1, Ordering::AcqRel);

        let sample = self.last_sample.read().await.clone();
        if let Some(persistence) = self.persistence.lock().await.as_mut() {
            persistence
                .flush(sample.position_ms, sample.duration_ms)
                .await;
        }
        info!(
            position_ms = sample.position_ms,
            "playback session shut down"
        );
    }

    // ---- source resolution -------------------------------------------------

    /// Resolve the current source, routing lock suspension and hard errors
    /// to their respective surfaces
    async fn resolve_or_gate(&self) {
        match self.resolve_current_source().await {
            Ok(()) => {}
            Err(Error::LockedUnauthorized(content_id)) => {
                *self.pending_unlock.lock().await = true;
                self.state.broadcast_event(PlayerEvent::PinRequired {
                    content_id,
                    timestamp: chrono::Utc::now(),
                });
            }
            Err(e) => self.enter_error(&e).await,
        }
    }

    async fn resolve_current_source(&self) -> Result<()> {
        let gen = self.source_gen.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.set_error_reason(None).await;
        self.transition(PlaybackStatus::Resolving).await;

        let request = self.request.read().await.clone();
        let active_channel = {
            let carousel = self.carousel.read().await;
            if carousel.is_active() {
                carousel.current().cloned()
            } else {
                None
            }
        };

        // Gate on the effective content id; each channel can carry its own
        // lock state
        let content_id = active_channel
            .as_ref()
            .map(|c| c.id)
            .or(request.stream_id);
        if let Some(id) = content_id {
            self.gate.ensure_access(id).await?;
        }

        let mut uri = source::resolve(
            &request,
            active_channel.as_ref(),
            &*self.stores.credentials,
        )
        .await?;

        if request.media_kind == MediaKind::Live
            && quality::is_hls_playlist(&uri)
            && self.stores.settings.prefer_highest_quality().await
        {
            if let Some(best) = quality::select_highest_variant(&self.http, &uri).await {
                if self.stale(gen) {
                    debug!("discarding manifest result for replaced source");
                    return Ok(());
                }
                uri = best;
            }
        }

        if self.stale(gen) {
            debug!("source replaced during resolution, discarding");
            return Ok(());
        }

        // Resume plan and persistence apply to VOD only
        if request.media_kind.is_vod() {
            let content_id = content_id.ok_or(Error::MissingStreamInfo)?;
            let offset = match request.start_time_ms {
                Some(ms) => Some(ms),
                None => self
                    .stores
                    .catalog
                    .resume_position(content_id)
                    .await
                    .unwrap_or_else(|e| {
                        debug!("resume lookup failed: {}", e);
                        None
                    }),
            };
            *self.pending_resume_ms.lock().await = offset.filter(|ms| *ms > 0);
            *self.persistence.lock().await = Some(PositionPersistence::new(
                Arc::clone(&self.stores.catalog),
                content_id,
                request.media_kind,
                self.config.history_save_interval,
            ));
        } else {
            *self.pending_resume_ms.lock().await = None;
            *self.persistence.lock().await = None;
        }

        // Track and quality state restart per source
        self.tracks.write().await.reset();

        info!(%uri, "loading source");
        self.state.set_source_uri(Some(uri.clone())).await;
        self.state.set_buffering(true).await;
        self.engine.replace_source(&uri);
        self.transition(PlaybackStatus::Loading).await;
        Ok(())
    }

    fn stale(&self, gen: u64) -> bool {
        self.closed.load(Ordering::Acquire) || self.source_gen.load(Ordering::Acquire) != gen
    }

    // ---- PIN handling ------------------------------------------------------

    /// Verify a PIN from the host's prompt. A correct PIN resumes the
    /// suspended resolution with its original parameters; a wrong PIN just
    /// returns false so the prompt stays open.
    pub async fn submit_pin(&self, pin: &str) -> bool {
        if !self.gate.authorize(pin).await {
            return false;
        }
        let was_pending = {
            let mut pending = self.pending_unlock.lock().await;
            std::mem::replace(&mut *pending, false)
        };
        if was_pending {
            self.resolve_or_gate().await;
        }
        true
    }

    /// Host cancelled the PIN prompt; the pending resolution is dropped and
    /// the host exits the screen
    pub async fn cancel_pin(&self) {
        *self.pending_unlock.lock().await = false;
        debug!("PIN prompt cancelled, pending resolution dropped");
    }

    // ---- sampling loop -----------------------------------------------------

    /// The loop holds only a weak self-handle; it exits when the session is
    /// closed or every strong handle has been dropped.
    fn spawn_poll_loop(&self) {
        let me = self.me.clone();
        let poll_interval = self.config.poll_interval;
        tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            let mut tick_no: u64 = 0;
            loop {
                ticker.tick().await;
                let Some(session) = me.upgrade() else {
                    break;
                };
                if session.closed.load(Ordering::Acquire) {
                    break;
                }
                session.tick(tick_no).await;
                tick_no += 1;
            }
            debug!("engine sampling loop exited");
        });
    }

    async fn tick(&self, tick_no: u64) {
        let status = self.state.get_status().await;
        if matches!(
            status,
            PlaybackStatus::Idle
                | PlaybackStatus::Resolving
                | PlaybackStatus::Error
                | PlaybackStatus::Ended
        ) {
            return;
        }

        let mut sample = self.engine.sample();
        // Position never runs past a known duration
        if sample.duration_ms > 0 && sample.position_ms > sample.duration_ms {
            sample.position_ms = sample.duration_ms;
        }
        *self.last_sample.write().await = sample.clone();
        self.state
            .set_position(sample.position_ms, sample.duration_ms)
            .await;

        // Progress events at half the sampling rate is plenty for a UI
        if tick_no % 2 == 0 {
            self.state.broadcast_event(PlayerEvent::Progress {
                position_ms: sample.position_ms,
                duration_ms: sample.duration_ms,
                timestamp: chrono::Utc::now(),
            });
        }

        match &sample.status {
            EngineStatus::Failed(reason) => {
                let err = Error::SourceLoad(reason.clone());
                self.enter_error(&err).await;
                return;
            }
            EngineStatus::Ended => {
                self.transition(PlaybackStatus::Ended).await;
                if let Some(persistence) = self.persistence.lock().await.as_mut() {
                    persistence
                        .flush(sample.position_ms, sample.duration_ms)
                        .await;
                }
                return;
            }
            EngineStatus::ReadyToPlay => {
                if status == PlaybackStatus::Loading {
                    self.on_ready().await;
                } else if sample.playing && status != PlaybackStatus::Playing {
                    self.transition(PlaybackStatus::Playing).await;
                } else if !sample.playing && status == PlaybackStatus::Playing {
                    self.transition(PlaybackStatus::Paused).await;
                }
            }
            EngineStatus::Loading | EngineStatus::Idle => {}
        }

        // Fallback track discovery while lists are still empty
        let probe_ticks = (self.config.track_probe_interval.as_millis()
            / self.config.poll_interval.as_millis().max(1))
        .max(1) as u64;
        if tick_no % probe_ticks == 0 && !self.tracks.read().await.discovery_done() {
            self.refresh_tracks().await;
        }

        if let Some(persistence) = self.persistence.lock().await.as_mut() {
            persistence
                .on_tick(sample.playing, sample.position_ms, sample.duration_ms)
                .await;
        }
    }

    /// First ready observation for the current source
    async fn on_ready(&self) {
        self.transition(PlaybackStatus::Ready).await;
        self.state.set_buffering(false).await;

        // Exactly one resume seek per source; the pending offset is consumed
        // here and never refilled for the same source
        if let Some(resume_ms) = self.pending_resume_ms.lock().await.take() {
            info!(resume_ms, "seeking to resume position");
            self.engine.seek_to(resume_ms);
        }

        self.engine.set_volume(self.state.get_volume().await);
        self.engine.play();
        self.refresh_tracks().await;
    }

    async fn refresh_tracks(&self) {
        let discovered = {
            let mut tracks = self.tracks.write().await;
            tracks.refresh_from(&*self.engine)
        };
        for (kind, tracks) in discovered {
            self.state.broadcast_event(PlayerEvent::TracksDiscovered {
                kind,
                tracks,
                timestamp: chrono::Utc::now(),
            });
        }
    }

    // ---- transitions -------------------------------------------------------

    async fn transition(&self, status: PlaybackStatus) {
        let previous = self.state.get_status().await;
        if previous == status {
            return;
        }
        debug!(from = %previous, to = %status, "status transition");
        self.state.set_status(status).await;
        self.state.broadcast_event(PlayerEvent::status(status));
    }

    async fn enter_error(&self, err: &Error) {
        let reason = err.to_string();
        error!("playback error: {}", reason);
        self.state.set_error_reason(Some(reason.clone())).await;
        self.transition(PlaybackStatus::Error).await;
        self.state.broadcast_event(PlayerEvent::PlaybackError {
            reason,
            timestamp: chrono::Utc::now(),
        });
    }

    // ---- channel navigation ------------------------------------------------

    pub async fn next_channel(&self) {
        self.change_channel(1).await;
    }

    pub async fn previous_channel(&self) {
        self.change_channel(-1).await;
    }

    async fn change_channel(&self, delta: isize) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        let (entry, index) = {
            let mut carousel = self.carousel.write().await;
            let entry = if delta >= 0 {
                carousel.next().cloned()
            } else {
                carousel.previous().cloned()
            };
            (entry, carousel.current_index())
        };
        let Some(entry) = entry else {
            // No channel list: navigation is inert
            return;
        };

        self.request.write().await.current_channel_index = index;
        info!(index, channel_id = entry.id, name = %entry.name, "channel changed");

        self.osd.show(OverlayKind::Channel);
        self.state.broadcast_event(PlayerEvent::ChannelChanged {
            index,
            channel_id: entry.id,
            name: entry.name.clone(),
            timestamp: chrono::Utc::now(),
        });

        self.resolve_or_gate().await;
    }

    // ---- transport ---------------------------------------------------------

    pub async fn toggle_play_pause(&self) {
        self.transport.toggle_play_pause().await;
    }

    /// Screen tap; may complete a double-tap seek
    pub async fn tap(&self, x_ratio: f64) -> Option<SeekDirection> {
        self.transport.tap(x_ratio).await
    }

    /// Progress-track drag to an absolute position (VOD only)
    pub async fn seek_absolute(&self, ratio: f64) -> Result<()> {
        self.transport.seek_absolute(ratio).await
    }

    pub async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.transport.set_playback_rate(rate).await
    }

    pub async fn cycle_content_fit(&self) {
        let next = self.state.get_content_fit().await.next();
        self.state.set_content_fit(next).await;
        self.osd.show(OverlayKind::Controls);
    }

    // ---- track selection ---------------------------------------------------

    pub async fn select_audio_track(&self, track: &Track) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.tracks.write().await.select_audio(&*self.engine, track);
    }

    /// `None` disables subtitles explicitly
    pub async fn select_subtitle_track(&self, track: Option<&Track>) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.tracks
            .write()
            .await
            .select_subtitle(&*self.engine, track);
    }

    pub async fn audio_tracks(&self) -> Vec<Track> {
        self.tracks.read().await.audio_tracks().to_vec()
    }

    pub async fn subtitle_tracks(&self) -> Vec<Track> {
        self.tracks.read().await.subtitle_tracks().to_vec()
    }

    // ---- gestures ----------------------------------------------------------

    pub async fn gesture_begin(&self, x_ratio: f64) {
        let volume = self.state.get_volume().await;
        let brightness = self.state.get_brightness().await;
        self.gesture
            .lock()
            .unwrap()
            .begin(x_ratio, volume, brightness);
    }

    pub async fn gesture_move(&self, dy_px: f64) {
        let effect = self.gesture.lock().unwrap().on_move(dy_px);
        match effect {
            Some(GestureEffect::Volume(value)) => {
                if !self.closed.load(Ordering::Acquire) {
                    self.engine.set_volume(value);
                }
                self.state.set_volume(value).await;
                self.osd.show(OverlayKind::Volume);
            }
            Some(GestureEffect::Brightness(value)) => {
                // Brightness is host-applied; the controller just owns the value
                self.state.set_brightness(value).await;
                self.osd.show(OverlayKind::Brightness);
            }
            None => return,
        }
        // A captured drag counts as interaction like any other; keep the
        // controls from auto-hiding mid-adjustment
        self.osd.show(OverlayKind::Controls);
    }

    pub async fn gesture_end(&self) {
        self.gesture.lock().unwrap().end();
    }

    // ---- remote control ----------------------------------------------------

    /// Apply a platform remote-control command
    pub async fn handle_remote(&self, command: RemoteCommand) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        match command {
            RemoteCommand::Play => self.engine.play(),
            RemoteCommand::Pause | RemoteCommand::Stop => self.engine.pause(),
            RemoteCommand::TogglePlayPause => self.transport.toggle_play_pause().await,
            RemoteCommand::SeekForward => {
                self.engine.seek_by(SEEK_STEP_MS);
                self.osd.show(OverlayKind::Seek);
            }
            RemoteCommand::SeekBack => {
                self.engine.seek_by(-SEEK_STEP_MS);
                self.osd.show(OverlayKind::Seek);
            }
            RemoteCommand::NextChannel => self.next_channel().await,
            RemoteCommand::PreviousChannel => self.previous_channel().await,
        }
    }
}
