//! Session-level input wiring: taps, drags, remote commands

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{channels, live_request, movie_request, open_stores, FakeEngine, MemoryCatalog};
use strix_common::events::OverlayKind;
use strix_common::types::ContentFit;
use strix_player::config::PlayerConfig;
use strix_player::engine::EngineStatus;
use strix_player::playback::transport::SeekDirection;
use strix_player::remote::RemoteCommand;
use strix_player::PlaybackSession;

fn movie_session(engine: &Arc<FakeEngine>) -> Arc<PlaybackSession> {
    PlaybackSession::new(
        movie_request(501),
        Arc::clone(engine) as Arc<dyn strix_player::engine::MediaEngine>,
        open_stores(MemoryCatalog::new()),
        PlayerConfig::default(),
    )
}

#[tokio::test(start_paused = true)]
async fn double_tap_right_seeks_forward() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    assert_eq!(session.tap(0.8).await, None);
    tokio::time::advance(Duration::from_millis(150)).await;
    assert_eq!(session.tap(0.8).await, Some(SeekDirection::Forward));

    assert_eq!(engine.log().seeks_by, vec![10_000]);
    assert!(session.osd().is_visible(OverlayKind::Seek));
}

#[tokio::test(start_paused = true)]
async fn taps_in_different_zones_re_arm() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    assert_eq!(session.tap(0.8).await, None);
    assert_eq!(session.tap(0.2).await, None);
    assert_eq!(session.tap(0.2).await, Some(SeekDirection::Back));
    assert_eq!(engine.log().seeks_by, vec![-10_000]);
}

#[tokio::test(start_paused = true)]
async fn center_tap_only_shows_controls() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    assert_eq!(session.tap(0.8).await, None);
    assert_eq!(session.tap(0.5).await, None);
    // The pending edge tap was cleared by the center tap
    assert_eq!(session.tap(0.8).await, None);

    assert!(engine.log().seeks_by.is_empty());
    assert!(session.osd().is_visible(OverlayKind::Controls));
}

#[tokio::test(start_paused = true)]
async fn absolute_seek_is_vod_only() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;
    engine.set_status(EngineStatus::ReadyToPlay);
    engine.set_position(0, 7_200_000);
    tokio::time::sleep(Duration::from_millis(600)).await;

    session.seek_absolute(0.5).await.unwrap();
    assert_eq!(engine.log().seeks_to, vec![3_600_000]);

    let live_engine = FakeEngine::new();
    let live = PlaybackSession::new(
        live_request(channels(3), 0),
        Arc::clone(&live_engine) as Arc<dyn strix_player::engine::MediaEngine>,
        open_stores(MemoryCatalog::new()),
        PlayerConfig::default(),
    );
    live.start().await;
    assert!(live.seek_absolute(0.5).await.is_err());
    assert!(live_engine.log().seeks_to.is_empty());
}

#[tokio::test(start_paused = true)]
async fn playback_rate_limited_to_the_known_set() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    session.set_playback_rate(1.5).await.unwrap();
    assert_eq!(engine.log().rates, vec![1.5]);
    assert_eq!(session.state().get_playback_rate().await, 1.5);

    assert!(session.set_playback_rate(1.3).await.is_err());
    assert_eq!(engine.log().rates, vec![1.5]);
}

#[tokio::test(start_paused = true)]
async fn right_edge_drag_adjusts_volume() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    session.gesture_begin(0.9).await;
    // Below the capture threshold: still a tap
    session.gesture_move(5.0).await;
    assert!(engine.log().volumes.is_empty());

    // 50 px up from the 0.75 default
    session.gesture_move(-50.0).await;
    assert_eq!(engine.log().volumes, vec![1.0]);
    assert_eq!(session.state().get_volume().await, 1.0);
    assert!(session.osd().is_visible(OverlayKind::Volume));
    session.gesture_end().await;
}

#[tokio::test(start_paused = true)]
async fn left_edge_drag_adjusts_brightness_without_the_engine() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    session.gesture_begin(0.1).await;
    session.gesture_move(60.0).await;

    assert!(engine.log().volumes.is_empty());
    assert_eq!(session.state().get_brightness().await, 0.5 - 60.0 / 200.0);
    assert!(session.osd().is_visible(OverlayKind::Brightness));
}

#[tokio::test(start_paused = true)]
async fn captured_drag_re_arms_controls_auto_hide() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    session.tap(0.5).await;
    assert!(session.osd().is_visible(OverlayKind::Controls));

    // Almost at the 4 s auto-hide deadline; the drag pushes it out again
    tokio::time::advance(Duration::from_millis(3900)).await;
    session.gesture_begin(0.9).await;
    session.gesture_move(-50.0).await;

    tokio::time::advance(Duration::from_millis(3000)).await;
    assert!(session.osd().is_visible(OverlayKind::Controls));

    // An uncaptured wiggle does not
    tokio::time::advance(Duration::from_millis(1200)).await;
    assert!(!session.osd().is_visible(OverlayKind::Controls));
    session.gesture_begin(0.9).await;
    session.gesture_move(4.0).await;
    assert!(!session.osd().is_visible(OverlayKind::Controls));
}

#[tokio::test(start_paused = true)]
async fn remote_commands_map_to_transport() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;

    session.handle_remote(RemoteCommand::Play).await;
    session.handle_remote(RemoteCommand::SeekForward).await;
    session.handle_remote(RemoteCommand::SeekBack).await;
    session.handle_remote(RemoteCommand::Pause).await;

    let log = engine.log();
    assert_eq!(log.play_calls, 1);
    assert_eq!(log.pause_calls, 1);
    assert_eq!(log.seeks_by, vec![10_000, -10_000]);
    assert!(session.osd().is_visible(OverlayKind::Seek));
}

#[tokio::test(start_paused = true)]
async fn remote_channel_commands_drive_the_carousel() {
    let engine = FakeEngine::new();
    let session = PlaybackSession::new(
        live_request(channels(3), 0),
        Arc::clone(&engine) as Arc<dyn strix_player::engine::MediaEngine>,
        open_stores(MemoryCatalog::new()),
        PlayerConfig::default(),
    );
    session.start().await;

    session.handle_remote(RemoteCommand::NextChannel).await;
    assert_eq!(
        engine.log().sources.last().unwrap(),
        "http://example.com/live/user/pass/101.m3u8"
    );
}

#[tokio::test(start_paused = true)]
async fn content_fit_cycles_in_order() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;
    assert_eq!(session.state().get_content_fit().await, ContentFit::Contain);

    session.cycle_content_fit().await;
    assert_eq!(session.state().get_content_fit().await, ContentFit::Cover);
    session.cycle_content_fit().await;
    assert_eq!(session.state().get_content_fit().await, ContentFit::Fill);
    session.cycle_content_fit().await;
    assert_eq!(session.state().get_content_fit().await, ContentFit::Contain);
}

#[tokio::test(start_paused = true)]
async fn input_is_inert_after_shutdown() {
    let engine = FakeEngine::new();
    let session = movie_session(&engine);
    session.start().await;
    session.shutdown().await;
    let calls = engine.log().total_calls;

    session.toggle_play_pause().await;
    session.tap(0.8).await;
    session.tap(0.8).await;
    session.handle_remote(RemoteCommand::Play).await;
    session.gesture_begin(0.9).await;
    session.gesture_move(-50.0).await;
    session.next_channel().await;

    assert_eq!(engine.log().total_calls, calls);
}
