mod common;

use std::time::Duration;

use common::track;
use musicard::{
    player::{Player, TimelinePlayer},
    types::PlaybackStatus,
};

#[tokio::test]
async fn test_timeline_starts_stopped() {
    let player = TimelinePlayer::new();

    assert_eq!(player.status().await, PlaybackStatus::Stopped);
    assert_eq!(player.position().await, Duration::ZERO);
    assert!(player.current_duration().await.is_none());
    assert!(player.play().await.is_err());
    assert!(player.set_queue(Vec::new()).await.is_err());
}

#[tokio::test]
async fn test_timeline_play_pause_seek() {
    let player = TimelinePlayer::new();
    player.set_queue(vec![track("1", "Song", 300)]).await.unwrap();
    player.prepare_to_play().await.unwrap();
    assert_eq!(player.status().await, PlaybackStatus::Paused);

    player.seek(Duration::from_secs(120)).await.unwrap();
    player.play().await.unwrap();
    assert_eq!(player.status().await, PlaybackStatus::Playing);
    assert!(player.position().await >= Duration::from_secs(120));

    player.pause().await.unwrap();
    let paused_at = player.position().await;
    assert_eq!(player.status().await, PlaybackStatus::Paused);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(player.position().await, paused_at);

    assert_eq!(player.current_duration().await, Some(Duration::from_secs(300)));
    assert_eq!(player.current_track().await.unwrap().id, "1");
}

#[tokio::test]
async fn test_timeline_stops_at_track_end() {
    let player = TimelinePlayer::new();
    player.set_queue(vec![track("1", "Short", 1)]).await.unwrap();
    player.seek(Duration::from_secs(1)).await.unwrap();
    player.play().await.unwrap();

    // Playing a finished track starts it over
    assert_eq!(player.status().await, PlaybackStatus::Playing);
    assert!(player.position().await < Duration::from_secs(1));

    player.seek(Duration::from_secs(5)).await.unwrap();
    assert_eq!(player.status().await, PlaybackStatus::Stopped);
    assert_eq!(player.position().await, Duration::from_secs(1));
}

#[tokio::test]
async fn test_timeline_previous_restarts_single_track() {
    let player = TimelinePlayer::new();
    player.set_queue(vec![track("1", "Song", 300)]).await.unwrap();
    player.seek(Duration::from_secs(100)).await.unwrap();

    player.skip_to_previous().await.unwrap();

    assert_eq!(player.position().await, Duration::ZERO);
    assert_eq!(player.current_track().await.unwrap().id, "1");
}

#[tokio::test]
async fn test_timeline_replays_finished_track() {
    let player = TimelinePlayer::new();
    let mut short = track("1", "Jingle", 0);
    short.duration = Some(Duration::from_millis(200));
    player.set_queue(vec![short]).await.unwrap();
    player.play().await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(player.status().await, PlaybackStatus::Stopped);
    assert_eq!(player.position().await, Duration::from_millis(200));

    player.play().await.unwrap();
    assert_eq!(player.status().await, PlaybackStatus::Playing);
    assert!(player.position().await < Duration::from_millis(200));
}
