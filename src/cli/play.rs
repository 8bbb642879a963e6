use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::watch,
};

use crate::{
    app::App,
    info,
    scanner::{SCAN_PROMPT, ScanOutcome},
    success,
    types::{Phase, PlayOutcome, SessionState},
    utils, warning,
};

/// Plays the song behind one code and follows it until it ends or Ctrl-C.
pub async fn play(app: &App, code: &str) {
    let sync = app.session.spawn_sync();

    let outcome = app.scanner.handle_scan(code).await;
    match &outcome {
        ScanOutcome::Handled {
            entry,
            outcome: PlayOutcome::Started,
        } => success!("{}: {} - {}", outcome.message(), entry.artist, entry.title),
        ScanOutcome::Handled { .. } => {
            warning!("{}", app.session.snapshot().status_message);
            sync.abort();
            return;
        }
        _ => {
            warning!("{}", outcome.message());
            sync.abort();
            return;
        }
    }

    follow_progress(app).await;
    sync.abort();
}

async fn follow_progress(app: &App) {
    let mut state = app.session.subscribe();
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.blue} {msg}") {
        pb.set_style(style);
    }

    loop {
        let snapshot = state.borrow_and_update().clone();
        pb.set_length(snapshot.duration.as_secs().max(1));
        pb.set_position(snapshot.position.as_secs());
        pb.set_message(format!(
            "{} / {}{}",
            utils::format_time(snapshot.position),
            utils::format_time(snapshot.duration),
            if snapshot.is_playing { "" } else { " (paused)" }
        ));

        if !snapshot.is_playing && snapshot.position >= snapshot.duration {
            break;
        }

        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    pb.finish_and_clear();
}

/// Reads scanned codes and transport commands from stdin, one per line.
///
/// Commands: `toggle` (or `p`), `prev` (or `b`), `seek <seconds>`, `status`,
/// `quit`. Any other line is treated as a scanned code. Scans arriving while
/// the previous one is still loading are dropped.
pub async fn listen(app: &App) {
    if let Err(e) = app.session.prepare().await {
        warning!("{}", e.status_message());
    }

    let sync = app.session.spawn_sync();
    let reporter = tokio::spawn(report_status(app.session.subscribe()));
    info!("{}", SCAN_PROMPT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let mut parts = line.split_whitespace();

        match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some("quit" | "q"), _) => break,
            (Some("toggle" | "p"), None) => app.session.toggle_play_pause().await,
            (Some("prev" | "b"), None) => app.session.previous().await,
            (Some("status"), None) => print_status(app),
            (Some("seek"), Some(seconds)) => match seconds.parse::<f64>() {
                Ok(s) if s.is_finite() && s >= 0.0 => {
                    app.session.seek(Duration::from_secs_f64(s)).await
                }
                _ => warning!("Invalid position \"{}\"", seconds),
            },
            _ => {
                let scanner = app.scanner.clone();
                let code = line.to_string();
                tokio::spawn(async move {
                    match scanner.handle_scan(&code).await {
                        ScanOutcome::Ignored => warning!("Still loading, scan ignored"),
                        ScanOutcome::NoMatch(e) => warning!("{}", e.status_message()),
                        ScanOutcome::Handled { .. } => {}
                    }
                });
            }
        }
    }

    reporter.abort();
    sync.abort();
}

fn print_status(app: &App) {
    let snapshot = app.session.snapshot();
    match &snapshot.current_entry {
        Some(entry) => info!(
            "{} - {} [{} / {}] {:?}",
            entry.artist,
            entry.title,
            app.session.formatted_position(),
            app.session.formatted_duration(),
            snapshot.phase
        ),
        None => info!("Nothing playing ({:?})", snapshot.phase),
    }
}

/// Logs phase transitions and status messages as they happen.
async fn report_status(mut state: watch::Receiver<SessionState>) {
    let mut last_phase = Phase::Idle;
    let mut last_message = String::new();

    while state.changed().await.is_ok() {
        let snapshot = state.borrow_and_update().clone();

        if snapshot.phase != last_phase {
            last_phase = snapshot.phase;
            if let (Phase::Playing, Some(entry)) = (last_phase, &snapshot.current_entry) {
                success!("Now playing: {} - {}", entry.artist, entry.title);
            }
        }

        if snapshot.status_message != last_message {
            last_message = snapshot.status_message.clone();
            if !last_message.is_empty() {
                match last_phase {
                    Phase::Failed => warning!("{}", last_message),
                    _ => info!("{}", last_message),
                }
            }
        }
    }
}
