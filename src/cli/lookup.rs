use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{app::App, info, success, utils, warning};

/// Shows what a scanned code resolves to, optionally down to the catalog track.
pub async fn lookup(app: &App, code: &str, track: bool) {
    let Some((category, id)) = utils::parse_card(code) else {
        warning!("No card number in \"{}\"", code);
        return;
    };

    let Some(entry) = app.catalog.resolve(category, id) else {
        warning!(
            "Card {} is not in the {} list ({} songs)",
            id,
            category,
            app.catalog.len(category)
        );
        return;
    };

    success!(
        "{} #{}: {} - {}",
        entry.category,
        entry.id,
        entry.artist,
        entry.title
    );

    if !track {
        return;
    }

    let credentials = match app.tokens.ensure_tokens().await {
        Ok(c) => c,
        Err(e) => {
            warning!("{}", e.status_message());
            return;
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching Apple Music...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = app.resolver.resolve(entry, &credentials).await;
    pb.finish_and_clear();

    match result {
        Ok(t) => info!(
            "Track {}: {} - {} [{}]{}",
            t.id,
            t.artist,
            t.title,
            t.duration.map(utils::format_time).unwrap_or_else(|| "?".to_string()),
            t.url.map(|u| format!(" {}", u)).unwrap_or_default()
        ),
        Err(e) => warning!("{}", e.status_message()),
    }
}
