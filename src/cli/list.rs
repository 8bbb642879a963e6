use tabled::Table;

use crate::{
    app::App,
    types::{Category, EntryTableRow},
    warning,
};

/// Prints the songs of one category, optionally filtered by artist or title.
pub fn list(app: &App, category: Category, search: Option<String>) {
    let entries = app.catalog.entries(category);
    if entries.is_empty() {
        warning!("The {} list is empty.", category);
        return;
    }

    let search_term = search.map(|s| s.to_lowercase());
    let rows: Vec<EntryTableRow> = entries
        .iter()
        .filter(|e| {
            search_term.as_ref().is_none_or(|term| {
                e.artist.to_lowercase().contains(term) || e.title.to_lowercase().contains(term)
            })
        })
        .map(|e| EntryTableRow {
            id: e.id,
            artist: e.artist.clone(),
            title: e.title.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
