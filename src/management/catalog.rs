use std::{collections::HashMap, path::Path};

use crate::{
    Error, Result,
    types::{CatalogEntry, Category},
    utils, warning,
};

/// The bundled song lists, one per category.
///
/// Built once at startup and never mutated afterwards. Entries are numbered
/// from 1 in file order, matching the numbers printed on the cards.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    lists: HashMap<Category, Vec<CatalogEntry>>,
}

impl Catalog {
    /// Builds the catalog from raw list contents.
    ///
    /// A `None` source stands for a list that could not be read; that category
    /// ends up empty while the others load normally.
    pub fn from_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = (Category, Option<String>)>,
    {
        let mut lists: HashMap<Category, Vec<CatalogEntry>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for (category, source) in sources {
            let entries = match source {
                Some(raw) => parse_list(category, &raw),
                None => {
                    warning!("No song list for category {}", category);
                    Vec::new()
                }
            };
            lists.insert(category, entries);
        }

        Self { lists }
    }

    /// Reads `<stem>.txt` for every category from `dir`.
    pub async fn load_dir(dir: &Path) -> Self {
        let mut sources = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let path = dir.join(format!("{}.txt", category.list_stem()));
            let source = match async_fs::read_to_string(&path).await {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warning!("Failed to load {}: {}", path.display(), e);
                    None
                }
            };
            sources.push((category, source));
        }

        Self::from_sources(sources)
    }

    /// Looks up the entry with 1-based `id` in the `category` list.
    pub fn resolve(&self, category: Category, id: u32) -> Option<&CatalogEntry> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.lists.get(&category)?.get(index)
    }

    /// Resolves a raw scanned code straight to its entry.
    ///
    /// Fails with [`Error::Extraction`] when the code carries no card number
    /// and with [`Error::CatalogMiss`] when the number is not in its list.
    pub fn resolve_code(&self, code: &str) -> Result<&CatalogEntry> {
        let (category, id) = utils::parse_card(code).ok_or(Error::Extraction)?;
        self.resolve(category, id).ok_or(Error::CatalogMiss)
    }

    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn len(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.values().all(Vec::is_empty)
    }
}

fn parse_list(category: Category, raw: &str) -> Vec<CatalogEntry> {
    raw.lines()
        .filter(|line| !line.is_empty())
        .zip(1..)
        .map(|(line, id)| CatalogEntry::from_line(id, category, line))
        .collect()
}
