//! The fragment store — loads per-race name tables from a data
//! directory and exposes them read-only.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::schema::fragment::Fragment;
use crate::schema::race::{Category, ClanInfo, GlossTable, RaceData, RaceTemplate};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("race directory {0} has no template.json")]
    MissingTemplate(String),
}

/// A race that failed to load and was skipped.
#[derive(Debug)]
pub struct LoadIssue {
    pub race: String,
    pub error: StoreError,
}

/// The template document at the root of each race directory.
#[derive(Debug, Deserialize)]
struct TemplateDoc {
    #[serde(flatten)]
    template: RaceTemplate,
    #[serde(default = "default_true")]
    poetic: bool,
}

fn default_true() -> bool {
    true
}

/// Read-only mapping from race key to its name tables. Constructed
/// once at startup; never mutated afterwards.
#[derive(Debug, Default)]
pub struct FragmentStore {
    races: FxHashMap<String, RaceData>,
    issues: Vec<LoadIssue>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every race subdirectory of `dir`. A race that fails to
    /// parse is skipped and recorded in [`issues`](Self::issues); the
    /// rest of the store stays usable. Only an unreadable root
    /// directory fails the whole load.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = FragmentStore::new();
        let mut keys: Vec<(String, std::path::PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                if let Some(key) = path.file_name().and_then(|n| n.to_str()) {
                    keys.push((key.to_string(), path.clone()));
                }
            }
        }
        keys.sort();

        for (key, path) in keys {
            match load_race(&key, &path) {
                Ok(race) => {
                    store.races.insert(key, race);
                }
                Err(error) => {
                    log::warn!("skipping race '{}': {}", key, error);
                    store.issues.push(LoadIssue { race: key, error });
                }
            }
        }
        Ok(store)
    }

    pub fn get(&self, race_key: &str) -> Option<&RaceData> {
        self.races.get(race_key)
    }

    pub fn insert(&mut self, race: RaceData) {
        self.races.insert(race.key.clone(), race);
    }

    /// All loaded race keys, sorted.
    pub fn race_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.races.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    /// Races that failed to load, in scan order.
    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn load_race(key: &str, dir: &Path) -> Result<RaceData, StoreError> {
    let template_path = dir.join("template.json");
    if !template_path.exists() {
        return Err(StoreError::MissingTemplate(key.to_string()));
    }
    let doc: TemplateDoc = read_json(&template_path)?;

    let mut race = RaceData::new(key, doc.template);
    race.poetic = doc.poetic;

    for cat in Category::all() {
        let path = dir.join(format!("{}.json", cat.file_stem()));
        if path.exists() {
            let fragments: Vec<Fragment> = read_json(&path)?;
            race.categories.insert(*cat, fragments);
        }
    }

    let gloss_path = dir.join("gloss.json");
    if gloss_path.exists() {
        race.gloss = read_json::<GlossTable>(&gloss_path)?;
    }

    let clan_lore_path = dir.join("clan_lore.json");
    if clan_lore_path.exists() {
        race.clans = read_json::<Vec<ClanInfo>>(&clan_lore_path)?;
    }

    Ok(race)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_fixture_store_and_isolates_bad_race() {
        let store = FragmentStore::load_from_dir("tests/fixtures/names").unwrap();
        assert!(store.get("goodrace").is_some());
        assert!(store.get("brokenrace").is_none());
        assert_eq!(store.issues().len(), 1);
        assert_eq!(store.issues()[0].race, "brokenrace");
    }

    #[test]
    fn fixture_race_categories_populated() {
        let store = FragmentStore::load_from_dir("tests/fixtures/names").unwrap();
        let race = store.get("goodrace").unwrap();
        assert!(!race.category(Category::Prefix).is_empty());
        assert!(!race.category(Category::Suffix).is_empty());
        assert!(!race.gloss.is_empty());
        assert!(race.category(Category::Middle).is_empty());
    }

    #[test]
    fn missing_dir_is_an_error() {
        assert!(FragmentStore::load_from_dir("tests/fixtures/no_such_dir").is_err());
    }

    #[test]
    fn race_keys_sorted() {
        let mut store = FragmentStore::new();
        store.insert(RaceData::new("orc", RaceTemplate::SingleList));
        store.insert(RaceData::new("elf", RaceTemplate::SingleList));
        assert_eq!(store.race_keys(), vec!["elf", "orc"]);
    }
}
