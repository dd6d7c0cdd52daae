//! Content loader — one YAML file per section.
//!
//! # Content layout
//!
//! ```text
//! content/
//!   city.yaml          (keys: city, map)
//!   places.yaml        (key: places)   …one file per collection
//!   food_typical.yaml  (key: typical_food)
//!   phrases.yaml       (key: phrases)
//!   history.yaml       (key: history)
//!   agenda.yaml        (key: agenda)
//!   schedule.yaml      (key: schedule)
//! ```
//!
//! Every file exposes a single top-level key; the value under it is what the
//! loader returns. Loading is a pure read.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_yaml::Mapping;

use crate::error::LoadError;
use crate::types::{Collection, CollectionKind, Collections, GuideContent, MapSettings, Record};

pub const CITY_FILE: &str = "city.yaml";
pub const FOOD_FILE: &str = "food_typical.yaml";
pub const PHRASES_FILE: &str = "phrases.yaml";
pub const HISTORY_FILE: &str = "history.yaml";
pub const AGENDA_FILE: &str = "agenda.yaml";
pub const SCHEDULE_FILE: &str = "schedule.yaml";

// ---------------------------------------------------------------------------
// 1. Documents
// ---------------------------------------------------------------------------

/// Read and parse a YAML document.
///
/// Returns `LoadError::NotFound` if absent, `LoadError::Parse` (with path and
/// line context) if malformed. A document that is not a mapping yields an
/// empty mapping, so key lookups report `MissingKey`.
fn read_document(path: &Path) -> Result<Mapping, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(|source| {
        LoadError::Parse { path: path.to_path_buf(), source }
    })?;
    match doc {
        serde_yaml::Value::Mapping(mapping) => Ok(mapping),
        _ => Ok(Mapping::new()),
    }
}

fn take_key<T: DeserializeOwned>(
    path: &Path,
    doc: &mut Mapping,
    key: &str,
) -> Result<T, LoadError> {
    let value = doc.remove(key).ok_or_else(|| LoadError::MissingKey {
        path: path.to_path_buf(),
        key: key.to_string(),
    })?;
    serde_yaml::from_value(value).map_err(|source| LoadError::Shape {
        path: path.to_path_buf(),
        key: key.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// 2. Single sources
// ---------------------------------------------------------------------------

/// Load the value stored under `key` in the YAML file at `path`.
pub fn load_key<T: DeserializeOwned>(path: &Path, key: &str) -> Result<T, LoadError> {
    let mut doc = read_document(path)?;
    take_key(path, &mut doc, key)
}

/// Load `<content_dir>/<kind>.yaml` as an ordered record list.
pub fn load_collection(content_dir: &Path, kind: CollectionKind) -> Result<Collection, LoadError> {
    let path = content_dir.join(kind.file_name());
    let records: Vec<Record> = load_key(&path, kind.as_str())?;
    Ok(Collection::new(kind, records))
}

/// Load city metadata and map settings from one read of `city.yaml`.
pub fn load_city(content_dir: &Path) -> Result<(Value, MapSettings), LoadError> {
    let path = content_dir.join(CITY_FILE);
    let mut doc = read_document(&path)?;
    let city = take_key(&path, &mut doc, "city")?;
    let map = take_key(&path, &mut doc, "map")?;
    Ok((city, map))
}

// ---------------------------------------------------------------------------
// 3. Whole guide
// ---------------------------------------------------------------------------

/// Load every content source under `content_dir`.
///
/// Sources are read in a fixed order and the first failure is returned.
pub fn load_content_at(content_dir: &Path) -> Result<GuideContent, LoadError> {
    let (city, map) = load_city(content_dir)?;

    let mut loaded = CollectionKind::ALL
        .iter()
        .map(|kind| load_collection(content_dir, *kind))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let collections = Collections::from_fn(|_| {
        loaded.next().map(|c| c.records).unwrap_or_default()
    });

    Ok(GuideContent {
        city,
        map,
        collections,
        typical_food: load_key(&content_dir.join(FOOD_FILE), "typical_food")?,
        phrases: load_key(&content_dir.join(PHRASES_FILE), "phrases")?,
        history: load_key(&content_dir.join(HISTORY_FILE), "history")?,
        agenda: load_key(&content_dir.join(AGENDA_FILE), "agenda")?,
        schedule: load_key(&content_dir.join(SCHEDULE_FILE), "schedule")?,
    })
}
