//! cityguide core library — content types, YAML loading, map aggregation.
//!
//! - [`types`] — collections, records and singleton sections
//! - [`error`] — [`LoadError`], [`MalformedRecordError`]
//! - [`loader`] — reads the `content/` directory
//! - [`map`] — derives the map page dataset

pub mod error;
pub mod loader;
pub mod map;
pub mod types;

pub use error::{LoadError, MalformedRecordError, RecordProblem};
pub use map::{collect_map_points, detail_url, MapPayload, MapPoint};
pub use types::{
    Collection, CollectionKind, Collections, Coordinates, Entry, GuideContent, MapSettings, Record,
    RecordFields,
};
