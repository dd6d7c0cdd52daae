//! Domain types for guide content.
//!
//! Collection records stay schemaless: only the fields the generator itself
//! needs (`id`, `name`, `category`, `coordinates`) are checked. Everything
//! else is handed to templates untouched.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MalformedRecordError, RecordProblem};

/// `[lat, lon]`, serialized as a two-element array.
pub type Coordinates = [f64; 2];

// ---------------------------------------------------------------------------
// CollectionKind
// ---------------------------------------------------------------------------

/// The point-of-interest collections of a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Places,
    Parks,
    Museums,
    Restaurants,
    Cafes,
    Bars,
    Clubs,
}

impl CollectionKind {
    /// All collections in map and page order (declaration order).
    pub const ALL: [CollectionKind; 7] = [
        CollectionKind::Places,
        CollectionKind::Parks,
        CollectionKind::Museums,
        CollectionKind::Restaurants,
        CollectionKind::Cafes,
        CollectionKind::Bars,
        CollectionKind::Clubs,
    ];

    pub fn all() -> &'static [CollectionKind] {
        &Self::ALL
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Collection name: top-level YAML key, output directory and map point `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Places      => "places",
            CollectionKind::Parks       => "parks",
            CollectionKind::Museums     => "museums",
            CollectionKind::Restaurants => "restaurants",
            CollectionKind::Cafes       => "cafes",
            CollectionKind::Bars        => "bars",
            CollectionKind::Clubs       => "clubs",
        }
    }

    /// Source file name inside the content directory.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }

    /// Heading of the list page, also used as the back-link label.
    pub fn title(&self) -> &'static str {
        match self {
            CollectionKind::Places      => "Llocs d'interès",
            CollectionKind::Parks       => "Parcs",
            CollectionKind::Museums     => "Museus i galeries",
            CollectionKind::Restaurants => "Restaurants",
            CollectionKind::Cafes       => "Fleques i cafès",
            CollectionKind::Bars        => "Bars i cerveseries",
            CollectionKind::Clubs       => "Discoteques",
        }
    }

    /// One-line introduction shown under the list page heading.
    pub fn intro(&self) -> &'static str {
        match self {
            CollectionKind::Places      => "Estàtues, ponts, edificis i carrers destacats.",
            CollectionKind::Parks       => "Zones verdes i espais per passejar.",
            CollectionKind::Museums     => "Cultura, art i història local.",
            CollectionKind::Restaurants => "Menjar local i opcions per dinar o sopar.",
            CollectionKind::Cafes       => "Cafè, te i berenars tranquils.",
            CollectionKind::Bars        => "Cerveses artesanes, pubs i còctels.",
            CollectionKind::Clubs       => "Música i ambient nocturn.",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One point-of-interest record, kept as the raw mapping from the source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

/// The fields every record must carry, as text.
///
/// YAML scalars other than strings (`id: 101`, `name: 1984`) are accepted and
/// rendered in their plain text form.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields<'a> {
    pub id: Cow<'a, str>,
    pub name: Cow<'a, str>,
    pub category: Cow<'a, str>,
    pub coordinates: Coordinates,
}

/// A record paired with its checked required fields.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub record: &'a Record,
    pub fields: RecordFields<'a>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set `field`, replacing any previous value.
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    /// Check the required fields.
    ///
    /// The id must also be usable as a single file name: not empty, not `.`
    /// or `..`, and free of path separators.
    pub fn fields(&self) -> Result<RecordFields<'_>, RecordProblem> {
        let id = self.required_text("id")?;
        if !is_file_name_safe(&id) {
            return Err(RecordProblem::UnsafeId(id.into_owned()));
        }
        Ok(RecordFields {
            id,
            name: self.required_text("name")?,
            category: self.required_text("category")?,
            coordinates: self.coordinates()?,
        })
    }

    /// Text form of a scalar field, if present.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        scalar_text(self.0.get(field)?)
    }

    fn required_text(&self, field: &'static str) -> Result<Cow<'_, str>, RecordProblem> {
        match self.0.get(field) {
            None | Some(Value::Null) => Err(RecordProblem::Missing(field)),
            Some(value) => scalar_text(value).ok_or(RecordProblem::WrongType {
                field,
                expected: "a string, number or boolean",
            }),
        }
    }

    fn coordinates(&self) -> Result<Coordinates, RecordProblem> {
        let wrong = RecordProblem::WrongType {
            field: "coordinates",
            expected: "a [lat, lon] pair of numbers",
        };
        let pair = match self.0.get("coordinates") {
            None | Some(Value::Null) => return Err(RecordProblem::Missing("coordinates")),
            Some(Value::Array(pair)) => pair,
            Some(_) => return Err(wrong),
        };
        match pair.as_slice() {
            [lat, lon] => match (lat.as_f64(), lon.as_f64()) {
                (Some(lat), Some(lon)) => Ok([lat, lon]),
                _ => Err(wrong),
            },
            _ => Err(wrong),
        }
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_file_name_safe(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// An ordered list of records loaded from one collection file.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub kind: CollectionKind,
    pub records: Vec<Record>,
}

impl Collection {
    pub fn new(kind: CollectionKind, records: Vec<Record>) -> Self {
        Self { kind, records }
    }

    /// Check every record in source order, failing on the first malformed one.
    pub fn entries(&self) -> Result<Vec<Entry<'_>>, MalformedRecordError> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let fields = record.fields().map_err(|problem| MalformedRecordError {
                    collection: self.kind,
                    index,
                    id: record.text("id").map(Cow::into_owned),
                    problem,
                })?;
                Ok(Entry { record, fields })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Singletons
// ---------------------------------------------------------------------------

/// Initial view of the interactive map (`map` key of `city.yaml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub center: Coordinates,
    pub zoom: u32,
}

/// Exactly one [`Collection`] per [`CollectionKind`], in [`CollectionKind::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Collections([Collection; 7]);

impl Collections {
    /// Build every collection from the records `records_for` returns for its kind.
    pub fn from_fn(mut records_for: impl FnMut(CollectionKind) -> Vec<Record>) -> Self {
        Self(CollectionKind::ALL.map(|kind| Collection::new(kind, records_for(kind))))
    }

    pub fn get(&self, kind: CollectionKind) -> &Collection {
        &self.0[kind.index()]
    }

    pub fn get_mut(&mut self, kind: CollectionKind) -> &mut Collection {
        &mut self.0[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collection> {
        self.0.iter()
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self::from_fn(|_| Vec::new())
    }
}

/// Everything loaded for one build.
///
/// Singleton sections are opaque YAML values handed to templates as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideContent {
    pub city: Value,
    pub map: MapSettings,
    pub collections: Collections,
    pub typical_food: Value,
    pub phrases: Value,
    pub history: Value,
    pub agenda: Value,
    pub schedule: Value,
}

impl GuideContent {
    pub fn collection(&self, kind: CollectionKind) -> &Collection {
        self.collections.get(kind)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).expect("record")
    }

    #[test]
    fn kind_display_matches_yaml_key() {
        for kind in CollectionKind::all() {
            let yaml = serde_yaml::to_string(kind).unwrap();
            assert_eq!(yaml.trim(), kind.to_string());
        }
        assert_eq!(CollectionKind::Cafes.file_name(), "cafes.yaml");
    }

    #[test]
    fn fields_borrow_required_values() {
        let r = record(json!({
            "id": "statue-1",
            "name": "Bronze Statue",
            "category": "monument",
            "coordinates": [48.15, 17.11],
            "description": "extra fields are ignored here"
        }));
        let fields = r.fields().unwrap();
        assert_eq!(fields.id, "statue-1");
        assert_eq!(fields.name, "Bronze Statue");
        assert_eq!(fields.category, "monument");
        assert_eq!(fields.coordinates, [48.15, 17.11]);
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let r = record(json!({
            "id": "a", "name": "A", "category": "c", "coordinates": [48, 17]
        }));
        assert_eq!(r.fields().unwrap().coordinates, [48.0, 17.0]);
    }

    #[test]
    fn missing_and_mistyped_fields_are_reported() {
        let r = record(json!({ "id": "a", "category": "c", "coordinates": [1.0, 2.0] }));
        assert_eq!(r.fields().unwrap_err(), RecordProblem::Missing("name"));

        let r = record(json!({ "id": "a", "name": "A", "category": "c", "coordinates": [1.0] }));
        assert!(matches!(
            r.fields().unwrap_err(),
            RecordProblem::WrongType { field: "coordinates", .. }
        ));

        let r = record(json!({ "id": ["a"], "name": "A", "category": "c", "coordinates": [1.0, 2.0] }));
        assert!(matches!(
            r.fields().unwrap_err(),
            RecordProblem::WrongType { field: "id", .. }
        ));

        let r = record(json!({ "id": "a", "name": { "ca": "A" }, "category": "c", "coordinates": [1.0, 2.0] }));
        assert!(matches!(
            r.fields().unwrap_err(),
            RecordProblem::WrongType { field: "name", .. }
        ));
    }

    #[test]
    fn scalar_fields_are_read_as_text() {
        let r = record(json!({ "id": 101, "name": 1984, "category": true, "coordinates": [1.0, 2.0] }));
        let fields = r.fields().unwrap();
        assert_eq!(fields.id, "101");
        assert_eq!(fields.name, "1984");
        assert_eq!(fields.category, "true");
    }

    #[test]
    fn ids_that_escape_the_collection_directory_are_rejected() {
        for id in ["../../etc/x", "a/b", "a\\b", "..", ".", ""] {
            let r = record(json!({ "id": id, "name": "A", "category": "c", "coordinates": [1.0, 2.0] }));
            assert_eq!(r.fields().unwrap_err(), RecordProblem::UnsafeId(id.to_string()), "{id:?}");
        }
        let r = record(json!({ "id": "v2.0-final", "name": "A", "category": "c", "coordinates": [1.0, 2.0] }));
        assert_eq!(r.fields().unwrap().id, "v2.0-final");
    }

    #[test]
    fn collections_hold_every_kind_in_order() {
        let mut collections = Collections::default();
        collections
            .get_mut(CollectionKind::Bars)
            .records
            .push(record(json!({ "id": "pub" })));
        let kinds: Vec<_> = collections.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, CollectionKind::ALL.to_vec());
        assert_eq!(collections.get(CollectionKind::Bars).records.len(), 1);
        assert!(collections.get(CollectionKind::Clubs).records.is_empty());
    }

    #[test]
    fn entries_report_index_and_id_of_bad_record() {
        let collection = Collection::new(
            CollectionKind::Museums,
            vec![
                record(json!({ "id": "ok", "name": "Ok", "category": "art", "coordinates": [1.0, 2.0] })),
                record(json!({ "id": "broken", "name": "Broken", "coordinates": [1.0, 2.0] })),
            ],
        );
        let err = collection.entries().unwrap_err();
        assert_eq!(err.collection, CollectionKind::Museums);
        assert_eq!(err.index, 1);
        assert_eq!(err.id.as_deref(), Some("broken"));
        assert_eq!(err.problem, RecordProblem::Missing("category"));
    }

    #[test]
    fn numeric_id_is_named_in_error() {
        let collection = Collection::new(
            CollectionKind::Clubs,
            vec![record(json!({ "id": 101, "name": "Club", "coordinates": [1.0, 2.0] }))],
        );
        assert_eq!(collection.entries().unwrap_err().id.as_deref(), Some("101"));
    }
}
