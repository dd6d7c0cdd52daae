//! Map point aggregation — flattens every collection into the dataset of the
//! interactive map page.

use serde::Serialize;

use crate::error::MalformedRecordError;
use crate::types::{Collection, CollectionKind, Coordinates, GuideContent, MapSettings};

/// Relative URL of a record's detail page, from the output root.
pub fn detail_url(kind: CollectionKind, id: &str) -> String {
    format!("{}/{}.html", kind.as_str(), id)
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    pub name: String,
    pub category: String,
    pub coordinates: Coordinates,
    pub url: String,
}

/// Map points for a single collection, in source order.
pub fn map_points_for(collection: &Collection) -> Result<Vec<MapPoint>, MalformedRecordError> {
    Ok(collection
        .entries()?
        .into_iter()
        .map(|entry| MapPoint {
            kind: collection.kind,
            url: detail_url(collection.kind, &entry.fields.id),
            name: entry.fields.name.into_owned(),
            category: entry.fields.category.into_owned(),
            coordinates: entry.fields.coordinates,
        })
        .collect())
}

/// Map points for the whole guide: collections in [`CollectionKind::all`]
/// order, records in source order within each.
pub fn collect_map_points(content: &GuideContent) -> Result<Vec<MapPoint>, MalformedRecordError> {
    let mut points = Vec::new();
    for collection in content.collections.iter() {
        points.extend(map_points_for(collection)?);
    }
    Ok(points)
}

/// Payload embedded in the map page as `window.TRAVEL_MAP_DATA`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPayload {
    pub center: Coordinates,
    pub zoom: u32,
    pub points: Vec<MapPoint>,
}

impl MapPayload {
    pub fn new(settings: &MapSettings, points: Vec<MapPoint>) -> Self {
        Self {
            center: settings.center,
            zoom: settings.zoom,
            points,
        }
    }

    /// Compact JSON safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Collections, Record};
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn poi(id: &str, name: &str) -> Record {
        record(json!({ "id": id, "name": name, "category": "misc", "coordinates": [1.0, 2.0] }))
    }

    fn guide(collections: Collections) -> GuideContent {
        GuideContent {
            city: json!({ "name": "Test" }),
            map: MapSettings { center: [48.1486, 17.1077], zoom: 14 },
            collections,
            typical_food: Value::Null,
            phrases: Value::Null,
            history: Value::Null,
            agenda: Value::Null,
            schedule: Value::Null,
        }
    }

    #[test]
    fn statue_point_matches_expected_shape() {
        let places = Collection::new(
            CollectionKind::Places,
            vec![record(json!({
                "id": "statue-1",
                "name": "Bronze Statue",
                "category": "monument",
                "coordinates": [48.15, 17.11],
                "description": "Not part of the point"
            }))],
        );
        let points = map_points_for(&places).unwrap();
        assert_eq!(
            serde_json::to_value(&points[0]).unwrap(),
            json!({
                "type": "places",
                "name": "Bronze Statue",
                "category": "monument",
                "coordinates": [48.15, 17.11],
                "url": "places/statue-1.html"
            })
        );
    }

    #[test]
    fn points_follow_collection_order() {
        let content = guide(Collections::from_fn(|kind| match kind {
            CollectionKind::Clubs => vec![poi("c1", "Club")],
            CollectionKind::Places => vec![poi("p1", "First"), poi("p2", "Second")],
            CollectionKind::Cafes => vec![poi("k1", "Cafe")],
            _ => vec![],
        }));
        let urls: Vec<_> = collect_map_points(&content)
            .unwrap()
            .into_iter()
            .map(|p| p.url)
            .collect();
        assert_eq!(
            urls,
            vec!["places/p1.html", "places/p2.html", "cafes/k1.html", "clubs/c1.html"]
        );
    }

    #[test]
    fn malformed_record_aborts_aggregation() {
        let content = guide(Collections::from_fn(|kind| match kind {
            CollectionKind::Bars => vec![
                poi("b1", "Bar"),
                record(json!({ "id": "b2", "name": "No coords", "category": "pub" })),
            ],
            _ => vec![],
        }));
        let err = collect_map_points(&content).unwrap_err();
        assert_eq!(err.collection, CollectionKind::Bars);
        assert_eq!(err.index, 1);
    }

    #[test]
    fn numeric_id_and_name_become_text() {
        let clubs = Collection::new(
            CollectionKind::Clubs,
            vec![record(json!({ "id": 101, "name": 1984, "category": "club", "coordinates": [48.1, 17.1] }))],
        );
        let point = &map_points_for(&clubs).unwrap()[0];
        assert_eq!(point.url, "clubs/101.html");
        assert_eq!(point.name, "1984");
    }

    #[test]
    fn script_json_cannot_close_the_script_element() {
        let points = vec![MapPoint {
            kind: CollectionKind::Bars,
            name: "</script><b>".to_string(),
            category: "pub".to_string(),
            coordinates: [1.0, 2.0],
            url: "bars/x.html".to_string(),
        }];
        let settings = MapSettings { center: [0.5, 0.25], zoom: 3 };
        let json = MapPayload::new(&settings, points).to_script_json().unwrap();
        assert!(!json.contains("</"));
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["points"][0]["name"], "</script><b>");
        assert_eq!(parsed["center"], json!([0.5, 0.25]));
        assert_eq!(parsed["zoom"], 3);
    }
}
