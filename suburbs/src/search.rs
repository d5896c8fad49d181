//! Case-insensitive suburb name search.

use crate::dataset::Dataset;
use crate::record::{AttributeKeys, SuburbRecord};

/// Whether the record's display name contains the query, ignoring case.
///
/// An empty query matches every record, including the unnamed ones. A non-empty query never
/// matches an unnamed record.
pub fn matches(record: &SuburbRecord, query: &str, keys: &AttributeKeys) -> bool {
    if query.is_empty() {
        return true;
    }

    matches_lowercase(record, &query.to_lowercase(), keys)
}

/// Records of the dataset whose name contains the query, in the dataset order.
pub fn filter(dataset: &Dataset, query: &str, keys: &AttributeKeys) -> Dataset {
    if query.is_empty() {
        return dataset.clone();
    }

    let query = query.to_lowercase();
    dataset.subset(|record| matches_lowercase(record, &query, keys))
}

fn matches_lowercase(record: &SuburbRecord, query: &str, keys: &AttributeKeys) -> bool {
    record
        .name(keys)
        .is_some_and(|name| name.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::record::{Polygon, SuburbGeometry};

    fn dataset(names: &[Option<&str>]) -> Dataset {
        Dataset::new(names.iter().map(|name| {
            let mut properties = serde_json::Map::new();
            if let Some(name) = name {
                properties.insert("nsw_loca_2".into(), Value::from(*name));
            }
            let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
            SuburbRecord::new(
                SuburbGeometry::new(vec![Polygon::new(ring, vec![])]),
                properties,
            )
        }))
    }

    fn names(dataset: &Dataset) -> Vec<String> {
        let keys = AttributeKeys::default();
        dataset
            .iter()
            .map(|r| r.name(&keys).map(|n| n.into_owned()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn substring_match_keeps_order() {
        let data = dataset(&[Some("Bondi"), Some("Manly"), Some("Bondi Junction")]);
        let result = filter(&data, "bondi", &AttributeKeys::default());
        assert_eq!(names(&result), ["Bondi", "Bondi Junction"]);
        assert!(result.is_subset_of(&data));
    }

    #[test]
    fn case_insensitive() {
        let data = dataset(&[Some("SYDNEY"), Some("North Sydney"), Some("Parramatta")]);
        let keys = AttributeKeys::default();
        let upper = filter(&data, "SYD", &keys);
        let lower = filter(&data, "syd", &keys);
        assert_eq!(names(&upper), names(&lower));
        assert_eq!(upper.len(), 2);
    }

    #[test]
    fn empty_query_matches_everything() {
        let data = dataset(&[Some("Bondi"), None, Some("Manly")]);
        let result = filter(&data, "", &AttributeKeys::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn unnamed_records_never_match_text() {
        let data = dataset(&[None, Some("")]);
        let keys = AttributeKeys::default();
        assert!(filter(&data, "a", &keys).is_empty());
        assert!(!matches(data.first().unwrap(), "a", &keys));
        assert!(matches(data.first().unwrap(), "", &keys));
    }

    #[test]
    fn whitespace_is_not_normalized() {
        let data = dataset(&[Some("North Sydney")]);
        let keys = AttributeKeys::default();
        assert_eq!(filter(&data, "north sydney", &keys).len(), 1);
        assert!(filter(&data, "north  sydney", &keys).is_empty());
        assert!(filter(&data, " north", &keys).is_empty());
    }

    #[test]
    fn numeric_names_are_searchable() {
        let data = Dataset::from_geojson_str(
            &json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "properties": { "nsw_loca_2": 2026 },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    }
                }]
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(filter(&data, "202", &AttributeKeys::default()).len(), 1);
    }

    #[test]
    fn result_is_always_subset() {
        let data = dataset(&[Some("Bondi"), Some("Bondi Junction"), Some("Manly"), None]);
        let keys = AttributeKeys::default();
        for query in ["", "b", "BONDI", "junction", "xyz", "y", " "] {
            let result = filter(&data, query, &keys);
            assert!(result.is_subset_of(&data), "query {query:?}");
            assert!(result.len() <= data.len());
            for record in result.iter() {
                assert!(matches(record, query, &keys));
            }
        }
    }
}
