//! Popup content for a single suburb.

use crate::record::{AttributeKeys, SuburbRecord};

/// Title used when a suburb has no name.
pub const UNNAMED_SUBURB: &str = "Unnamed Suburb";

/// Marker used for any other absent attribute.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-layout information block shown when a suburb polygon is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    /// Title-cased suburb name.
    pub title: String,
    /// Location identifier.
    pub location_id: String,
    /// Polygon identifier.
    pub polygon_id: String,
    /// Creation date.
    pub created: String,
    /// Region name.
    pub region: String,
}

impl PopupContent {
    /// Builds the popup for the record. Never fails: every absent attribute gets its fallback.
    pub fn from_record(record: &SuburbRecord, keys: &AttributeKeys) -> Self {
        let field = |key: &str| {
            record
                .attribute(key)
                .map_or_else(|| NOT_AVAILABLE.to_string(), |value| value.into_owned())
        };

        Self {
            title: record
                .name(keys)
                .map_or_else(|| UNNAMED_SUBURB.to_string(), |name| title_case(&name)),
            location_id: field(&keys.location_id),
            polygon_id: field(&keys.polygon_id),
            created: field(&keys.created),
            region: field(&keys.region),
        }
    }

    /// Labelled rows below the title, in display order.
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Location ID", self.location_id.as_str()),
            ("LC Poly PID", self.polygon_id.as_str()),
            ("Date Created", self.created.as_str()),
            ("Region", self.region.as_str()),
        ]
    }

    /// Renders the HTML fragment. Attribute values are inserted as is, without escaping.
    pub fn to_html(&self) -> String {
        let mut html = format!("<div>\n<h4>Suburb: {}</h4>\n", self.title);
        for (label, value) in self.rows() {
            html.push_str(&format!("<p><strong>{label}:</strong> {value}</p>\n"));
        }
        html.push_str("</div>");
        html
    }
}

/// Capitalizes the first letter of every space-separated word and lower-cases the rest.
/// Spacing is kept as is.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
