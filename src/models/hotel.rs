use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Valley destinations the agency sells. The admin forms only offer these,
/// so `Hotel::location` is expected to hold one of them.
pub const LOCATIONS: [&str; 7] = [
    "Srinagar",
    "Pahalgam",
    "Gulmarg",
    "Sonamarg",
    "Yusmarg",
    "Gurez",
    "Doodhpathri",
];

pub fn is_known_location(location: &str) -> bool {
    LOCATIONS.iter().any(|l| l.eq_ignore_ascii_case(location))
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Hotel {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    // Soft-delete marker; trashed hotels keep their rooms and rates
    // until purged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_locations_match_case_insensitively() {
        assert!(is_known_location("Gulmarg"));
        assert!(is_known_location("gulmarg"));
        assert!(is_known_location("SONAMARG"));
        assert!(!is_known_location("Leh"));
        assert!(!is_known_location(""));
    }
}
