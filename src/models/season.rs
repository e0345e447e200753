use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::room::RoomRate;

/// A season is not persisted. It is the batch-editing view over every
/// RoomRate that shares an identical `(valid_from, valid_to)` window,
/// typically one rate per room type of a hotel.
#[derive(Debug, Serialize, Clone)]
pub struct Season {
    pub valid_from: DateTime,
    pub valid_to: DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_valid_until: Option<DateTime>,
    pub rates: Vec<RoomRate>,
}

/// One room type's price row inside a season form submission.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SeasonRateInput {
    pub room_type_id: ObjectId,
    #[serde(default)]
    pub price_ep: Option<f64>,
    #[serde(default)]
    pub price_cp: Option<f64>,
    #[serde(default)]
    pub price_map: Option<f64>,
    #[serde(default)]
    pub price_ap: Option<f64>,
    #[serde(default)]
    pub extra_bed_ep: Option<f64>,
    #[serde(default)]
    pub extra_bed_cp: Option<f64>,
    #[serde(default)]
    pub extra_bed_map: Option<f64>,
    #[serde(default)]
    pub extra_bed_ap: Option<f64>,
    #[serde(default)]
    pub extra_bed: Option<f64>,
}

/// Season form submission: one window plus a price row per room type.
/// Dates travel as plain "YYYY-MM-DD" strings and are normalized to
/// start of day UTC before they are written.
#[derive(Debug, Deserialize, Clone)]
pub struct SeasonApply {
    pub valid_from: String,
    pub valid_to: String,
    #[serde(default)]
    pub booking_valid_until: Option<String>,
    pub rates: Vec<SeasonRateInput>,
}

/// Request body for deleting a season: just the window that identifies it.
#[derive(Debug, Deserialize, Clone)]
pub struct SeasonDelete {
    pub valid_from: String,
    pub valid_to: String,
}

/// Per-room-type outcome of a best-effort season delete. The loop keeps
/// going after a failure, so some room types may be cleared while others
/// are not; callers re-run the delete when `deleted` is false anywhere.
#[derive(Debug, Serialize, Clone)]
pub struct SeasonDeleteOutcome {
    pub room_type_id: ObjectId,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
