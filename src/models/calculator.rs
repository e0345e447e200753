use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

fn default_one() -> u32 {
    1
}

/// One hotel row of the cost calculator. Not persisted on its own; the
/// surrounding quote/booking features carry the whole sheet as opaque JSON.
///
/// Two pricing modes: while `is_custom` is false the resolver owns
/// `room_rate`/`extra_bed_rate` and overwrites them on every reprice;
/// flipping `is_custom` on freezes whatever the operator typed.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HotelLineItem {
    #[serde(default)]
    pub hotel_id: Option<ObjectId>,
    #[serde(default)]
    pub room_type_id: Option<ObjectId>,
    #[serde(default)]
    pub meal_plan: String,
    /// Trip start date as entered, "YYYY-MM-DD" or RFC3339; parsed leniently.
    #[serde(default)]
    pub travel_date: Option<String>,
    #[serde(default = "default_one")]
    pub rooms: u32,
    #[serde(default = "default_one")]
    pub nights: u32,
    #[serde(default)]
    pub extra_beds: u32,
    #[serde(default)]
    pub room_rate: f64,
    #[serde(default)]
    pub extra_bed_rate: f64,
    /// Set when a matched seasonal rate is past its booking deadline; the
    /// UI shows a warning and the operator must price the row by hand.
    #[serde(default)]
    pub rate_expired: bool,
    #[serde(default)]
    pub is_custom: bool,
}

/// Flat rate x quantity row, no temporal logic.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TransportItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default = "default_one")]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivityItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rate: f64,
    #[serde(default = "default_one")]
    pub quantity: u32,
}

/// The calculator's working state, sent back and forth by the quote screen.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CostSheet {
    #[serde(default)]
    pub hotels: Vec<HotelLineItem>,
    #[serde(default)]
    pub transport: Vec<TransportItem>,
    #[serde(default)]
    pub activities: Vec<ActivityItem>,
    /// Manually entered commission/margin, added on top of the three
    /// category totals.
    #[serde(default)]
    pub commission: f64,
}

/// Repriced sheet plus the category totals the quote screen renders.
#[derive(Debug, Serialize, Clone)]
pub struct QuoteBreakdown {
    pub sheet: CostSheet,
    pub hotel_total: f64,
    pub extra_bed_total: f64,
    pub transport_total: f64,
    pub activity_total: f64,
    pub commission: f64,
    pub grand_total: f64,
}
