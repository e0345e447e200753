use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::hotel::Hotel;

/// Meal plans quoted per room night. Stored and exchanged as the plain
/// industry codes ("EP", "CP", "MAP", "AP").
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum MealPlan {
    #[serde(rename = "EP")]
    Ep,
    #[serde(rename = "CP")]
    Cp,
    #[serde(rename = "MAP")]
    Map,
    #[serde(rename = "AP")]
    Ap,
}

impl MealPlan {
    /// Lenient parse of the free-form plan string carried on calculator
    /// line items. Anything unrecognized is None, which prices as zero
    /// downstream rather than failing the request.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "EP" => Some(Self::Ep),
            "CP" => Some(Self::Cp),
            "MAP" => Some(Self::Map),
            "AP" => Some(Self::Ap),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoomType {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub hotel_id: ObjectId,
    pub name: String,
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
    // Legacy single-value fields from before per-plan pricing; still the
    // last fallback when no per-plan price is set.
    #[serde(default)]
    pub base_rate: Option<f64>,
    #[serde(default)]
    pub extra_bed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl RoomType {
    pub fn plan_price(&self, plan: MealPlan) -> Option<f64> {
        match plan {
            MealPlan::Ep => self.price_ep,
            MealPlan::Cp => self.price_cp,
            MealPlan::Map => self.price_map,
            MealPlan::Ap => self.price_ap,
        }
    }

    pub fn plan_extra_bed(&self, plan: MealPlan) -> Option<f64> {
        match plan {
            MealPlan::Ep => self.extra_bed_ep,
            MealPlan::Cp => self.extra_bed_cp,
            MealPlan::Map => self.extra_bed_map,
            MealPlan::Ap => self.extra_bed_ap,
        }
    }
}

/// A date-windowed override of a room type's base prices. `valid_from` and
/// `valid_to` are inclusive calendar-day bounds; comparisons truncate to
/// start of day.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoomRate {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub room_type_id: ObjectId,
    pub valid_from: DateTime,
    pub valid_to: DateTime,
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
    // Cutoff for making the booking itself; compared against today's date,
    // not the travel date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_valid_until: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl RoomRate {
    pub fn plan_price(&self, plan: MealPlan) -> Option<f64> {
        match plan {
            MealPlan::Ep => self.price_ep,
            MealPlan::Cp => self.price_cp,
            MealPlan::Map => self.price_map,
            MealPlan::Ap => self.price_ap,
        }
    }

    pub fn plan_extra_bed(&self, plan: MealPlan) -> Option<f64> {
        match plan {
            MealPlan::Ep => self.extra_bed_ep,
            MealPlan::Cp => self.extra_bed_cp,
            MealPlan::Map => self.extra_bed_map,
            MealPlan::Ap => self.extra_bed_ap,
        }
    }

    /// Whether `day` falls inside the validity window, inclusive on both
    /// ends, at calendar-day granularity.
    pub fn covers(&self, day: NaiveDate) -> bool {
        let from = self.valid_from.to_chrono().date_naive();
        let to = self.valid_to.to_chrono().date_naive();
        from <= day && day <= to
    }
}

// Populated versions using composition, same pattern as the nested
// hotel -> rooms -> rates responses the admin screens consume.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PopulatedRoomType {
    #[serde(flatten)]
    pub base: RoomType,
    #[serde(default)]
    pub rates: Vec<RoomRate>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PopulatedHotel {
    #[serde(flatten)]
    pub base: Hotel,
    #[serde(default)]
    pub rooms: Vec<PopulatedRoomType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_plan_parse_accepts_known_codes() {
        assert_eq!(MealPlan::parse("MAP"), Some(MealPlan::Map));
        assert_eq!(MealPlan::parse("map"), Some(MealPlan::Map));
        assert_eq!(MealPlan::parse(" ep "), Some(MealPlan::Ep));
        assert_eq!(MealPlan::parse("CP"), Some(MealPlan::Cp));
        assert_eq!(MealPlan::parse("AP"), Some(MealPlan::Ap));
    }

    #[test]
    fn meal_plan_parse_rejects_unknown_codes() {
        assert_eq!(MealPlan::parse("american"), None);
        assert_eq!(MealPlan::parse(""), None);
        assert_eq!(MealPlan::parse("EP+"), None);
    }
}
