use chrono::NaiveDate;
use serde::Serialize;

use crate::models::room::{MealPlan, PopulatedRoomType, RoomRate};

/// Outcome of resolving one calculator line against the catalog.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub room_rate: f64,
    pub extra_bed_rate: f64,
    /// A seasonal rate matched the travel date but its booking deadline has
    /// passed; both rates are forced to zero so the operator prices by hand.
    pub rate_expired: bool,
}

pub struct RateResolver;

impl RateResolver {
    /// Parse a user-entered date, accepting RFC3339 or plain "YYYY-MM-DD".
    /// Anything unparseable (or absent) resolves to today: bad input must
    /// never crash the pricing screen, it just prices as an immediate trip.
    pub fn parse_day_or_today(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
        let Some(raw) = raw else {
            return today;
        };
        let raw = raw.trim();
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return dt.date_naive();
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or(today)
    }

    /// Find the seasonal rate covering `travel_date`, if any.
    ///
    /// Windows may overlap; the first match in storage order wins and no
    /// further ordering is applied. Whether that is the *right* rate when
    /// two admins create overlapping seasons is an open question, but the
    /// pick is at least deterministic for a given collection order.
    pub fn find_seasonal_rate(
        room: &PopulatedRoomType,
        travel_date: NaiveDate,
    ) -> Option<&RoomRate> {
        room.rates.iter().find(|rate| rate.covers(travel_date))
    }

    /// Whether the rate's booking deadline has passed. This gate compares
    /// against *today*, not the travel date: a season for next year is
    /// unusable once the office misses the cutoff for making the booking.
    pub fn booking_window_closed(rate: &RoomRate, today: NaiveDate) -> bool {
        match rate.booking_valid_until {
            Some(cutoff) => today > cutoff.to_chrono().date_naive(),
            None => false,
        }
    }

    /// Resolve the nightly room rate and extra-bed rate for one line item.
    ///
    /// Seasonal rate found and bookable -> seasonal prices.
    /// Seasonal rate found but past deadline -> zero rates, `rate_expired`.
    /// No seasonal rate -> room type base prices.
    pub fn resolve(
        room: &PopulatedRoomType,
        travel_date: NaiveDate,
        plan: Option<MealPlan>,
        today: NaiveDate,
    ) -> RateQuote {
        if let Some(seasonal) = Self::find_seasonal_rate(room, travel_date) {
            if Self::booking_window_closed(seasonal, today) {
                // Deliberately NOT a fallback to base rates: a lapsed
                // deadline needs a human decision, not a silent substitute.
                return RateQuote {
                    room_rate: 0.0,
                    extra_bed_rate: 0.0,
                    rate_expired: true,
                };
            }
            let room_rate = plan.and_then(|p| seasonal.plan_price(p)).unwrap_or(0.0);
            let extra_bed_rate = nonzero(plan.and_then(|p| seasonal.plan_extra_bed(p)))
                .or(nonzero(seasonal.extra_bed))
                .unwrap_or(0.0);
            return RateQuote {
                room_rate,
                extra_bed_rate,
                rate_expired: false,
            };
        }

        let base = &room.base;
        let room_rate = nonzero(plan.and_then(|p| base.plan_price(p)))
            .or(nonzero(base.base_rate))
            .unwrap_or(0.0);
        let extra_bed_rate = nonzero(plan.and_then(|p| base.plan_extra_bed(p)))
            .or(nonzero(base.extra_bed))
            .unwrap_or(0.0);
        RateQuote {
            room_rate,
            extra_bed_rate,
            rate_expired: false,
        }
    }
}

/// Fallback chains treat an explicit 0 the same as "not set", so a zero
/// per-plan price falls through to the legacy field. A free extra bed
/// therefore cannot be expressed; kept for compatibility with the data
/// already in the catalog.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
