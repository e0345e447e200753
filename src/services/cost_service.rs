use std::collections::HashMap;

use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;

use crate::models::calculator::{CostSheet, HotelLineItem, QuoteBreakdown};
use crate::models::room::{MealPlan, PopulatedRoomType};
use crate::services::rate_resolver::RateResolver;

pub struct CostService;

impl CostService {
    /// Re-run the resolver for one line. This overwrites whatever rate was
    /// on the line before, including rates the operator typed in: the only
    /// way to keep a manual figure is `is_custom`, which skips the resolver
    /// entirely.
    pub fn reprice_line(
        item: &mut HotelLineItem,
        rooms: &HashMap<ObjectId, PopulatedRoomType>,
        today: NaiveDate,
    ) {
        if item.is_custom {
            return;
        }

        let room = item.room_type_id.and_then(|id| rooms.get(&id));
        let Some(room) = room else {
            // No catalog linkage yet (row still being filled in).
            item.room_rate = 0.0;
            item.extra_bed_rate = 0.0;
            item.rate_expired = false;
            return;
        };

        let travel_date = RateResolver::parse_day_or_today(item.travel_date.as_deref(), today);
        let plan = MealPlan::parse(&item.meal_plan);
        let quote = RateResolver::resolve(room, travel_date, plan, today);
        item.room_rate = quote.room_rate;
        item.extra_bed_rate = quote.extra_bed_rate;
        item.rate_expired = quote.rate_expired;
    }

    pub fn reprice_sheet(
        sheet: &mut CostSheet,
        rooms: &HashMap<ObjectId, PopulatedRoomType>,
        today: NaiveDate,
    ) {
        for item in &mut sheet.hotels {
            Self::reprice_line(item, rooms, today);
        }
    }

    pub fn hotel_total(sheet: &CostSheet) -> f64 {
        sheet
            .hotels
            .iter()
            .map(|i| i.room_rate * f64::from(i.rooms) * f64::from(i.nights))
            .sum()
    }

    pub fn extra_bed_total(sheet: &CostSheet) -> f64 {
        sheet
            .hotels
            .iter()
            .map(|i| i.extra_bed_rate * f64::from(i.extra_beds) * f64::from(i.nights))
            .sum()
    }

    pub fn transport_total(sheet: &CostSheet) -> f64 {
        sheet
            .transport
            .iter()
            .map(|i| i.rate * f64::from(i.quantity))
            .sum()
    }

    pub fn activity_total(sheet: &CostSheet) -> f64 {
        sheet
            .activities
            .iter()
            .map(|i| i.rate * f64::from(i.quantity))
            .sum()
    }

    /// Totals for an already repriced sheet. Plain f64 sums; rounding to two
    /// decimals happens only here, on the displayed figures.
    pub fn breakdown(sheet: CostSheet) -> QuoteBreakdown {
        let hotel_total = round2(Self::hotel_total(&sheet));
        let extra_bed_total = round2(Self::extra_bed_total(&sheet));
        let transport_total = round2(Self::transport_total(&sheet));
        let activity_total = round2(Self::activity_total(&sheet));
        let commission = round2(sheet.commission);
        let grand_total =
            round2(hotel_total + extra_bed_total + transport_total + activity_total + commission);
        QuoteBreakdown {
            sheet,
            hotel_total,
            extra_bed_total,
            transport_total,
            activity_total,
            commission,
            grand_total,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calculator::{ActivityItem, TransportItem};
    use crate::models::room::{RoomRate, RoomType};
    use mongodb::bson::DateTime;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bson_day(y: i32, m: u32, d: u32) -> DateTime {
        DateTime::from_chrono(day(y, m, d).and_hms_opt(0, 0, 0).unwrap().and_utc())
    }

    fn catalog_with_map_price(
        room_id: ObjectId,
        base_map: f64,
        seasonal: Option<RoomRate>,
    ) -> HashMap<ObjectId, PopulatedRoomType> {
        let room = PopulatedRoomType {
            base: RoomType {
                id: Some(room_id),
                hotel_id: ObjectId::new(),
                name: "Super Deluxe".to_string(),
                price_ep: None,
                price_cp: None,
                price_map: Some(base_map),
                price_ap: None,
                extra_bed_ep: None,
                extra_bed_cp: None,
                extra_bed_map: Some(800.0),
                extra_bed_ap: None,
                base_rate: None,
                extra_bed: None,
                created_at: None,
                updated_at: None,
            },
            rates: seasonal.into_iter().collect(),
        };
        HashMap::from([(room_id, room)])
    }

    fn line(room_id: ObjectId) -> HotelLineItem {
        HotelLineItem {
            hotel_id: None,
            room_type_id: Some(room_id),
            meal_plan: "MAP".to_string(),
            travel_date: Some("2024-12-25".to_string()),
            rooms: 2,
            nights: 3,
            extra_beds: 1,
            room_rate: 0.0,
            extra_bed_rate: 0.0,
            rate_expired: false,
            is_custom: false,
        }
    }

    #[test]
    fn reprice_overwrites_manual_rate() {
        let room_id = ObjectId::new();
        let rooms = catalog_with_map_price(room_id, 5000.0, None);

        let mut item = line(room_id);
        item.room_rate = 4200.0; // operator typed this, then changed the plan
        CostService::reprice_line(&mut item, &rooms, day(2024, 6, 1));
        assert_eq!(item.room_rate, 5000.0);
        assert_eq!(item.extra_bed_rate, 800.0);
    }

    #[test]
    fn custom_lines_are_left_alone() {
        let room_id = ObjectId::new();
        let rooms = catalog_with_map_price(room_id, 5000.0, None);

        let mut item = line(room_id);
        item.is_custom = true;
        item.room_rate = 4200.0;
        item.extra_bed_rate = 100.0;
        CostService::reprice_line(&mut item, &rooms, day(2024, 6, 1));
        assert_eq!(item.room_rate, 4200.0);
        assert_eq!(item.extra_bed_rate, 100.0);

        // Turning custom off puts the resolver back in charge.
        item.is_custom = false;
        CostService::reprice_line(&mut item, &rooms, day(2024, 6, 1));
        assert_eq!(item.room_rate, 5000.0);
    }

    #[test]
    fn unlinked_line_prices_as_zero() {
        let rooms = HashMap::new();
        let mut item = line(ObjectId::new());
        item.room_rate = 999.0;
        CostService::reprice_line(&mut item, &rooms, day(2024, 6, 1));
        assert_eq!(item.room_rate, 0.0);
        assert_eq!(item.extra_bed_rate, 0.0);
    }

    #[test]
    fn expired_seasonal_rate_flags_the_line() {
        let room_id = ObjectId::new();
        let seasonal = RoomRate {
            id: Some(ObjectId::new()),
            room_type_id: room_id,
            valid_from: bson_day(2024, 12, 20),
            valid_to: bson_day(2024, 12, 31),
            price_ep: None,
            price_cp: None,
            price_map: Some(7000.0),
            price_ap: None,
            extra_bed_ep: None,
            extra_bed_cp: None,
            extra_bed_map: None,
            extra_bed_ap: None,
            extra_bed: None,
            booking_valid_until: Some(bson_day(2024, 1, 1)),
            created_at: None,
        };
        let rooms = catalog_with_map_price(room_id, 5000.0, Some(seasonal));

        let mut item = line(room_id);
        CostService::reprice_line(&mut item, &rooms, day(2024, 6, 1));
        assert_eq!(item.room_rate, 0.0);
        assert!(item.rate_expired);
    }

    #[test]
    fn totals_sum_all_categories_plus_commission() {
        let sheet = CostSheet {
            hotels: vec![
                HotelLineItem {
                    room_rate: 5000.0,
                    extra_bed_rate: 800.0,
                    rooms: 2,
                    nights: 3,
                    extra_beds: 1,
                    ..line(ObjectId::new())
                },
                HotelLineItem {
                    room_rate: 3000.0,
                    extra_bed_rate: 0.0,
                    rooms: 1,
                    nights: 2,
                    extra_beds: 0,
                    ..line(ObjectId::new())
                },
            ],
            transport: vec![TransportItem {
                name: "Innova".to_string(),
                rate: 4500.0,
                quantity: 2,
            }],
            activities: vec![ActivityItem {
                name: "Shikara ride".to_string(),
                rate: 1500.0,
                quantity: 4,
            }],
            commission: 2500.0,
        };

        let breakdown = CostService::breakdown(sheet);
        assert_eq!(breakdown.hotel_total, 36000.0); // 5000*2*3 + 3000*1*2
        assert_eq!(breakdown.extra_bed_total, 2400.0); // 800*1*3
        assert_eq!(breakdown.transport_total, 9000.0);
        assert_eq!(breakdown.activity_total, 6000.0);
        assert_eq!(breakdown.grand_total, 55900.0);
    }

    #[test]
    fn empty_sheet_totals_are_zero() {
        let breakdown = CostService::breakdown(CostSheet::default());
        assert_eq!(breakdown.hotel_total, 0.0);
        assert_eq!(breakdown.extra_bed_total, 0.0);
        assert_eq!(breakdown.transport_total, 0.0);
        assert_eq!(breakdown.activity_total, 0.0);
        assert_eq!(breakdown.grand_total, 0.0);
    }

    #[test]
    fn totals_round_to_two_decimals() {
        let sheet = CostSheet {
            hotels: vec![HotelLineItem {
                room_rate: 1000.333,
                rooms: 1,
                nights: 1,
                extra_beds: 0,
                ..line(ObjectId::new())
            }],
            transport: vec![],
            activities: vec![],
            commission: 0.005,
        };
        let breakdown = CostService::breakdown(sheet);
        assert_eq!(breakdown.hotel_total, 1000.33);
        assert_eq!(breakdown.commission, 0.01);
    }
}
