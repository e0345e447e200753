use chrono::NaiveDate;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::{Client, Collection};

use crate::models::room::{PopulatedRoomType, RoomRate};
use crate::models::season::{Season, SeasonDeleteOutcome, SeasonRateInput};

pub struct SeasonService;

impl SeasonService {
    fn rates_collection(client: &Client) -> Collection<RoomRate> {
        client.database("Catalog").collection("RoomRates")
    }

    /// Normalize a calendar day to start of day UTC for storage, so equal
    /// windows entered on different days cannot fragment into separate
    /// seasons via stray time-of-day components.
    pub fn day_to_bson(day: NaiveDate) -> DateTime {
        let midnight = day.and_time(chrono::NaiveTime::MIN).and_utc();
        DateTime::from_chrono(midnight)
    }

    /// Grouping key for the editor: the exact stored timestamps, not the
    /// calendar days. Two windows that differ only in time-of-day are two
    /// different seasons on read, which is why writes normalize first.
    pub fn season_key(rate: &RoomRate) -> (i64, i64) {
        (
            rate.valid_from.timestamp_millis(),
            rate.valid_to.timestamp_millis(),
        )
    }

    /// Reorganize flat per-room rates into one Season per distinct window,
    /// ascending by `valid_from`. Room types with no rate under a window
    /// contribute no row to that season; the editor fills those rows from
    /// base rates without creating anything until saved.
    pub fn group_into_seasons(rooms: &[PopulatedRoomType]) -> Vec<Season> {
        let mut seasons: Vec<Season> = Vec::new();
        for room in rooms {
            for rate in &room.rates {
                let key = Self::season_key(rate);
                match seasons.iter_mut().find(|s| {
                    (s.valid_from.timestamp_millis(), s.valid_to.timestamp_millis()) == key
                }) {
                    Some(season) => season.rates.push(rate.clone()),
                    None => seasons.push(Season {
                        valid_from: rate.valid_from,
                        valid_to: rate.valid_to,
                        booking_valid_until: rate.booking_valid_until,
                        rates: vec![rate.clone()],
                    }),
                }
            }
        }
        seasons.sort_by_key(|s| s.valid_from.timestamp_millis());
        seasons
    }

    /// Filter matching every stored rate for one room type under exactly
    /// this window. Used by both the apply and delete paths so they always
    /// agree on what "this season's rate" means.
    pub fn window_filter(room_type_id: ObjectId, from: DateTime, to: DateTime) -> Document {
        doc! {
            "room_type_id": room_type_id,
            "valid_from": from,
            "valid_to": to,
        }
    }

    pub fn rate_from_input(
        input: &SeasonRateInput,
        from: DateTime,
        to: DateTime,
        booking_valid_until: Option<DateTime>,
    ) -> RoomRate {
        RoomRate {
            id: None,
            room_type_id: input.room_type_id,
            valid_from: from,
            valid_to: to,
            price_ep: input.price_ep,
            price_cp: input.price_cp,
            price_map: input.price_map,
            price_ap: input.price_ap,
            extra_bed_ep: input.extra_bed_ep,
            extra_bed_cp: input.extra_bed_cp,
            extra_bed_map: input.extra_bed_map,
            extra_bed_ap: input.extra_bed_ap,
            extra_bed: input.extra_bed,
            booking_valid_until,
            created_at: Some(DateTime::now()),
        }
    }

    /// Fan a season form out into per-room-type writes: delete whatever
    /// rates each room type already has under this exact window, then
    /// insert the fresh one. Delete-then-recreate, so old rate ids do not
    /// survive a save.
    ///
    /// The whole hotel-season runs in one transaction; a failure part way
    /// through leaves no room type changed.
    pub async fn apply_season(
        client: &Client,
        from: DateTime,
        to: DateTime,
        booking_valid_until: Option<DateTime>,
        rows: &[SeasonRateInput],
    ) -> Result<(), mongodb::error::Error> {
        let rates = Self::rates_collection(client);
        let mut session = client.start_session().await?;
        session.start_transaction().await?;

        match Self::replace_rates_in_session(
            &rates,
            &mut session,
            from,
            to,
            booking_valid_until,
            rows,
        )
        .await
        {
            Ok(()) => session.commit_transaction().await,
            Err(err) => {
                let _ = session.abort_transaction().await;
                Err(err)
            }
        }
    }

    async fn replace_rates_in_session(
        rates: &Collection<RoomRate>,
        session: &mut mongodb::ClientSession,
        from: DateTime,
        to: DateTime,
        booking_valid_until: Option<DateTime>,
        rows: &[SeasonRateInput],
    ) -> Result<(), mongodb::error::Error> {
        for row in rows {
            rates
                .delete_many(Self::window_filter(row.room_type_id, from, to))
                .session(&mut *session)
                .await?;
            let rate = Self::rate_from_input(row, from, to, booking_valid_until);
            rates.insert_one(&rate).session(&mut *session).await?;
        }
        Ok(())
    }

    /// Delete a whole season: one independent delete per room type,
    /// best-effort. A failed delete does not stop the loop; the caller
    /// gets a per-room-type outcome list and re-runs the delete if any
    /// entry failed. Deliberately NOT a transaction.
    pub async fn delete_season(
        client: &Client,
        from: DateTime,
        to: DateTime,
        room_type_ids: &[ObjectId],
    ) -> (bool, Vec<SeasonDeleteOutcome>) {
        let rates = Self::rates_collection(client);
        let mut all_ok = true;
        let mut outcomes = Vec::with_capacity(room_type_ids.len());
        for &room_type_id in room_type_ids {
            match rates
                .delete_many(Self::window_filter(room_type_id, from, to))
                .await
            {
                Ok(_) => outcomes.push(SeasonDeleteOutcome {
                    room_type_id,
                    deleted: true,
                    error: None,
                }),
                Err(err) => {
                    eprintln!(
                        "Failed to delete season rates for room type {}: {:?}",
                        room_type_id, err
                    );
                    all_ok = false;
                    outcomes.push(SeasonDeleteOutcome {
                        room_type_id,
                        deleted: false,
                        error: Some(err.to_string()),
                    });
                }
            }
        }
        (all_ok, outcomes)
    }
}
