use std::collections::HashMap;

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection};

use crate::models::hotel::Hotel;
use crate::models::room::{PopulatedRoomType, RoomRate, RoomType};

/// Read side of the catalog: loads the Hotel -> RoomType -> RoomRate graph
/// into memory for the resolver and the admin screens. Rates keep their
/// natural collection order, which is what the resolver's first-match
/// tie-break runs against.
pub struct CatalogService;

impl CatalogService {
    pub fn hotels_collection(client: &Client) -> Collection<Hotel> {
        client.database("Catalog").collection("Hotels")
    }

    pub fn rooms_collection(client: &Client) -> Collection<RoomType> {
        client.database("Catalog").collection("RoomTypes")
    }

    pub fn rates_collection(client: &Client) -> Collection<RoomRate> {
        client.database("Catalog").collection("RoomRates")
    }

    /// Filter for the hotel list: live hotels by default, the trash bin
    /// with `trash = true`, optionally narrowed to one location and a
    /// name prefix search.
    pub fn hotel_filter(location: Option<&str>, trash: bool, search: Option<&str>) -> Document {
        let mut filter = if trash {
            doc! { "deleted_at": { "$ne": null } }
        } else {
            doc! { "deleted_at": Bson::Null }
        };
        if let Some(location) = location {
            if !location.is_empty() {
                filter.insert("location", location);
            }
        }
        if let Some(search) = search {
            if !search.is_empty() {
                filter.insert(
                    "name",
                    doc! {
                        "$regex": format!("^{}", regex::escape(search)),
                        "$options": "i"
                    },
                );
            }
        }
        filter
    }

    pub async fn hotels(
        client: &Client,
        location: Option<&str>,
        trash: bool,
        search: Option<&str>,
    ) -> Result<Vec<Hotel>, mongodb::error::Error> {
        let filter = Self::hotel_filter(location, trash, search);
        let cursor = Self::hotels_collection(client).find(filter).await?;
        cursor.try_collect().await
    }

    /// All room types of a hotel with their seasonal rates attached.
    pub async fn rooms_with_rates(
        client: &Client,
        hotel_id: ObjectId,
    ) -> Result<Vec<PopulatedRoomType>, mongodb::error::Error> {
        let rooms: Vec<RoomType> = Self::rooms_collection(client)
            .find(doc! { "hotel_id": hotel_id })
            .await?
            .try_collect()
            .await?;
        let ids: Vec<ObjectId> = rooms.iter().filter_map(|r| r.id).collect();
        let rates: Vec<RoomRate> = Self::rates_collection(client)
            .find(doc! { "room_type_id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(Self::attach_rates(rooms, rates))
    }

    /// The room types a quote request references, keyed by id. Lines may
    /// point at rooms of different hotels; one query covers them all.
    pub async fn rooms_by_ids(
        client: &Client,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, PopulatedRoomType>, mongodb::error::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rooms: Vec<RoomType> = Self::rooms_collection(client)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        let rates: Vec<RoomRate> = Self::rates_collection(client)
            .find(doc! { "room_type_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;
        Ok(Self::attach_rates(rooms, rates)
            .into_iter()
            .filter_map(|room| room.base.id.map(|id| (id, room)))
            .collect())
    }

    /// Bucket flat rate rows under their room types, preserving the order
    /// the rates came back in.
    pub fn attach_rates(rooms: Vec<RoomType>, rates: Vec<RoomRate>) -> Vec<PopulatedRoomType> {
        let mut by_room: HashMap<ObjectId, Vec<RoomRate>> = HashMap::new();
        for rate in rates {
            by_room.entry(rate.room_type_id).or_default().push(rate);
        }
        rooms
            .into_iter()
            .map(|room| {
                let rates = room
                    .id
                    .and_then(|id| by_room.remove(&id))
                    .unwrap_or_default();
                PopulatedRoomType { base: room, rates }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: ObjectId) -> RoomType {
        RoomType {
            id: Some(id),
            hotel_id: ObjectId::new(),
            name: "Standard".to_string(),
            price_ep: None,
            price_cp: None,
            price_map: None,
            price_ap: None,
            extra_bed_ep: None,
            extra_bed_cp: None,
            extra_bed_map: None,
            extra_bed_ap: None,
            base_rate: None,
            extra_bed: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn rate(room_type_id: ObjectId, price_map: f64) -> RoomRate {
        RoomRate {
            id: Some(ObjectId::new()),
            room_type_id,
            valid_from: mongodb::bson::DateTime::now(),
            valid_to: mongodb::bson::DateTime::now(),
            price_ep: None,
            price_cp: None,
            price_map: Some(price_map),
            price_ap: None,
            extra_bed_ep: None,
            extra_bed_cp: None,
            extra_bed_map: None,
            extra_bed_ap: None,
            extra_bed: None,
            booking_valid_until: None,
            created_at: None,
        }
    }

    #[test]
    fn attach_rates_preserves_rate_order_per_room() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let rates = vec![rate(a, 1.0), rate(b, 2.0), rate(a, 3.0), rate(a, 4.0)];
        let populated = CatalogService::attach_rates(vec![room(a), room(b)], rates);

        assert_eq!(populated.len(), 2);
        let prices: Vec<f64> = populated[0]
            .rates
            .iter()
            .filter_map(|r| r.price_map)
            .collect();
        assert_eq!(prices, vec![1.0, 3.0, 4.0]);
        assert_eq!(populated[1].rates.len(), 1);
    }

    #[test]
    fn attach_rates_with_no_rates_yields_empty_lists() {
        let a = ObjectId::new();
        let populated = CatalogService::attach_rates(vec![room(a)], vec![]);
        assert!(populated[0].rates.is_empty());
    }

    #[test]
    fn hotel_filter_defaults_to_live_hotels() {
        let filter = CatalogService::hotel_filter(None, false, None);
        assert_eq!(filter.get("deleted_at"), Some(&Bson::Null));

        let trash = CatalogService::hotel_filter(None, true, None);
        assert!(trash.get_document("deleted_at").is_ok());
    }

    #[test]
    fn hotel_filter_applies_location_and_search() {
        let filter = CatalogService::hotel_filter(Some("Pahalgam"), false, Some("Him"));
        assert_eq!(
            filter.get_str("location").unwrap(),
            "Pahalgam"
        );
        assert_eq!(
            filter.get_document("name").unwrap().get_str("$regex").unwrap(),
            "^Him"
        );
    }
}
