use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, Bson};
use mongodb::bson::DateTime;
use mongodb::Client;
use std::sync::Arc;

use crate::models::hotel::{is_known_location, Hotel};
use crate::models::room::PopulatedHotel;
use crate::services::catalog_service::CatalogService;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    location: Option<String>,
    trash: Option<bool>,
    search: Option<String>,
}

/*
    /api/hotels?location=&trash=&search=
*/
pub async fn get_hotels(
    data: web::Data<Arc<Client>>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let client = data.into_inner();
    let trash = params.trash.unwrap_or(false);

    match CatalogService::hotels(
        &client,
        params.location.as_deref(),
        trash,
        params.search.as_deref(),
    )
    .await
    {
        Ok(hotels) => HttpResponse::Ok().json(hotels),
        Err(err) => {
            eprintln!("Failed to find hotels: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find hotels.")
        }
    }
}

/*
    /api/hotels/{id} - one hotel with its room types and seasonal rates,
    the graph the calculator and the season editor work from
*/
pub async fn get_hotel(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let hotel = match CatalogService::hotels_collection(&client)
        .find_one(doc! { "_id": id })
        .await
    {
        Ok(Some(hotel)) => hotel,
        Ok(None) => return HttpResponse::NotFound().body("Hotel not found"),
        Err(err) => {
            eprintln!("Failed to retrieve hotel: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve hotel");
        }
    };

    match CatalogService::rooms_with_rates(&client, id).await {
        Ok(rooms) => HttpResponse::Ok().json(PopulatedHotel { base: hotel, rooms }),
        Err(err) => {
            eprintln!("Failed to retrieve rooms: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve hotel")
        }
    }
}

pub async fn create_hotel(
    data: web::Data<Arc<Client>>,
    input: web::Json<Hotel>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = CatalogService::hotels_collection(&client);

    let mut submission = input.into_inner();
    if submission.name.trim().is_empty() {
        return HttpResponse::BadRequest().body("Hotel name is required");
    }
    if !is_known_location(&submission.location) {
        return HttpResponse::BadRequest().body("Unknown location");
    }

    let curr_time = DateTime::now();
    submission.id = None;
    submission.deleted_at = None;
    submission.created_at = Some(curr_time);
    submission.updated_at = Some(curr_time);

    match collection.insert_one(&submission).await {
        Ok(_) => HttpResponse::Ok().json(submission),
        Err(err) => {
            eprintln!("Failed to insert document: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create hotel.")
        }
    }
}

pub async fn update_hotel(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<Hotel>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = CatalogService::hotels_collection(&client);
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let hotel = input.into_inner();
    if !is_known_location(&hotel.location) {
        return HttpResponse::BadRequest().body("Unknown location");
    }

    let update = doc! {
        "$set": {
            "name": &hotel.name,
            "location": &hotel.location,
            "category": hotel.category.clone(),
            "contact": hotel.contact.clone(),
            "updated_at": DateTime::now(),
        }
    };

    match collection.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Hotel not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to update hotel: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update hotel.")
        }
    }
}

/*
    DELETE /api/hotels/{id} - move to trash; rooms and rates stay in place
*/
pub async fn delete_hotel(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = CatalogService::hotels_collection(&client);
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let update = doc! { "$set": { "deleted_at": DateTime::now() } };
    match collection.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Hotel not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to trash hotel: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to trash hotel.")
        }
    }
}

pub async fn restore_hotel(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = CatalogService::hotels_collection(&client);
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let update = doc! { "$set": { "deleted_at": Bson::Null } };
    match collection.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Hotel not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to restore hotel: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to restore hotel.")
        }
    }
}

/*
    DELETE /api/hotels/{id}/purge - permanent delete, cascades to rooms and rates
*/
pub async fn purge_hotel(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let rooms = match CatalogService::rooms_with_rates(&client, id).await {
        Ok(rooms) => rooms,
        Err(err) => {
            eprintln!("Failed to load rooms for purge: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to purge hotel.");
        }
    };
    let room_ids: Vec<ObjectId> = rooms.iter().filter_map(|r| r.base.id).collect();

    if let Err(err) = CatalogService::rates_collection(&client)
        .delete_many(doc! { "room_type_id": { "$in": room_ids } })
        .await
    {
        eprintln!("Failed to delete rates during purge: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to purge hotel.");
    }
    if let Err(err) = CatalogService::rooms_collection(&client)
        .delete_many(doc! { "hotel_id": id })
        .await
    {
        eprintln!("Failed to delete rooms during purge: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to purge hotel.");
    }
    match CatalogService::hotels_collection(&client)
        .delete_one(doc! { "_id": id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => HttpResponse::NotFound().body("Hotel not found"),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to purge hotel: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to purge hotel.")
        }
    }
}
