use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use mongodb::bson::DateTime;
use mongodb::Client;
use std::sync::Arc;

use crate::models::room::RoomType;
use crate::services::catalog_service::CatalogService;

/*
    /api/hotels/{id}/rooms - room types with their seasonal rates attached
*/
pub async fn get_rooms(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let hotel_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match CatalogService::rooms_with_rates(&client, hotel_id).await {
        Ok(rooms) => HttpResponse::Ok().json(rooms),
        Err(err) => {
            eprintln!("Failed to find rooms: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find rooms.")
        }
    }
}

pub async fn add_room(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<RoomType>,
) -> impl Responder {
    let client = data.into_inner();
    let hotel_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let mut submission = input.into_inner();
    if submission.name.trim().is_empty() {
        return HttpResponse::BadRequest().body("Room type name is required");
    }

    let curr_time = DateTime::now();
    submission.id = None;
    submission.hotel_id = hotel_id;
    submission.created_at = Some(curr_time);
    submission.updated_at = Some(curr_time);

    match CatalogService::rooms_collection(&client)
        .insert_one(&submission)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(submission),
        Err(err) => {
            eprintln!("Failed to insert room type: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create room type.")
        }
    }
}

pub async fn update_room(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<RoomType>,
) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let room = input.into_inner();
    let update = doc! {
        "$set": {
            "name": &room.name,
            "price_ep": room.price_ep,
            "price_cp": room.price_cp,
            "price_map": room.price_map,
            "price_ap": room.price_ap,
            "extra_bed_ep": room.extra_bed_ep,
            "extra_bed_cp": room.extra_bed_cp,
            "extra_bed_map": room.extra_bed_map,
            "extra_bed_ap": room.extra_bed_ap,
            "base_rate": room.base_rate,
            "extra_bed": room.extra_bed,
            "updated_at": DateTime::now(),
        }
    };

    match CatalogService::rooms_collection(&client)
        .update_one(doc! { "_id": id }, update)
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Room type not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to update room type: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update room type.")
        }
    }
}

/*
    DELETE /api/rooms/{id} - removes the room type and all its seasonal rates
*/
pub async fn delete_room(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    if let Err(err) = CatalogService::rates_collection(&client)
        .delete_many(doc! { "room_type_id": id })
        .await
    {
        eprintln!("Failed to delete rates for room type: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to delete room type.");
    }

    match CatalogService::rooms_collection(&client)
        .delete_one(doc! { "_id": id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => {
            HttpResponse::NotFound().body("Room type not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to delete room type: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete room type.")
        }
    }
}
