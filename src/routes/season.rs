use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::season::{SeasonApply, SeasonDelete};
use crate::services::catalog_service::CatalogService;
use crate::services::rate_resolver::RateResolver;
use crate::services::season_service::SeasonService;

/*
    /api/hotels/{id}/seasons - rates grouped by identical validity window
*/
pub async fn get_seasons(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let hotel_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match CatalogService::rooms_with_rates(&client, hotel_id).await {
        Ok(rooms) => HttpResponse::Ok().json(SeasonService::group_into_seasons(&rooms)),
        Err(err) => {
            eprintln!("Failed to load rooms for seasons: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to load seasons.")
        }
    }
}

/*
    POST /api/hotels/{id}/seasons - delete-then-recreate one rate per room
    type for the window, all inside one transaction
*/
pub async fn apply_season(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<SeasonApply>,
) -> impl Responder {
    let client = data.into_inner();
    if ObjectId::parse_str(path.into_inner().as_str()).is_err() {
        return HttpResponse::BadRequest().body("Invalid ID");
    }

    let form = input.into_inner();
    let today = Utc::now().date_naive();
    // Window dates are normalized to start of day; unparseable input falls
    // back to today rather than failing the form.
    let from_day = RateResolver::parse_day_or_today(Some(&form.valid_from), today);
    let to_day = RateResolver::parse_day_or_today(Some(&form.valid_to), today);
    if from_day > to_day {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "validFrom must not be after validTo",
        }));
    }

    let from = SeasonService::day_to_bson(from_day);
    let to = SeasonService::day_to_bson(to_day);
    let booking_valid_until = form
        .booking_valid_until
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| SeasonService::day_to_bson(RateResolver::parse_day_or_today(Some(s), today)));

    match SeasonService::apply_season(&client, from, to, booking_valid_until, &form.rates).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to apply season: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": err.to_string(),
            }))
        }
    }
}

/*
    DELETE /api/hotels/{id}/seasons - best-effort delete of every rate under
    the window, one independent delete per room type. A reported failure may
    still have deleted some room types; the caller re-runs the delete.
*/
pub async fn delete_season(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<SeasonDelete>,
) -> impl Responder {
    let client = data.into_inner();
    let hotel_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let form = input.into_inner();
    let today = Utc::now().date_naive();
    let from = SeasonService::day_to_bson(RateResolver::parse_day_or_today(
        Some(&form.valid_from),
        today,
    ));
    let to = SeasonService::day_to_bson(RateResolver::parse_day_or_today(
        Some(&form.valid_to),
        today,
    ));

    let rooms = match CatalogService::rooms_with_rates(&client, hotel_id).await {
        Ok(rooms) => rooms,
        Err(err) => {
            eprintln!("Failed to load rooms for season delete: {:?}", err);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Failed to load room types",
            }));
        }
    };
    let room_ids: Vec<ObjectId> = rooms.iter().filter_map(|r| r.base.id).collect();

    let (success, results) = SeasonService::delete_season(&client, from, to, &room_ids).await;
    HttpResponse::Ok().json(serde_json::json!({
        "success": success,
        "results": results,
    }))
}

/*
    DELETE /api/rates/{id} - remove a single seasonal rate
*/
pub async fn delete_rate(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match CatalogService::rates_collection(&client)
        .delete_one(doc! { "_id": id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => HttpResponse::NotFound().body("Rate not found"),
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to delete rate: {:?}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": err.to_string(),
            }))
        }
    }
}
