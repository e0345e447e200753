use actix_web::{web, HttpResponse, Responder};
use bson::oid::ObjectId;
use chrono::Utc;
use mongodb::Client;
use std::sync::Arc;

use crate::models::calculator::CostSheet;
use crate::services::catalog_service::CatalogService;
use crate::services::cost_service::CostService;

/*
    POST /api/quotes/price

    Reprices every non-custom hotel line against the catalog and returns the
    sheet with category totals. The client calls this whenever a line's room
    type, meal plan or travel date changes; resolved rates overwrite whatever
    was on the line before.
*/
pub async fn price_quote(
    data: web::Data<Arc<Client>>,
    input: web::Json<CostSheet>,
) -> impl Responder {
    let client = data.into_inner();
    let mut sheet = input.into_inner();

    let room_ids: Vec<ObjectId> = sheet
        .hotels
        .iter()
        .filter(|item| !item.is_custom)
        .filter_map(|item| item.room_type_id)
        .collect();

    let rooms = match CatalogService::rooms_by_ids(&client, &room_ids).await {
        Ok(rooms) => rooms,
        Err(err) => {
            eprintln!("Failed to load rooms for quote: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to price quote.");
        }
    };

    let today = Utc::now().date_naive();
    CostService::reprice_sheet(&mut sheet, &rooms, today);
    HttpResponse::Ok().json(CostService::breakdown(sheet))
}
