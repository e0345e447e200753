use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::bson::DateTime;
use mongodb::Client;
use std::sync::Arc;

use crate::models::enquiry::{Enquiry, ENQUIRY_STATUSES};

fn enquiries_collection(client: &Client) -> mongodb::Collection<Enquiry> {
    client.database("Office").collection("Enquiries")
}

/*
    POST /api/enquiries - public lead-capture endpoint
*/
pub async fn create_enquiry(
    data: web::Data<Arc<Client>>,
    input: web::Json<Enquiry>,
) -> impl Responder {
    let client = data.into_inner();

    let mut submission = input.into_inner();
    if submission.name.trim().is_empty() || submission.email.trim().is_empty() {
        return HttpResponse::BadRequest().body("Name and email are required");
    }

    let curr_time = DateTime::now();
    submission.id = None;
    submission.status = "new".to_string();
    submission.created_at = Some(curr_time);
    submission.updated_at = Some(curr_time);

    match enquiries_collection(&client).insert_one(&submission).await {
        Ok(_) => HttpResponse::Ok().json(submission),
        Err(err) => {
            eprintln!("Failed to insert enquiry: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to submit enquiry.")
        }
    }
}

#[derive(serde::Deserialize)]
pub struct QueryParams {
    status: Option<String>,
}

/*
    /api/enquiries?status= - inbox listing, newest first
*/
pub async fn get_enquiries(
    data: web::Data<Arc<Client>>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let client = data.into_inner();

    let filter = match &params.status {
        Some(status) if !status.is_empty() => doc! { "status": status },
        _ => doc! {},
    };
    let cursor = enquiries_collection(&client)
        .find(filter)
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Enquiry>>().await {
            Ok(enquiries) => HttpResponse::Ok().json(enquiries),
            Err(err) => {
                eprintln!("Failed to collect enquiries: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect enquiries.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find enquiries: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find enquiries.")
        }
    }
}

#[derive(serde::Deserialize)]
pub struct StatusUpdate {
    status: String,
}

pub async fn update_enquiry_status(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<StatusUpdate>,
) -> impl Responder {
    let client = data.into_inner();
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let status = input.into_inner().status;
    if !ENQUIRY_STATUSES.contains(&status.as_str()) {
        return HttpResponse::BadRequest().body("Unknown status");
    }

    let update = doc! { "$set": { "status": &status, "updated_at": DateTime::now() } };
    match enquiries_collection(&client)
        .update_one(doc! { "_id": id }, update)
        .await
    {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Enquiry not found")
        }
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to update enquiry: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update enquiry.")
        }
    }
}
