use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use valleytrips_api::{db, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/hotels")
                            .route("", web::get().to(routes::hotel::get_hotels))
                            .route("", web::post().to(routes::hotel::create_hotel))
                            .route("/{id}", web::get().to(routes::hotel::get_hotel))
                            .route("/{id}", web::put().to(routes::hotel::update_hotel))
                            .route("/{id}", web::delete().to(routes::hotel::delete_hotel))
                            .route("/{id}/restore", web::put().to(routes::hotel::restore_hotel))
                            .route("/{id}/purge", web::delete().to(routes::hotel::purge_hotel))
                            .route("/{id}/rooms", web::get().to(routes::room::get_rooms))
                            .route("/{id}/rooms", web::post().to(routes::room::add_room))
                            .route("/{id}/seasons", web::get().to(routes::season::get_seasons))
                            .route("/{id}/seasons", web::post().to(routes::season::apply_season))
                            .route(
                                "/{id}/seasons",
                                web::delete().to(routes::season::delete_season),
                            ),
                    )
                    .service(
                        web::scope("/rooms")
                            .route("/{id}", web::put().to(routes::room::update_room))
                            .route("/{id}", web::delete().to(routes::room::delete_room)),
                    )
                    .route("/rates/{id}", web::delete().to(routes::season::delete_rate))
                    .route("/quotes/price", web::post().to(routes::quote::price_quote))
                    .service(
                        web::scope("/enquiries")
                            .route("", web::post().to(routes::enquiry::create_enquiry))
                            .route("", web::get().to(routes::enquiry::get_enquiries))
                            .route(
                                "/{id}/status",
                                web::put().to(routes::enquiry::update_enquiry_status),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
