use actix_web::{web, HttpResponse, Responder};

use crate::models::AppState;

/// Path every player connects to.
pub const PLAY_PATH: &str = "/play";

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Chess match server: connect a websocket to /play")
}

/// Current snapshot, same shape as the broadcast payload.
pub async fn get_state(app_state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(app_state.controller.snapshot())
}

/// Starts a new match without dropping either player.
pub async fn reset_game(app_state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(app_state.controller.reset())
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(PLAY_PATH).route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/state").route(web::get().to(get_state)))
        .service(web::resource("/reset").route(web::post().to(reset_game)))
        .service(web::resource("/").route(web::get().to(index)));
}
