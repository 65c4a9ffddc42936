use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use clap::Parser;
use log::info;

use chess_match_server::config::Args;
use chess_match_server::models::AppState;
use chess_match_server::routes::{configure_routes, PLAY_PATH};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();

    // One match per server process, created in the opening position
    let app_state = web::Data::new(AppState::new());
    app_state.spawn_broadcaster();

    info!(
        "Starting chess match server at ws://{}:{}{}",
        args.host, args.port, PLAY_PATH
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind((args.host, args.port))?
    .run()
    .await
}
