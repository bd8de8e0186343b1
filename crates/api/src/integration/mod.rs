mod connect_gmail;
mod disconnect_gmail;

use actix_web::web;
use connect_gmail::connect_gmail_controller;
use disconnect_gmail::disconnect_gmail_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/integrations/gmail",
        web::post().to(connect_gmail_controller),
    );
    cfg.route(
        "/user/{user_id}/integrations/gmail",
        web::delete().to(disconnect_gmail_controller),
    );
}
