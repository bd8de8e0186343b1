mod create_invoice;
mod get_invoice;
mod update_invoice_status;

use actix_web::web;
use create_invoice::create_invoice_controller;
use get_invoice::get_invoice_controller;
use update_invoice_status::update_invoice_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/invoices",
        web::post().to(create_invoice_controller),
    );
    cfg.route(
        "/invoices/{invoice_id}",
        web::get().to(get_invoice_controller),
    );
    cfg.route(
        "/invoices/{invoice_id}/status",
        web::put().to(update_invoice_status_controller),
    );
}
