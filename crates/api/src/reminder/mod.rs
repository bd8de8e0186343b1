mod get_invoice_reminders;
mod get_reminder_decision;
mod send_payment_reminders;

use actix_web::web;
use get_invoice_reminders::get_invoice_reminders_controller;
use get_reminder_decision::get_reminder_decision_controller;
use send_payment_reminders::send_payment_reminders_controller;
pub use send_payment_reminders::run_reminder_campaign;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/invoices/{invoice_id}/reminders",
        web::get().to(get_invoice_reminders_controller),
    );
    cfg.route(
        "/invoices/{invoice_id}/reminders/decision",
        web::get().to(get_reminder_decision_controller),
    );
    cfg.route(
        "/reminders/send",
        web::post().to(send_payment_reminders_controller),
    );
}
