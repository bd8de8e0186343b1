use crate::reminder::run_reminder_campaign;
use actix_web::rt::time::{interval_at, Instant};
use invoice_reminders_infra::ReminderContext;
use std::time::Duration;
use tracing::{error, info};

const SECS_IN_DAY: i64 = 24 * 60 * 60;

/// Seconds from `now_ts` (millis) until the next time the clock reads `hour_utc`:00 UTC
pub fn get_start_delay(now_ts: i64, hour_utc: u32) -> u64 {
    let secs_into_day = (now_ts / 1000).rem_euclid(SECS_IN_DAY);
    let target = i64::from(hour_utc) * 60 * 60;
    (target - secs_into_day).rem_euclid(SECS_IN_DAY) as u64
}

/// Runs the reminder campaign once a day at the configured hour
pub fn start_send_reminders_job(ctx: ReminderContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now, ctx.config.reminder_job.hour_utc);
        info!(
            "Reminder campaign scheduled daily at {}:00 UTC, next run in {} seconds",
            ctx.config.reminder_job.hour_utc, secs_to_next_run
        );

        let start = Instant::now() + Duration::from_secs(secs_to_next_run);
        let mut daily_interval = interval_at(start, Duration::from_secs(SECS_IN_DAY as u64));
        loop {
            daily_interval.tick().await;
            if let Err(e) = run_reminder_campaign(&ctx).await {
                error!("Scheduled reminder campaign failed: {:?}", e);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 60 * 60 * 1000;

    #[test]
    fn start_delay_works() {
        // Midnight of 1970-01-01 UTC
        assert_eq!(get_start_delay(0, 9), 9 * 60 * 60);
        assert_eq!(get_start_delay(8 * HOUR, 9), 60 * 60);
        assert_eq!(get_start_delay(9 * HOUR, 9), 0);
        assert_eq!(get_start_delay(9 * HOUR + 1000, 9), 24 * 60 * 60 - 1);
        assert_eq!(get_start_delay(23 * HOUR, 0), 60 * 60);
        assert_eq!(get_start_delay(10 * 24 * HOUR + 30 * 60 * 1000, 1), 30 * 60);
    }
}
