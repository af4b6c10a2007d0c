//! Weekly digest scheduler.
//!
//! Fixed cadence: Friday 08:00 UTC, mirroring the classic `0 8 * * 5`
//! crontab. The scheduled run and the manual trigger are different callers
//! of the same [`DigestService::run`] path.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use tracing::{error, info};

use crate::digest::DigestService;

const RUN_WEEKDAY: Weekday = Weekday::Fri;
const RUN_HOUR: u32 = 8;

/// Next Friday 08:00 UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let run_time = NaiveTime::from_hms_opt(RUN_HOUR, 0, 0).expect("valid run time");

    let mut day = now.date_naive();
    loop {
        if day.weekday() == RUN_WEEKDAY {
            let candidate = day.and_time(run_time).and_utc();
            if candidate > now {
                return candidate;
            }
        }
        day = day.succ_opt().expect("calendar overflow");
    }
}

/// Spawn the weekly digest loop on the current tokio runtime.
pub fn spawn_weekly(service: Arc<DigestService>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let now = Utc::now();
            let next = next_run_after(now);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            info!(next_run = %next, "weekly digest scheduled");
            tokio::time::sleep(wait).await;

            match service.run().await {
                Ok(outcome) => {
                    info!(flagged = outcome.flagged, sent = outcome.sent, "weekly digest ran");
                }
                Err(e) => error!(error = %e, "weekly digest run failed"),
            }
        }
    })
}
