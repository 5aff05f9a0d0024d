use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::{debug, error, info};
use std::future::Future;
use tokio::time::MissedTickBehavior;

use crate::error::ApiError;
use crate::models::BatchReport;
use crate::types::SharedStatuses;

/// Runs `task` right away and then every `period`.
///
/// The task is awaited inside the loop, so a slow firing delays the next one
/// instead of overlapping it. Ticks missed meanwhile are skipped.
pub async fn run_every<F, Fut>(job: &'static str, period: std::time::Duration, statuses: SharedStatuses, task: F)
where
    F: Fn(DateTime<Utc>) -> Fut,
    Fut: Future<Output = Result<BatchReport, ApiError>>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!("{job} scheduled every {} minutes", period.as_secs() / 60);

    loop {
        ticker.tick().await;
        fire(job, &statuses, &task).await;
    }
}

/// Runs `task` once a day at `at` (UTC).
pub async fn run_daily_at<F, Fut>(job: &'static str, at: NaiveTime, statuses: SharedStatuses, task: F)
where
    F: Fn(DateTime<Utc>) -> Fut,
    Fut: Future<Output = Result<BatchReport, ApiError>>,
{
    info!("{job} scheduled daily at {} UTC", at.format("%H:%M"));
    let mut after = Utc::now();

    loop {
        let now = Utc::now();
        let next = next_daily_fire(after.max(now), at);
        let wait = (next - now).to_std().unwrap_or_default();
        debug!("timing_loop:: {job} waiting for {:?} until {next}", wait);

        tokio::time::sleep(wait).await;
        fire(job, &statuses, &task).await;
        after = next;
    }
}

/// First instant strictly after `now` whose UTC wall-clock time is `at`.
pub fn next_daily_fire(now: DateTime<Utc>, at: NaiveTime) -> DateTime<Utc> {
    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

async fn fire<F, Fut>(job: &'static str, statuses: &SharedStatuses, task: &F)
where
    F: Fn(DateTime<Utc>) -> Fut,
    Fut: Future<Output = Result<BatchReport, ApiError>>,
{
    let started = Utc::now();
    {
        let mut map = statuses.write().await;
        let status = map.entry(job).or_default();
        status.runs += 1;
        status.last_started_at = Some(started);
    }

    let result = task(started).await;

    let mut map = statuses.write().await;
    let status = map.entry(job).or_default();
    status.last_finished_at = Some(Utc::now());
    match result {
        Ok(report) => {
            status.last_report = Some(report);
            status.last_error = None;
        }
        Err(e) => {
            error!("{job} aborted: {e}");
            status.last_error = Some(e.to_string());
        }
    }
    info!("===============================================================");
}
