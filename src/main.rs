// A small service that polls the home-care scheduling API and sends reminder
// notifications: to caregivers shortly before a visit, and to patients or
// their relatives about visits that are still unpaid.
mod api;
mod config;
mod error;
mod jobs;
mod models;
mod reminders;
mod routes;
mod timing;
mod types;
mod util;

use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{info, warn};
use std::{collections::HashMap, process::exit, sync::Arc};
use tokio::sync::RwLock;

use api::ApiClient;
use config::Config;
use routes::health;
use types::{JobStatusMap, SharedStatuses};

pub const LOG_CONFIG_PATH: &str = "log4rs.yaml";

const ATTENDANCE_JOB: &str = "attendance-reminder";
const PAYMENT_JOBS: [&str; 2] = ["payment-reminder-1", "payment-reminder-2"];

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    util::init_logging();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            if let Some(hint) = config::missing_vars_hint(&e) {
                eprintln!("{hint}");
            }
            exit(1)
        }
    };
    for notice in &config.notices {
        warn!("{notice}");
    }
    info!("Starting reminder service against {}", config.base_api_url);

    let api = match ApiClient::new(&config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("Failed to build HTTP client: {e}");
            exit(1)
        }
    };

    let job_statuses: JobStatusMap = HashMap::new();
    let statuses: SharedStatuses = Arc::new(RwLock::new(job_statuses));

    let attendance_handle = {
        let api = Arc::clone(&api);
        let display_offset = config.display_offset;
        tokio::spawn(timing::run_every(ATTENDANCE_JOB, config.remind_interval, Arc::clone(&statuses), move |now| {
            let api = Arc::clone(&api);
            async move { jobs::remind_nurse_attendance(&api, now, display_offset).await }
        }))
    };

    let payment_handles: Vec<_> = PAYMENT_JOBS
        .into_iter()
        .zip(config.payment_times)
        .map(|(job, at)| {
            let api = Arc::clone(&api);
            let target = config.payment_target;
            tokio::spawn(timing::run_daily_at(job, at, Arc::clone(&statuses), move |now| {
                let api = Arc::clone(&api);
                async move { jobs::inform_service_payment(&api, now, target).await }
            }))
        })
        .collect();

    let status_data = Data::new(Arc::clone(&statuses));
    let server_handle = HttpServer::new(move || {
        App::new()
            .app_data(Data::clone(&status_data))
            .service(health)
    })
        .bind(format!("{}:{}", config.host, config.port))?
        .run();

    tokio::select! {
        res = server_handle => res?,
        _ = attendance_handle => {},
        _ = join_payment_loops(payment_handles) => {},
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}

/// Resolves once every payment loop has exited.
async fn join_payment_loops(handles: Vec<tokio::task::JoinHandle<()>>) {
    for handle in handles {
        handle.await.ok();
    }
}
