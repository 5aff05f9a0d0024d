use actix_web::{get, web, HttpResponse, Responder};
use log::info;

use crate::types::SharedStatuses;

/// Liveness probe that also reports the last outcome of every job.
#[get("/health")]
pub async fn health(statuses: web::Data<SharedStatuses>) -> impl Responder {
    info!("Health check");
    let statuses = statuses.read().await;
    HttpResponse::Ok().json(&*statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BatchReport, JobStatus};
    use actix_web::{test, App};
    use serde_json::Value;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    #[actix_web::test]
    async fn health_lists_job_statuses() {
        let statuses: SharedStatuses = Arc::new(RwLock::new(Default::default()));
        statuses.write().await.insert(
            "attendance-reminder",
            JobStatus {
                runs: 3,
                last_report: Some(BatchReport { fetched: 5, eligible: 1, sent: 1, failed: 0 }),
                ..Default::default()
            },
        );

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::clone(&statuses)))
                .service(health),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["attendance-reminder"]["runs"], 3);
        assert_eq!(body["attendance-reminder"]["last-report"]["sent"], 1);
        assert!(body["attendance-reminder"]["last-error"].is_null());
    }
}
