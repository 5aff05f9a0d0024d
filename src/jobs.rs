use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use log::{error, info};

use crate::api::ApiClient;
use crate::config::PaymentTarget;
use crate::error::ApiError;
use crate::models::{Appointment, BatchReport, Notification};
use crate::reminders::{self, ATTENDANCE_ROUTE, PAYMENT_MESSAGE, PAYMENT_ROUTE};

/// Calendar days covered by one fetch: today and tomorrow.
pub fn fetch_window(now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
    let today = now.date_naive();
    (today, today.succ_opt().unwrap_or(today))
}

async fn fetch_batch(api: &ApiClient, now: DateTime<Utc>) -> Result<Vec<Appointment>, ApiError> {
    let (from, to) = fetch_window(now);
    let appointments = api.fetch_appointments(from, to).await.map_err(|e| {
        error!("Error fetching appointments: {e}");
        e
    })?;
    info!("Current time: {now}");
    info!("Total appointments fetched: {}", appointments.len());
    Ok(appointments)
}

/// Reminds caregivers of visits starting within the hour.
pub async fn remind_nurse_attendance(
    api: &ApiClient,
    now: DateTime<Utc>,
    display_offset: Option<FixedOffset>,
) -> Result<BatchReport, ApiError> {
    info!("Attendance reminder job running...");
    let appointments = fetch_batch(api, now).await?;
    let mut report = BatchReport { fetched: appointments.len(), ..Default::default() };

    for appt in &appointments {
        let Some(reminder) = reminders::attendance_reminder(appt, now, display_offset) else {
            continue;
        };
        report.eligible += 1;
        info!("Appointment {} starts at {}", appt.id, appt.est_date);

        let notification = Notification {
            account_id: reminder.nursing_id,
            content: reminder.content,
            sub_id: Some(appt.id.clone()),
            route: ATTENDANCE_ROUTE.to_string(),
        };
        match api.send_notification(&notification).await {
            Ok(_) => {
                report.sent += 1;
                info!("Notification sent for appointment {} ({} minutes ahead)", appt.id, reminder.minutes_until);
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to notify for appointment {}: {e}", appt.id);
            }
        }
    }

    info!("Attendance reminder job done: {report}");
    Ok(report)
}

/// Reminds patients or their relatives of every unpaid visit that has not
/// started. Runs are not deduplicated, so each run notifies again.
pub async fn inform_service_payment(
    api: &ApiClient,
    now: DateTime<Utc>,
    target: PaymentTarget,
) -> Result<BatchReport, ApiError> {
    info!("Payment reminder job running...");
    let appointments = fetch_batch(api, now).await?;
    let mut report = BatchReport { fetched: appointments.len(), ..Default::default() };

    for appt in appointments.iter().filter(|appt| reminders::payment_due(appt, now)) {
        report.eligible += 1;

        let account_id = match target {
            PaymentTarget::Patient => appt.patient_id.clone(),
            PaymentTarget::Relatives => match api.get_relatives_id(&appt.patient_id).await {
                Ok(id) => id,
                Err(e) => {
                    report.failed += 1;
                    error!("Failed to get relatives-id of patient {}: {e}", appt.patient_id);
                    continue;
                }
            },
        };

        let notification = Notification {
            account_id,
            content: PAYMENT_MESSAGE.to_string(),
            sub_id: Some(appt.id.clone()),
            route: PAYMENT_ROUTE.to_string(),
        };
        match api.send_notification(&notification).await {
            Ok(_) => {
                report.sent += 1;
                info!("Payment reminder sent for appointment {}", appt.id);
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to send payment reminder for appointment {}: {e}", appt.id);
            }
        }
    }

    info!("Payment reminder job done: {report}");
    Ok(report)
}
