use chrono::NaiveDate;
use log::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Appointment, AppointmentResponse, Notification, RelativesIdResponse};
use crate::util::get_short_id;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// HTTP client for the appointment, patient and notification services.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<ApiClient, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(ApiClient {
            client,
            base_url: config.base_api_url.clone(),
        })
    }

    /// Appointments whose estimated date falls between `from` and `to`, inclusive.
    pub async fn fetch_appointments(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>, ApiError> {
        let url = format!("{}/appointment/api/v1/appointments", self.base_url);
        let from = from.format(DATE_FORMAT).to_string();
        let to = to.format(DATE_FORMAT).to_string();
        debug!("fetch_appointments:: {url} from {from} to {to}");

        let res = self.client.get(url)
            .query(&[
                ("est-date-from", from.as_str()),
                ("est-date-to", to.as_str()),
                ("apply-paging", "false"),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ApiError::Status(res.status()));
        }
        let body: AppointmentResponse = res.json().await?;
        Ok(body.data)
    }

    /// Contact account that receives reminders on behalf of `patient_id`.
    pub async fn get_relatives_id(&self, patient_id: &str) -> Result<String, ApiError> {
        let url = format!("{}/patient/api/v1/patients/{}/relatives-id", self.base_url, patient_id);
        debug!("get_relatives_id:: patient ...{}", get_short_id(patient_id));

        let body: RelativesIdResponse = self.client.get(url).send().await?.json().await?;
        match body.data {
            Some(data) if body.success => Ok(data.relatives_id),
            _ => Err(ApiError::Unsuccessful(patient_id.to_string())),
        }
    }

    pub async fn send_notification(&self, notification: &Notification) -> Result<(), ApiError> {
        let url = format!("{}/notification/external/rpc/notifications", self.base_url);

        let res = self.client.post(url).json(notification).send().await?;
        let status = res.status();
        if status.as_u16() >= 300 {
            let body = res.text().await.unwrap_or_default();
            debug!("send_notification:: status={status} body={body}");
            return Err(ApiError::Status(status));
        }
        Ok(())
    }
}
