use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status value that marks an appointment as not yet started.
pub const STATUS_UPCOMING: &str = "upcoming";

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct Appointment {
    pub id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default, rename = "svcpackage-id")]
    pub svc_package_id: String,
    #[serde(default, rename = "cuspackage-id")]
    pub cus_package_id: String,
    /// Assigned caregiver; `None` while the visit is unassigned.
    #[serde(default)]
    pub nursing_id: Option<String>,
    pub patient_id: String,
    #[serde(default)]
    pub patient_address: String,
    #[serde(default)]
    pub patient_lat_lng: String,
    pub est_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub act_date: Option<String>,
    pub status: String,
    pub is_paid: bool,
    #[serde(default)]
    pub total_est_duration: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize, Debug)]
pub struct AppointmentResponse {
    pub data: Vec<Appointment>,
}

#[derive(Deserialize, Debug)]
pub struct RelativesIdResponse {
    #[serde(default)]
    pub data: Option<RelativesId>,
    #[serde(default)]
    pub success: bool,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
pub struct RelativesId {
    pub relatives_id: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Notification {
    pub account_id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_id: Option<String>,
    pub route: String,
}

/// Counts for one firing of a reminder job.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub fetched: usize,
    pub eligible: usize,
    pub sent: usize,
    pub failed: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetched={} eligible={} sent={} failed={}",
            self.fetched, self.eligible, self.sent, self.failed
        )
    }
}

#[derive(Serialize, Clone, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct JobStatus {
    pub runs: u64,
    pub last_started_at: Option<DateTime<Utc>>,
    pub last_finished_at: Option<DateTime<Utc>>,
    pub last_report: Option<BatchReport>,
    pub last_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn appointment_decodes_from_wire_format() {
        let raw = json!({
            "id": "a-1",
            "service-id": "s-1",
            "svcpackage-id": "sp-1",
            "cuspackage-id": "cp-1",
            "nursing-id": null,
            "patient-id": "p-1",
            "patient-address": "12 Le Loi",
            "patient-lat-lng": "10.77,106.70",
            "est-date": "2026-10-19T09:30:00+07:00",
            "act-date": null,
            "status": "upcoming",
            "is-paid": false,
            "total-est-duration": 90,
            "created-at": "2026-10-01T08:00:00Z"
        });
        let appt: Appointment = serde_json::from_value(raw).unwrap();
        assert_eq!(appt.nursing_id, None);
        assert_eq!(appt.svc_package_id, "sp-1");
        assert_eq!(appt.est_date.with_timezone(&Utc).to_rfc3339(), "2026-10-19T02:30:00+00:00");
        assert_eq!(appt.total_est_duration, 90);
    }

    #[test]
    fn appointment_requires_est_date() {
        let raw = json!({"id": "a-1", "patient-id": "p-1", "status": "upcoming", "is-paid": true});
        assert!(serde_json::from_value::<Appointment>(raw).is_err());
    }

    #[test]
    fn notification_omits_missing_sub_id() {
        let notification = Notification {
            account_id: "n-1".to_string(),
            content: "hi".to_string(),
            sub_id: None,
            route: "/(tabs)/home".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&notification).unwrap(),
            json!({"account-id": "n-1", "content": "hi", "route": "/(tabs)/home"})
        );
    }

    #[test]
    fn unsuccessful_lookup_may_omit_data() {
        let res: RelativesIdResponse = serde_json::from_value(json!({"success": false, "data": null})).unwrap();
        assert!(!res.success);
        assert!(res.data.is_none());
    }
}
