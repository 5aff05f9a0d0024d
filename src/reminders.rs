//! Decides which appointments get a reminder and what it says.
//!
//! Everything here is pure: callers pass the current instant so the rules can
//! be exercised at exact boundaries.

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{Appointment, STATUS_UPCOMING};

/// Caregivers are reminded when a visit starts within this many minutes.
pub const ATTENDANCE_WINDOW_MINUTES: i64 = 60;

pub const ATTENDANCE_ROUTE: &str = "/(tabs)/home";
pub const PAYMENT_ROUTE: &str = "/detail-payment";

pub const PAYMENT_MESSAGE: &str = "Nhắc nhở: bạn có một cuộc hẹn đã được lên lịch nhưng chưa thanh toán.\nVui lòng thanh toán để đảm bảo dịch vụ của bạn.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttendanceReminder {
    pub nursing_id: String,
    pub minutes_until: i64,
    pub content: String,
}

/// Whole minutes from `now` until the visit starts, rounded down.
pub fn minutes_until(appt: &Appointment, now: DateTime<Utc>) -> i64 {
    let diff = appt.est_date.with_timezone(&Utc) - now;
    diff.num_seconds().div_euclid(60)
}

/// Reminder for the assigned caregiver when the visit is upcoming and starts
/// in `(0, 60]` minutes.
pub fn attendance_reminder(
    appt: &Appointment,
    now: DateTime<Utc>,
    display_offset: Option<FixedOffset>,
) -> Option<AttendanceReminder> {
    let nursing_id = appt.nursing_id.as_ref()?;
    if appt.status != STATUS_UPCOMING {
        return None;
    }

    let minutes = minutes_until(appt, now);
    if minutes <= 0 || minutes > ATTENDANCE_WINDOW_MINUTES {
        return None;
    }

    Some(AttendanceReminder {
        nursing_id: nursing_id.clone(),
        minutes_until: minutes,
        content: attendance_message(appt, minutes, display_offset),
    })
}

fn attendance_message(appt: &Appointment, minutes: i64, display_offset: Option<FixedOffset>) -> String {
    match display_offset {
        Some(offset) => {
            let local = appt.est_date.with_timezone(&offset);
            format!(
                "Bạn có một cuộc hẹn lúc {} sẽ bắt đầu sau {} phút nữa, hãy lên đường nào!",
                local.format("%H:%M"),
                minutes
            )
        }
        None => format!("Bạn có một cuộc hẹn sẽ bắt đầu sau {minutes} phút nữa, hãy lên đường nào!"),
    }
}

/// Unpaid visits are chased on every run until they start.
pub fn payment_due(appt: &Appointment, now: DateTime<Utc>) -> bool {
    !appt.is_paid && now <= appt.est_date.with_timezone(&Utc)
}
