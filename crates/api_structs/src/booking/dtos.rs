use serde::{Deserialize, Serialize};
use velora_booking_domain::{Appointment, AppointmentStatus, TimeSlot, ID};

/// Wire shape of an `Appointment`. The status field carries the effective
/// status at response time, so a stored-upcoming appointment whose end has
/// passed renders as completed.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDTO {
    pub id: ID,
    pub user_id: String,
    pub venue_id: ID,
    pub venue_name: String,
    pub service_name: String,
    pub employee_id: ID,
    pub employee_name: String,
    pub scheduled_at: i64,
    pub duration_minutes: i64,
    pub price: f64,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created: i64,
    pub updated: i64,
}

impl AppointmentDTO {
    pub fn new(appointment: Appointment, now: i64) -> Self {
        Self {
            id: appointment.id.clone(),
            user_id: appointment.user_id.clone(),
            venue_id: appointment.venue_id.clone(),
            venue_name: appointment.venue_name.clone(),
            service_name: appointment.service_name.clone(),
            employee_id: appointment.employee_id.clone(),
            employee_name: appointment.employee_name.clone(),
            scheduled_at: appointment.scheduled_at,
            duration_minutes: appointment.duration_minutes,
            price: appointment.price,
            notes: appointment.notes.clone(),
            status: appointment.status_at(now),
            created: appointment.created,
            updated: appointment.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotDTO {
    pub start_ts: i64,
    pub duration: i64,
    pub available: bool,
    pub employee_ids: Vec<ID>,
}

impl TimeSlotDTO {
    pub fn new(slot: TimeSlot) -> Self {
        Self {
            start_ts: slot.start_ts,
            duration: slot.duration,
            available: slot.available,
            employee_ids: slot.employee_ids,
        }
    }
}
