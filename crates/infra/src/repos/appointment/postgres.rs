use super::{IAppointmentRepo, SlotWriteError};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use velora_booking_domain::{Appointment, AppointmentStatus, TimeSpan, ID};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// SQLSTATE for a violated exclusion constraint, raised when an insert or
// update tries to claim a slot range another row already holds.
const EXCLUSION_VIOLATION: &str = "23P01";

fn slot_write_error(e: sqlx::Error) -> SlotWriteError {
    let lost_race = match &e {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(EXCLUSION_VIOLATION),
        _ => false,
    };
    if lost_race {
        SlotWriteError::SlotTaken
    } else {
        SlotWriteError::Storage(e.into())
    }
}

fn status_str(status: &AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Cancelled => "cancelled",
        _ => "upcoming",
    }
}

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    user_id: String,
    venue_uid: Uuid,
    venue_name: String,
    service_name: String,
    employee_uid: Uuid,
    employee_name: String,
    scheduled_at: i64,
    duration_minutes: i64,
    price: f64,
    notes: Option<String>,
    status: String,
    created: i64,
    updated: i64,
}

impl From<AppointmentRaw> for Appointment {
    fn from(e: AppointmentRaw) -> Self {
        Self {
            id: e.appointment_uid.into(),
            user_id: e.user_id,
            venue_id: e.venue_uid.into(),
            venue_name: e.venue_name,
            service_name: e.service_name,
            employee_id: e.employee_uid.into(),
            employee_name: e.employee_name,
            scheduled_at: e.scheduled_at,
            duration_minutes: e.duration_minutes,
            price: e.price,
            notes: e.notes,
            // the column has a check constraint on these two values
            status: match e.status.as_str() {
                "cancelled" => AppointmentStatus::Cancelled,
                _ => AppointmentStatus::Upcoming,
            },
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn book(&self, appointment: &Appointment) -> Result<(), SlotWriteError> {
        sqlx::query(
            r#"
            INSERT INTO appointments(
                appointment_uid,
                user_id,
                venue_uid,
                venue_name,
                service_name,
                employee_uid,
                employee_name,
                scheduled_at,
                duration_minutes,
                price,
                notes,
                status,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(&appointment.user_id)
        .bind(appointment.venue_id.inner_ref())
        .bind(&appointment.venue_name)
        .bind(&appointment.service_name)
        .bind(appointment.employee_id.inner_ref())
        .bind(&appointment.employee_name)
        .bind(appointment.scheduled_at)
        .bind(appointment.duration_minutes)
        .bind(appointment.price)
        .bind(&appointment.notes)
        .bind(status_str(&appointment.status))
        .bind(appointment.created)
        .bind(appointment.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let e = slot_write_error(e);
            if let SlotWriteError::Storage(err) = &e {
                error!(
                    "Unable to insert appointment: {:?}. DB returned error: {:?}",
                    appointment, err
                );
            }
            e
        })?;

        Ok(())
    }

    async fn reschedule(
        &self,
        appointment_id: &ID,
        scheduled_at: i64,
        now: i64,
    ) -> Result<Appointment, SlotWriteError> {
        // the exclusion constraint rejects the update when the new range is
        // taken, and the where clause rejects non-upcoming appointments
        let appointment: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            UPDATE appointments SET
                scheduled_at = $2,
                updated = $3
            WHERE appointment_uid = $1
                AND status = 'upcoming'
                AND scheduled_at + duration_minutes * 60000 > $3
            RETURNING *
            "#,
        )
        .bind(appointment_id.inner_ref())
        .bind(scheduled_at)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            let e = slot_write_error(e);
            if let SlotWriteError::Storage(err) = &e {
                error!(
                    "Unable to reschedule appointment with id: {:?}. DB returned error: {:?}",
                    appointment_id, err
                );
            }
            e
        })?;

        appointment
            .map(|a| a.into())
            .ok_or(SlotWriteError::InvalidState)
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE appointments SET
                notes = $2,
                status = $3,
                updated = $4
            WHERE appointment_uid = $1
            "#,
        )
        .bind(appointment.id.inner_ref())
        .bind(&appointment.notes)
        .bind(status_str(&appointment.status))
        .bind(appointment.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save appointment: {:?}. DB returned error: {:?}",
                appointment, e
            );
            e
        })?;

        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        let appointment: Option<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.appointment_uid = $1
            "#,
        )
        .bind(appointment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find appointment with id: {:?} failed. DB returned error: {:?}",
                appointment_id, e
            );
            e
        })?;

        Ok(appointment.map(|a| a.into()))
    }

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Appointment>> {
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find appointments for user: {} failed. DB returned error: {:?}",
                user_id, e
            );
            e
        })?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    async fn find_by_employees(
        &self,
        employee_ids: &[ID],
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>> {
        let ids: Vec<Uuid> = employee_ids.iter().map(|id| *id.inner_ref()).collect();
        let appointments: Vec<AppointmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM appointments AS a
            WHERE a.employee_uid = ANY($1)
                AND a.status = 'upcoming'
                AND a.scheduled_at < $3
                AND a.scheduled_at + a.duration_minutes * 60000 > $2
            "#,
        )
        .bind(ids)
        .bind(timespan.start())
        .bind(timespan.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find busy appointments for employees: {:?} failed. DB returned error: {:?}",
                employee_ids, e
            );
            e
        })?;

        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }
}
