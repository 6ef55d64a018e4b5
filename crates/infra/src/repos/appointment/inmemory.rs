use super::{IAppointmentRepo, SlotWriteError};
use std::sync::Mutex;
use velora_booking_domain::{Appointment, AppointmentStatus, TimeSpan, ID};

pub struct InMemoryAppointmentRepo {
    appointments: Mutex<Vec<Appointment>>,
}

impl InMemoryAppointmentRepo {
    pub fn new() -> Self {
        Self {
            appointments: Mutex::new(vec![]),
        }
    }
}

fn holds_slot(appointment: &Appointment, employee_id: &ID, slot: &TimeSpan) -> bool {
    appointment.employee_id == *employee_id
        && appointment.status == AppointmentStatus::Upcoming
        && appointment.timespan().overlaps(slot)
}

#[async_trait::async_trait]
impl IAppointmentRepo for InMemoryAppointmentRepo {
    async fn book(&self, appointment: &Appointment) -> Result<(), SlotWriteError> {
        // check and insert under one lock so racing bookers serialize
        let mut appointments = self.appointments.lock().unwrap();
        let wanted = appointment.timespan();
        let taken = appointments
            .iter()
            .any(|existing| holds_slot(existing, &appointment.employee_id, &wanted));
        if taken {
            return Err(SlotWriteError::SlotTaken);
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn reschedule(
        &self,
        appointment_id: &ID,
        scheduled_at: i64,
        now: i64,
    ) -> Result<Appointment, SlotWriteError> {
        let mut appointments = self.appointments.lock().unwrap();
        let index = match appointments.iter().position(|a| a.id == *appointment_id) {
            Some(index) => index,
            None => return Err(SlotWriteError::InvalidState),
        };
        let current = appointments[index].clone();
        if current.status != AppointmentStatus::Upcoming || current.is_past(now) {
            return Err(SlotWriteError::InvalidState);
        }

        let wanted = TimeSpan::new(
            scheduled_at,
            scheduled_at + current.duration_minutes * 60 * 1000,
        );
        let taken = appointments.iter().any(|existing| {
            existing.id != *appointment_id && holds_slot(existing, &current.employee_id, &wanted)
        });
        if taken {
            return Err(SlotWriteError::SlotTaken);
        }

        let appointment = &mut appointments[index];
        appointment.scheduled_at = scheduled_at;
        appointment.updated = now;
        Ok(appointment.clone())
    }

    async fn save(&self, appointment: &Appointment) -> anyhow::Result<()> {
        crate::repos::shared::inmemory_repo::save(appointment, &self.appointments);
        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> anyhow::Result<Option<Appointment>> {
        Ok(crate::repos::shared::inmemory_repo::find(
            appointment_id,
            &self.appointments,
        ))
    }

    async fn find_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Appointment>> {
        Ok(crate::repos::shared::inmemory_repo::find_by(
            &self.appointments,
            |a| a.user_id == user_id,
        ))
    }

    async fn find_by_employees(
        &self,
        employee_ids: &[ID],
        timespan: &TimeSpan,
    ) -> anyhow::Result<Vec<Appointment>> {
        Ok(crate::repos::shared::inmemory_repo::find_by(
            &self.appointments,
            |a| {
                employee_ids.contains(&a.employee_id)
                    && a.status == AppointmentStatus::Upcoming
                    && a.timespan().overlaps(timespan)
            },
        ))
    }
}
