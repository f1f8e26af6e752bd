//! The canonical appointment set.
//!
//! The store owns every booking and enforces the single hard invariant of the
//! engine: at most one appointment per (date, time) pair. All other components
//! receive read-only views or go through the mutation methods here.

use crate::domain::appointment::{Appointment, AppointmentId};
use crate::errors::ScheduleError;
use crate::phone::{self, MatchTier};
use crate::slots;

/// Outcome of a cancellation query after phone matching and hint narrowing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Nothing survived narrowing; the query is echoed back (with the
    /// normalized phone) for diagnosis.
    NotFound {
        phone_query: String,
        normalized_phone: String,
        name_hint: Option<String>,
        date_hint: Option<String>,
        time_hint: Option<String>,
    },
    /// More than one survivor and neither date nor time was supplied.
    /// Deletion is deferred; the candidates are returned for disambiguation.
    Ambiguous { tier: MatchTier, candidates: Vec<Appointment> },
    /// Exactly one candidate (or a date/time hint broke the tie); the
    /// appointment has been removed.
    Cancelled { tier: MatchTier, appointment: Appointment },
}

/// Requested field replacements for an edit. Absent fields keep their
/// current values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditChanges {
    pub date: Option<String>,
    pub time: Option<String>,
    pub service: Option<String>,
    pub technician: Option<String>,
    pub customer_name: Option<String>,
}

/// Before/after snapshots of a successful in-place edit, with a
/// human-readable description of each changed field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSuccess {
    pub before: Appointment,
    pub after: Appointment,
    pub changes: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an initial dataset, e.g. [`crate::seed`] output.
    pub fn with_appointments(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    fn next_id(&self) -> AppointmentId {
        let max = self.appointments.iter().map(|a| a.id.0).max().unwrap_or(0);
        AppointmentId(max + 1)
    }

    /// Books a slot. Fails with `Conflict` when (date, time) is occupied;
    /// never overwrites.
    pub fn book(
        &mut self,
        date: &str,
        time: &str,
        customer_name: &str,
        phone_number: &str,
        service: &str,
        technician: Option<String>,
    ) -> Result<Appointment, ScheduleError> {
        if slots::is_booked(&self.appointments, date, time) {
            return Err(ScheduleError::Conflict { date: date.to_owned(), time: time.to_owned() });
        }
        let appointment = Appointment {
            id: self.next_id(),
            date: date.to_owned(),
            time: time.to_owned(),
            customer_name: customer_name.to_owned(),
            phone_number: phone_number.to_owned(),
            service: service.to_owned(),
            technician,
        };
        self.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Cancels by phone identity, progressively narrowed by optional
    /// case-insensitive name substring, date, and time hints.
    ///
    /// With several survivors and a date or time hint present, the
    /// earliest-inserted survivor is chosen; without either hint the call
    /// defers and reports the candidates instead.
    pub fn cancel(
        &mut self,
        phone_query: &str,
        name_hint: Option<&str>,
        date_hint: Option<&str>,
        time_hint: Option<&str>,
    ) -> CancelOutcome {
        let matched = phone::find_candidates(&self.appointments, phone_query);
        let tier = matched.tier;

        let mut survivors: Vec<&Appointment> = matched.appointments;
        if let Some(name) = name_hint {
            let needle = name.to_lowercase();
            survivors.retain(|a| a.customer_name.to_lowercase().contains(&needle));
        }
        if let Some(date) = date_hint {
            survivors.retain(|a| a.date == date);
        }
        if let Some(time) = time_hint {
            survivors.retain(|a| a.time == time);
        }

        if survivors.is_empty() {
            return CancelOutcome::NotFound {
                phone_query: phone_query.to_owned(),
                normalized_phone: phone::normalize(phone_query),
                name_hint: name_hint.map(str::to_owned),
                date_hint: date_hint.map(str::to_owned),
                time_hint: time_hint.map(str::to_owned),
            };
        }

        if survivors.len() > 1 && date_hint.is_none() && time_hint.is_none() {
            let candidates = survivors.into_iter().cloned().collect();
            return CancelOutcome::Ambiguous { tier, candidates };
        }

        // Store order is insertion order, so the first survivor is the
        // earliest-inserted one.
        let chosen = survivors[0].id;
        let position = self
            .appointments
            .iter()
            .position(|a| a.id == chosen)
            .expect("survivor came from this store");
        let appointment = self.appointments.remove(position);
        CancelOutcome::Cancelled { tier, appointment }
    }

    /// Edits the single appointment with exactly-equal normalized phone and
    /// exact original date/time. Only the phone is fuzzy here; the slot
    /// coordinates must match verbatim.
    pub fn edit(
        &mut self,
        phone_query: &str,
        original_date: &str,
        original_time: &str,
        changes: EditChanges,
    ) -> Result<EditSuccess, ScheduleError> {
        let normalized_query = phone::normalize(phone_query);
        let position = self
            .appointments
            .iter()
            .position(|a| {
                phone::normalize(&a.phone_number) == normalized_query
                    && a.date == original_date
                    && a.time == original_time
            })
            .ok_or_else(|| {
                ScheduleError::NotFound(format!(
                    "no appointment for {phone_query} on {original_date} at {original_time}"
                ))
            })?;

        let before = self.appointments[position].clone();
        let new_date = changes.date.unwrap_or_else(|| before.date.clone());
        let new_time = changes.time.unwrap_or_else(|| before.time.clone());
        let new_service = changes.service.unwrap_or_else(|| before.service.clone());
        let new_customer_name =
            changes.customer_name.unwrap_or_else(|| before.customer_name.clone());
        let new_technician = changes.technician.or_else(|| before.technician.clone());

        if new_date == before.date
            && new_time == before.time
            && new_service == before.service
            && new_customer_name == before.customer_name
            && new_technician == before.technician
        {
            return Err(ScheduleError::NoChange);
        }

        if new_date != before.date || new_time != before.time {
            let occupied = self
                .appointments
                .iter()
                .enumerate()
                .any(|(i, a)| i != position && a.occupies(&new_date, &new_time));
            if occupied {
                return Err(ScheduleError::Conflict { date: new_date, time: new_time });
            }
        }

        let mut changed = Vec::new();
        if new_date != before.date {
            changed.push(format!("date: {} -> {}", before.date, new_date));
        }
        if new_time != before.time {
            changed.push(format!("time: {} -> {}", before.time, new_time));
        }
        if new_service != before.service {
            changed.push(format!("service: {} -> {}", before.service, new_service));
        }
        if new_customer_name != before.customer_name {
            changed.push(format!("customer: {} -> {}", before.customer_name, new_customer_name));
        }
        if new_technician != before.technician {
            changed.push(format!(
                "technician: {} -> {}",
                before.technician.as_deref().unwrap_or("none"),
                new_technician.as_deref().unwrap_or("none")
            ));
        }

        let appointment = &mut self.appointments[position];
        appointment.date = new_date;
        appointment.time = new_time;
        appointment.service = new_service;
        appointment.customer_name = new_customer_name;
        appointment.technician = new_technician;

        Ok(EditSuccess { before, after: appointment.clone(), changes: changed })
    }
}
