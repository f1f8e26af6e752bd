//! Request orchestration.
//!
//! `SchedulingService` is the single owner of the mutable scheduling state.
//! It receives the five structured request kinds from the conversational
//! layer, resolves date tokens, routes through the store/slot/phone modules,
//! and answers with a typed response that always carries a human-readable
//! message — for failures as much as successes. Nothing here propagates as
//! fatal; the caller's session survives every outcome.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::SalonConfig;
use crate::dates;
use crate::domain::appointment::Appointment;
use crate::domain::message::{ManagerMessage, Priority};
use crate::errors::ScheduleError;
use crate::escalation::EscalationQueue;
use crate::phone::MatchTier;
use crate::seed;
use crate::slots;
use crate::store::{AppointmentStore, CancelOutcome, EditChanges};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CheckAvailabilityRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BookAppointmentRequest {
    pub date: String,
    pub time: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub service: String,
    #[serde(default)]
    pub technician: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CancelAppointmentRequest {
    pub phone_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EditAppointmentRequest {
    pub phone_number: String,
    pub original_date: String,
    pub original_time: String,
    #[serde(default)]
    pub new_date: Option<String>,
    #[serde(default)]
    pub new_time: Option<String>,
    #[serde(default)]
    pub new_service: Option<String>,
    #[serde(default)]
    pub new_technician: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EscalationRequest {
    pub client_request: String,
    pub reason: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Availability answers, one variant per granularity the policy can choose.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AvailabilityResponse {
    Slot { date: String, time: String, available: bool, message: String },
    Day { date: String, available_slots: Vec<String>, message: String },
    Week {
        week_of: String,
        week_label: String,
        availability: BTreeMap<String, Vec<String>>,
        message: String,
    },
    Failed { success: bool, message: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BookingResponse {
    Booked { success: bool, appointment: Appointment, message: String },
    Failed { success: bool, message: String },
}

impl BookingResponse {
    fn failed(message: String) -> Self {
        Self::Failed { success: false, message }
    }
}

/// One ambiguous-cancellation candidate, formatted for readback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CancellationCandidate {
    pub date: String,
    pub formatted_date: String,
    pub time: String,
    pub service: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
}

impl From<&Appointment> for CancellationCandidate {
    fn from(appointment: &Appointment) -> Self {
        Self {
            date: appointment.date.clone(),
            formatted_date: dates::format_date(&appointment.date),
            time: appointment.time.clone(),
            service: appointment.service.clone(),
            customer_name: appointment.customer_name.clone(),
            phone_number: appointment.phone_number.clone(),
            technician: appointment.technician.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CancellationResponse {
    Cancelled {
        success: bool,
        cancelled_appointment: Appointment,
        match_type: MatchTier,
        message: String,
    },
    MultipleMatches {
        success: bool,
        multiple_appointments: bool,
        appointments: Vec<CancellationCandidate>,
        message: String,
    },
    Failed { success: bool, message: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EditResponse {
    Updated {
        success: bool,
        original_appointment: Appointment,
        updated_appointment: Appointment,
        changes_summary: Vec<String>,
        message: String,
    },
    Failed { success: bool, message: String },
}

impl EditResponse {
    fn failed(message: String) -> Self {
        Self::Failed { success: false, message }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EscalationResponse {
    pub success: bool,
    pub message_id: String,
    pub status: String,
    pub message: String,
}

pub struct SchedulingService {
    salon_name: String,
    appointments: Arc<Mutex<AppointmentStore>>,
    escalations: Arc<Mutex<EscalationQueue>>,
    clock: Arc<dyn Clock>,
}

impl SchedulingService {
    /// Builds the service from config, seeding the demo week when asked to.
    pub fn new(config: &SalonConfig, clock: Arc<dyn Clock>) -> Self {
        let store = if config.seed_demo_data {
            let monday = dates::week_monday(clock.today());
            AppointmentStore::with_appointments(seed::demo_appointments(monday))
        } else {
            AppointmentStore::new()
        };
        Self::with_store(config, store, clock)
    }

    pub fn with_store(config: &SalonConfig, store: AppointmentStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            salon_name: config.salon_name.clone(),
            appointments: Arc::new(Mutex::new(store)),
            escalations: Arc::new(Mutex::new(EscalationQueue::new())),
            clock,
        }
    }

    fn store(&self) -> MutexGuard<'_, AppointmentStore> {
        match self.appointments.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn queue(&self) -> MutexGuard<'_, EscalationQueue> {
        match self.escalations.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Slot / day / week answer, chosen by which of {date, time} were given:
    /// date+time is a single-slot boolean, date alone a day listing, and no
    /// date (or a multi-week expression) a week view anchored at the resolved
    /// or current Monday.
    pub fn check_availability(&self, request: CheckAvailabilityRequest) -> AvailabilityResponse {
        let today = self.clock.today();
        debug!(date = ?request.date, time = ?request.time, "availability check");

        let Some(raw_date) = request.date.filter(|d| !d.trim().is_empty()) else {
            return self.week_response(dates::week_monday(today), "this week");
        };

        let resolved = dates::resolve(&raw_date, today);
        if dates::week_expression(&raw_date) {
            let anchor = NaiveDate::parse_from_str(&resolved, "%Y-%m-%d")
                .map(dates::week_monday)
                .unwrap_or_else(|_| dates::week_monday(today));
            let label = format!("the week of {}", dates::format_date(&anchor.to_string()));
            return self.week_response(anchor, &label);
        }

        if let Some(time) = request.time.filter(|t| !t.trim().is_empty()) {
            if !slots::valid_time(&time) {
                return AvailabilityResponse::Failed {
                    success: false,
                    message: invalid_time_message(&time),
                };
            }
            let available = !slots::is_booked(self.store().appointments(), &resolved, &time);
            let formatted = dates::format_date(&resolved);
            let message = if available {
                format!("{time} on {formatted} is available for booking.")
            } else {
                format!("Sorry, {time} on {formatted} is already booked.")
            };
            return AvailabilityResponse::Slot { date: resolved, time, available, message };
        }

        let free: Vec<String> = slots::available_slots(self.store().appointments(), &resolved)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let formatted = dates::format_date(&resolved);
        let message = if free.is_empty() {
            format!("Sorry, there are no available slots on {formatted}.")
        } else {
            format!("There are {} available slots on {formatted}: {}", free.len(), free.join(", "))
        };
        AvailabilityResponse::Day { date: resolved, available_slots: free, message }
    }

    fn week_response(&self, monday: NaiveDate, span_label: &str) -> AvailabilityResponse {
        let week = slots::week_availability(self.store().appointments(), monday);
        let total = week.total_free();
        let week_label = format!("Week of {}", dates::format_date(&week.week_of));
        let availability =
            week.days.into_iter().map(|(date, free)| {
                (date, free.into_iter().map(str::to_owned).collect())
            });
        AvailabilityResponse::Week {
            week_of: week.week_of,
            week_label,
            availability: availability.collect(),
            message: format!("There are {total} available slots {span_label}."),
        }
    }

    pub fn book_appointment(&self, request: BookAppointmentRequest) -> BookingResponse {
        if !slots::valid_time(&request.time) {
            return BookingResponse::failed(invalid_time_message(&request.time));
        }
        let resolved = dates::resolve(&request.date, self.clock.today());
        let formatted = dates::format_date(&resolved);

        let booked = self.store().book(
            &resolved,
            &request.time,
            &request.customer_name,
            &request.phone_number,
            &request.service,
            request.technician.clone(),
        );
        match booked {
            Ok(appointment) => {
                info!(
                    appointment_id = appointment.id.0,
                    date = %appointment.date,
                    time = %appointment.time,
                    "appointment booked"
                );
                let message = format!(
                    "Successfully booked an appointment for {} on {formatted} at {} for {}.",
                    appointment.customer_name, appointment.time, appointment.service
                );
                BookingResponse::Booked { success: true, appointment, message }
            }
            Err(error) => {
                warn!(kind = error.kind(), date = %resolved, time = %request.time, "booking rejected");
                BookingResponse::failed(format!(
                    "Sorry, the slot at {} on {formatted} is already booked.",
                    request.time
                ))
            }
        }
    }

    pub fn cancel_appointment(&self, request: CancelAppointmentRequest) -> CancellationResponse {
        let today = self.clock.today();
        let resolved_date = request.date.as_deref().map(|d| dates::resolve(d, today));

        let outcome = self.store().cancel(
            &request.phone_number,
            request.customer_name.as_deref(),
            resolved_date.as_deref(),
            request.time.as_deref(),
        );

        match outcome {
            CancelOutcome::NotFound {
                phone_query,
                normalized_phone,
                name_hint,
                date_hint,
                time_hint,
            } => {
                let mut message =
                    format!("Sorry, no appointments found for phone {phone_query} (digits {normalized_phone})");
                if let Some(name) = name_hint {
                    message.push_str(&format!(" for {name}"));
                }
                if let Some(date) = date_hint {
                    message.push_str(&format!(" on {}", dates::format_date(&date)));
                }
                if let Some(time) = time_hint {
                    message.push_str(&format!(" at {time}"));
                }
                message.push('.');
                debug!(phone = %normalized_phone, "cancellation matched nothing");
                CancellationResponse::Failed { success: false, message }
            }
            CancelOutcome::Ambiguous { candidates, .. } => {
                let who = request
                    .customer_name
                    .clone()
                    .unwrap_or_else(|| "This phone number".to_owned());
                let message = format!(
                    "{who} has multiple appointments. Please specify a date or time to identify which one to cancel."
                );
                let appointments = candidates.iter().map(CancellationCandidate::from).collect();
                CancellationResponse::MultipleMatches {
                    success: false,
                    multiple_appointments: true,
                    appointments,
                    message,
                }
            }
            CancelOutcome::Cancelled { tier, appointment } => {
                info!(
                    appointment_id = appointment.id.0,
                    match_type = ?tier,
                    "appointment cancelled"
                );
                let mut message = format!(
                    "Successfully cancelled the appointment for {} on {} at {} for {}.",
                    appointment.customer_name,
                    dates::format_date(&appointment.date),
                    appointment.time,
                    appointment.service
                );
                if tier == MatchTier::Partial {
                    message.push_str(
                        " The phone number on file was matched by its last 7 digits; the stored formatting differs from what was given.",
                    );
                }
                CancellationResponse::Cancelled {
                    success: true,
                    cancelled_appointment: appointment,
                    match_type: tier,
                    message,
                }
            }
        }
    }

    pub fn edit_appointment(&self, request: EditAppointmentRequest) -> EditResponse {
        if let Some(time) = request.new_time.as_deref() {
            if !slots::valid_time(time) {
                return EditResponse::failed(invalid_time_message(time));
            }
        }

        let today = self.clock.today();
        let original_date = dates::resolve(&request.original_date, today);
        let changes = EditChanges {
            date: request.new_date.as_deref().map(|d| dates::resolve(d, today)),
            time: request.new_time.clone(),
            service: request.new_service.clone(),
            technician: request.new_technician.clone(),
            customer_name: request.customer_name.clone(),
        };

        let edited = self.store().edit(
            &request.phone_number,
            &original_date,
            &request.original_time,
            changes,
        );
        match edited {
            Ok(success) => {
                info!(appointment_id = success.after.id.0, "appointment updated");
                let message = format!(
                    "Successfully updated the appointment for {} on {} at {}: {}.",
                    success.after.customer_name,
                    dates::format_date(&success.after.date),
                    success.after.time,
                    success.changes.join("; ")
                );
                EditResponse::Updated {
                    success: true,
                    original_appointment: success.before,
                    updated_appointment: success.after,
                    changes_summary: success.changes,
                    message,
                }
            }
            Err(error) => {
                warn!(kind = error.kind(), "edit rejected");
                let message = match &error {
                    ScheduleError::NotFound(_) => format!(
                        "No appointment found for {} on {} at {}.",
                        request.phone_number,
                        dates::format_date(&original_date),
                        request.original_time
                    ),
                    ScheduleError::NoChange => {
                        "No changes were requested; the appointment is unchanged.".to_owned()
                    }
                    ScheduleError::Conflict { date, time } => format!(
                        "Sorry, the slot at {time} on {} is already booked.",
                        dates::format_date(date)
                    ),
                    other => format!("The appointment could not be updated: {other}."),
                };
                EditResponse::failed(message)
            }
        }
    }

    pub fn send_message_to_manager(&self, request: EscalationRequest) -> EscalationResponse {
        let message = self.queue().escalate(
            request.client_request,
            request.reason,
            request.priority,
        );
        info!(message_id = %message.id.0, priority = ?message.priority, "escalated to manager");

        let mut text = format!(
            "Your request has been sent to the {} manager; we'll follow up as soon as possible.",
            self.salon_name
        );
        if message.priority == Priority::Urgent {
            text.push_str(" It has been flagged as urgent.");
        }
        EscalationResponse {
            success: true,
            message_id: message.id.0,
            status: "sent".to_owned(),
            message: text,
        }
    }

    /// Typed response channel for the manager side of the escalation queue.
    pub fn respond_to_manager_message(
        &self,
        message_id: &str,
        response: &str,
    ) -> Result<ManagerMessage, ScheduleError> {
        let responded = self.queue().respond(message_id, response)?;
        info!(message_id = %responded.id.0, "manager message responded");
        Ok(responded)
    }

    pub fn pending_manager_messages(&self) -> usize {
        self.queue().pending_count()
    }

    /// Read-only snapshot of the appointment set, for display layers.
    pub fn appointments_snapshot(&self) -> Vec<Appointment> {
        self.store().appointments().to_vec()
    }
}

fn invalid_time_message(time: &str) -> String {
    format!(
        "{time} is not a bookable time; appointments run hourly from {} to {}.",
        slots::SLOT_TIMES[0],
        slots::SLOT_TIMES[slots::SLOT_TIMES.len() - 1]
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::clock::FixedClock;
    use crate::config::SalonConfig;
    use crate::domain::message::Priority;
    use crate::errors::ScheduleError;
    use crate::phone::MatchTier;

    use super::{
        AvailabilityResponse, BookAppointmentRequest, BookingResponse, CancelAppointmentRequest,
        CancellationResponse, CheckAvailabilityRequest, EditAppointmentRequest, EditResponse,
        EscalationRequest, SchedulingService,
    };

    // 2024-06-10 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date")
    }

    fn empty_service() -> SchedulingService {
        SchedulingService::new(&SalonConfig::default(), Arc::new(FixedClock(monday())))
    }

    fn seeded_service() -> SchedulingService {
        let config = SalonConfig { seed_demo_data: true, ..SalonConfig::default() };
        SchedulingService::new(&config, Arc::new(FixedClock(monday())))
    }

    fn book(service: &SchedulingService, date: &str, time: &str, name: &str, phone: &str) {
        let response = service.book_appointment(BookAppointmentRequest {
            date: date.to_owned(),
            time: time.to_owned(),
            customer_name: name.to_owned(),
            phone_number: phone.to_owned(),
            service: "Gel Manicure".to_owned(),
            technician: None,
        });
        assert!(matches!(response, BookingResponse::Booked { .. }));
    }

    #[test]
    fn date_and_time_give_a_single_slot_answer() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "555-123-4567");

        let taken = service.check_availability(CheckAvailabilityRequest {
            date: Some("today".to_owned()),
            time: Some("10:00".to_owned()),
        });
        match taken {
            AvailabilityResponse::Slot { date, available, message, .. } => {
                assert_eq!(date, "2024-06-10");
                assert!(!available);
                assert!(message.contains("already booked"));
            }
            other => panic!("expected slot answer, got {other:?}"),
        }

        let free = service.check_availability(CheckAvailabilityRequest {
            date: Some("2024-06-10".to_owned()),
            time: Some("11:00".to_owned()),
        });
        assert!(matches!(free, AvailabilityResponse::Slot { available: true, .. }));
    }

    #[test]
    fn date_alone_lists_the_whole_day() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "555-123-4567");

        let response = service
            .check_availability(CheckAvailabilityRequest { date: Some("today".to_owned()), time: None });
        match response {
            AvailabilityResponse::Day { available_slots, message, .. } => {
                assert_eq!(available_slots.len(), 8);
                assert!(!available_slots.contains(&"10:00".to_owned()));
                assert!(message.contains("8 available slots"));
            }
            other => panic!("expected day answer, got {other:?}"),
        }
    }

    #[test]
    fn no_date_gives_the_current_week() {
        let service = seeded_service();
        let response = service.check_availability(CheckAvailabilityRequest::default());
        match response {
            AvailabilityResponse::Week { week_of, availability, message, .. } => {
                assert_eq!(week_of, "2024-06-10");
                assert_eq!(availability.len(), 7);
                // 63 weekly slots minus the 7 seeded bookings.
                assert!(message.contains("56 available slots"));
            }
            other => panic!("expected week answer, got {other:?}"),
        }
    }

    #[test]
    fn next_week_expression_anchors_the_following_monday() {
        let service = seeded_service();
        let response = service.check_availability(CheckAvailabilityRequest {
            date: Some("next week".to_owned()),
            time: None,
        });
        match response {
            AvailabilityResponse::Week { week_of, message, .. } => {
                assert_eq!(week_of, "2024-06-17");
                assert!(message.contains("63 available slots"));
            }
            other => panic!("expected week answer, got {other:?}"),
        }
    }

    #[test]
    fn out_of_catalog_time_fails_validation() {
        let service = empty_service();
        let response = service.check_availability(CheckAvailabilityRequest {
            date: Some("today".to_owned()),
            time: Some("18:30".to_owned()),
        });
        assert!(matches!(response, AvailabilityResponse::Failed { success: false, .. }));

        let booking = service.book_appointment(BookAppointmentRequest {
            date: "today".to_owned(),
            time: "08:00".to_owned(),
            customer_name: "A".to_owned(),
            phone_number: "555-1111".to_owned(),
            service: "Manicure".to_owned(),
            technician: None,
        });
        match booking {
            BookingResponse::Failed { success, message } => {
                assert!(!success);
                assert!(message.contains("not a bookable time"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn booking_resolves_date_tokens_and_reports_conflicts() {
        let service = empty_service();
        let first = service.book_appointment(BookAppointmentRequest {
            date: "tomorrow".to_owned(),
            time: "10:00".to_owned(),
            customer_name: "A".to_owned(),
            phone_number: "555-1111".to_owned(),
            service: "Manicure".to_owned(),
            technician: None,
        });
        match first {
            BookingResponse::Booked { appointment, .. } => {
                assert_eq!(appointment.date, "2024-06-11");
                assert_eq!(appointment.id.0, 1);
            }
            other => panic!("expected booking, got {other:?}"),
        }

        let second = service.book_appointment(BookAppointmentRequest {
            date: "2024-06-11".to_owned(),
            time: "10:00".to_owned(),
            customer_name: "B".to_owned(),
            phone_number: "555-2222".to_owned(),
            service: "Pedicure".to_owned(),
            technician: None,
        });
        assert!(matches!(second, BookingResponse::Failed { success: false, .. }));
        assert_eq!(service.appointments_snapshot().len(), 1);
    }

    #[test]
    fn cancellation_reports_the_match_tier() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "(555) 123-4567");

        let response = service.cancel_appointment(CancelAppointmentRequest {
            phone_number: "1234567".to_owned(),
            customer_name: None,
            date: None,
            time: None,
        });
        match response {
            CancellationResponse::Cancelled { match_type, message, .. } => {
                assert_eq!(match_type, MatchTier::Partial);
                assert!(message.contains("last 7 digits"));
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
        assert!(service.appointments_snapshot().is_empty());
    }

    #[test]
    fn ambiguous_cancellation_lists_candidates_and_keeps_the_store() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Emma Davis", "5551111111");
        book(&service, "2024-06-12", "11:00", "Emma Davis", "5551111111");

        let response = service.cancel_appointment(CancelAppointmentRequest {
            phone_number: "5551111111".to_owned(),
            customer_name: Some("Emma Davis".to_owned()),
            date: None,
            time: None,
        });
        match response {
            CancellationResponse::MultipleMatches {
                success,
                multiple_appointments,
                appointments,
                message,
            } => {
                assert!(!success);
                assert!(multiple_appointments);
                assert_eq!(appointments.len(), 2);
                assert!(message.starts_with("Emma Davis has multiple appointments"));
                assert_eq!(appointments[0].formatted_date, "Monday, June 10");
            }
            other => panic!("expected multiple matches, got {other:?}"),
        }
        assert_eq!(service.appointments_snapshot().len(), 2);
    }

    #[test]
    fn cancellation_not_found_echoes_the_normalized_phone() {
        let service = empty_service();
        let response = service.cancel_appointment(CancelAppointmentRequest {
            phone_number: "(999) 000-1111".to_owned(),
            customer_name: None,
            date: Some("tomorrow".to_owned()),
            time: None,
        });
        match response {
            CancellationResponse::Failed { success, message } => {
                assert!(!success);
                assert!(message.contains("9990001111"));
                assert!(message.contains("Tuesday, June 11"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn edit_resolves_tokens_and_summarizes_changes() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "555-123-4567");

        let response = service.edit_appointment(EditAppointmentRequest {
            phone_number: "5551234567".to_owned(),
            original_date: "today".to_owned(),
            original_time: "10:00".to_owned(),
            new_date: Some("tomorrow".to_owned()),
            new_time: Some("14:00".to_owned()),
            new_service: None,
            new_technician: None,
            customer_name: None,
        });
        match response {
            EditResponse::Updated {
                original_appointment,
                updated_appointment,
                changes_summary,
                ..
            } => {
                assert_eq!(original_appointment.date, "2024-06-10");
                assert_eq!(updated_appointment.date, "2024-06-11");
                assert_eq!(updated_appointment.id, original_appointment.id);
                assert_eq!(
                    changes_summary,
                    vec!["date: 2024-06-10 -> 2024-06-11", "time: 10:00 -> 14:00"]
                );
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn edit_with_no_changes_fails_without_mutation() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "555-123-4567");

        let response = service.edit_appointment(EditAppointmentRequest {
            phone_number: "5551234567".to_owned(),
            original_date: "2024-06-10".to_owned(),
            original_time: "10:00".to_owned(),
            new_date: None,
            new_time: Some("10:00".to_owned()),
            new_service: None,
            new_technician: None,
            customer_name: None,
        });
        match response {
            EditResponse::Failed { success, message } => {
                assert!(!success);
                assert!(message.contains("No changes"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(service.appointments_snapshot()[0].time, "10:00");
    }

    #[test]
    fn escalation_round_trip_through_the_typed_channel() {
        let service = empty_service();
        let response = service.send_message_to_manager(EscalationRequest {
            client_request: "party of 10 next Saturday".to_owned(),
            reason: "group size exceeds policy".to_owned(),
            priority: Priority::Urgent,
        });
        assert!(response.success);
        assert_eq!(response.status, "sent");
        assert!(response.message.contains("flagged as urgent"));
        assert_eq!(service.pending_manager_messages(), 1);

        let responded = service
            .respond_to_manager_message(&response.message_id, "approved, split across two techs")
            .expect("pending message");
        assert_eq!(responded.response.as_deref(), Some("approved, split across two techs"));
        assert_eq!(service.pending_manager_messages(), 0);

        let error = service
            .respond_to_manager_message(&response.message_id, "again")
            .expect_err("already responded");
        assert!(matches!(error, ScheduleError::AlreadyResponded(_)));
    }

    #[test]
    fn responses_serialize_to_the_wire_shapes() {
        let service = empty_service();
        book(&service, "2024-06-10", "10:00", "Sarah", "555-123-4567");

        let booked = service.book_appointment(BookAppointmentRequest {
            date: "2024-06-10".to_owned(),
            time: "11:00".to_owned(),
            customer_name: "Mia".to_owned(),
            phone_number: "555-222-3333".to_owned(),
            service: "Pedicure".to_owned(),
            technician: Some("Lily".to_owned()),
        });
        let value = serde_json::to_value(&booked).expect("serialize booking");
        assert_eq!(value["success"], true);
        assert_eq!(value["appointment"]["customerName"], "Mia");
        assert_eq!(value["appointment"]["phoneNumber"], "555-222-3333");
        assert_eq!(value["appointment"]["technician"], "Lily");
        assert!(value["message"].as_str().is_some());

        let conflict = service.cancel_appointment(CancelAppointmentRequest {
            phone_number: "none".to_owned(),
            customer_name: None,
            date: None,
            time: None,
        });
        let value = serde_json::to_value(&conflict).expect("serialize cancellation");
        assert_eq!(value["success"], false);
    }
}
