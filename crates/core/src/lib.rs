//! Salonbook core: the scheduling and identity-resolution engine for a
//! single-location nail salon.
//!
//! The conversational layer translates natural language into the five
//! structured request kinds handled by [`service::SchedulingService`]; this
//! crate owns everything behind that boundary — date-expression resolution,
//! slot availability, booking/cancellation/edit conflict logic, phone-based
//! appointment matching, and the manager escalation queue.

pub mod clock;
pub mod config;
pub mod dates;
pub mod domain;
pub mod errors;
pub mod escalation;
pub mod phone;
pub mod seed;
pub mod service;
pub mod slots;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigOverrides, LoadOptions, PolicyConfig, SalonConfig};
pub use domain::appointment::{Appointment, AppointmentId};
pub use domain::message::{ManagerMessage, MessageId, MessageStatus, Priority};
pub use errors::ScheduleError;
pub use escalation::EscalationQueue;
pub use phone::MatchTier;
pub use service::{
    AvailabilityResponse, BookAppointmentRequest, BookingResponse, CancelAppointmentRequest,
    CancellationResponse, CheckAvailabilityRequest, EditAppointmentRequest, EditResponse,
    EscalationRequest, EscalationResponse, SchedulingService,
};
pub use slots::{WeekAvailability, SLOT_TIMES};
pub use store::{AppointmentStore, CancelOutcome, EditChanges, EditSuccess};
