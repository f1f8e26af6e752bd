//! Slot availability over the fixed daily catalog.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::appointment::Appointment;

/// The nine bookable times per day, 09:00 through 17:00 on the hour.
pub const SLOT_TIMES: [&str; 9] =
    ["09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"];

pub fn valid_time(time: &str) -> bool {
    SLOT_TIMES.contains(&time)
}

pub fn is_booked(appointments: &[Appointment], date: &str, time: &str) -> bool {
    appointments.iter().any(|a| a.occupies(date, time))
}

/// Catalog slots minus those occupied for the date, in catalog order.
pub fn available_slots(appointments: &[Appointment], date: &str) -> Vec<&'static str> {
    SLOT_TIMES.into_iter().filter(|time| !is_booked(appointments, date, time)).collect()
}

/// Free slots for the seven consecutive days starting at a Monday.
///
/// Derived on demand, never stored; the BTreeMap keeps the ISO dates in
/// chronological order. `week_of` is the Monday anchor as `YYYY-MM-DD`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeekAvailability {
    pub week_of: String,
    pub days: BTreeMap<String, Vec<&'static str>>,
}

impl WeekAvailability {
    pub fn total_free(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

pub fn week_availability(appointments: &[Appointment], monday_start: NaiveDate) -> WeekAvailability {
    let mut days = BTreeMap::new();
    for offset in 0..7u64 {
        let date = monday_start.checked_add_days(Days::new(offset)).unwrap_or(monday_start);
        let key = date.format("%Y-%m-%d").to_string();
        let free = available_slots(appointments, &key);
        days.insert(key, free);
    }
    WeekAvailability { week_of: monday_start.format("%Y-%m-%d").to_string(), days }
}
