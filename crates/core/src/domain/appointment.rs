use serde::{Deserialize, Serialize};

/// Monotonic integer id assigned by the store: max(existing) + 1, starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppointmentId(pub u32);

/// A single salon booking.
///
/// Dates are canonical `YYYY-MM-DD` strings and times one of the nine catalog
/// values ("09:00".."17:00"); both cross the external boundary as strings, so
/// they are kept as strings here too. `phone_number` preserves the customer's
/// original formatting for display; identity matching always goes through the
/// normalized digit string.
///
/// The wire spellings `customerName`/`phoneNumber` are the field names the
/// conversational layer already speaks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: String,
    pub time: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub service: String,
    /// Preferred technician. Stored verbatim, never conflict-checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
}

impl Appointment {
    pub fn occupies(&self, date: &str, time: &str) -> bool {
        self.date == date && self.time == time
    }
}
