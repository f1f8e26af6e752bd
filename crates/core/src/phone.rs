//! Phone-number identity matching.
//!
//! Phone numbers are the primary identity key for cancellation and edits —
//! customer names collide. Matching is exact on the normalized digit string
//! first, then falls back to the last seven digits so an omitted area code or
//! formatting drift still finds the booking. Queries shorter than seven
//! digits never partial-match.

use serde::{Deserialize, Serialize};

use crate::domain::appointment::Appointment;

const PARTIAL_SUFFIX_LEN: usize = 7;

/// Which tier produced the match, so callers can mention that the stored
/// formatting differed from what the client said.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Partial,
}

#[derive(Clone, Debug)]
pub struct PhoneMatch<'a> {
    pub tier: MatchTier,
    pub appointments: Vec<&'a Appointment>,
}

impl PhoneMatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

/// Strips every non-digit character.
pub fn normalize(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Exact match on normalized digits, then a suffix fallback on the last seven
/// digits when the query is long enough to avoid false positives.
pub fn find_candidates<'a>(pool: &'a [Appointment], query: &str) -> PhoneMatch<'a> {
    let normalized_query = normalize(query);

    let exact: Vec<&Appointment> =
        pool.iter().filter(|a| normalize(&a.phone_number) == normalized_query).collect();
    if !exact.is_empty() {
        return PhoneMatch { tier: MatchTier::Exact, appointments: exact };
    }

    if normalized_query.len() < PARTIAL_SUFFIX_LEN {
        return PhoneMatch { tier: MatchTier::Exact, appointments: Vec::new() };
    }

    let suffix = &normalized_query[normalized_query.len() - PARTIAL_SUFFIX_LEN..];
    let partial: Vec<&Appointment> =
        pool.iter().filter(|a| normalize(&a.phone_number).ends_with(suffix)).collect();
    PhoneMatch { tier: MatchTier::Partial, appointments: partial }
}
