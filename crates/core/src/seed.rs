//! Demo dataset.
//!
//! The week of sample bookings the salon demo runs with, produced as an
//! explicit function of a week's Monday and injected at store construction —
//! never module-level shared state.

use chrono::{Days, NaiveDate};

use crate::domain::appointment::{Appointment, AppointmentId};

/// Seven sample bookings spread across the week starting at `week_monday`.
pub fn demo_appointments(week_monday: NaiveDate) -> Vec<Appointment> {
    let entries: [(u32, u64, &str, &str, &str, &str, Option<&str>); 7] = [
        (1, 0, "10:00", "Sarah Johnson", "(555) 123-4567", "Gel Manicure", Some("Lily")),
        (2, 2, "14:00", "Mike Roberts", "555-234-5678", "Deluxe Pedicure", None),
        (3, 4, "11:00", "Emma Davis", "(555) 345-6789", "Gel X Extensions", Some("Tina")),
        (4, 5, "15:00", "David Wilson", "555.456.7890", "Russian Manicure", None),
        (5, 1, "13:00", "Olivia Smith", "(555) 567-8901", "Madison Valgari Luxurious Pedicure", Some("Lily")),
        (6, 3, "16:00", "Jennifer Lee", "555-678-9012", "Lash Lift & Tint", None),
        (7, 6, "12:00", "Alex Chen", "(555) 789-0123", "Brow Lamination", Some("Mara")),
    ];

    entries
        .into_iter()
        .map(|(id, day_offset, time, name, phone, service, technician)| {
            let date = week_monday.checked_add_days(Days::new(day_offset)).unwrap_or(week_monday);
            Appointment {
                id: AppointmentId(id),
                date: date.format("%Y-%m-%d").to_string(),
                time: time.to_owned(),
                customer_name: name.to_owned(),
                phone_number: phone.to_owned(),
                service: service.to_owned(),
                technician: technician.map(str::to_owned),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::slots;

    use super::demo_appointments;

    #[test]
    fn seed_covers_the_week_without_slot_collisions() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let seeded = demo_appointments(monday);
        assert_eq!(seeded.len(), 7);

        for (i, a) in seeded.iter().enumerate() {
            assert!(slots::valid_time(&a.time), "seed time {} is in the catalog", a.time);
            for b in &seeded[i + 1..] {
                assert!(!(a.date == b.date && a.time == b.time), "no double-booked seed slots");
            }
        }
    }

    #[test]
    fn seed_ids_are_one_through_seven() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        let mut ids: Vec<u32> = demo_appointments(monday).iter().map(|a| a.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn seed_dates_stay_inside_the_given_week() {
        let monday = NaiveDate::from_ymd_opt(2024, 6, 10).expect("valid date");
        for appointment in demo_appointments(monday) {
            let date = NaiveDate::parse_from_str(&appointment.date, "%Y-%m-%d").expect("iso date");
            let offset = (date - monday).num_days();
            assert!((0..7).contains(&offset), "{} is within the week", appointment.date);
        }
    }
}
