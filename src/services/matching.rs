//! Contractor assignment for scheduled events.
//!
//! Walks the event list in order and offers each staffable event to the
//! roster, first fit wins. A contractor must hold every capability the
//! event demands, be rostered on for the event's local weekday, contain
//! the whole event inside that day's availability window, and be free of
//! conflicts against both stored bookings and assignments already made in
//! this run. Events nobody can cover stay unassigned.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use log::debug;

use crate::api::{AssignedContractor, ContractorId, Event};
use crate::config::ScheduleConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::roster::{Contractor, RosterSnapshot, ServiceCapability, WeekdayCode};
use crate::models::time::resolve_local_datetime;

/// Capabilities an event summary demands.
struct CapabilityNeeds {
    photo: bool,
    video: bool,
}

/// Derive capability demand from the event summary. Only media-production
/// events are staffable; milestones and meetings pass through untouched.
fn capability_needs(summary: &str) -> Option<CapabilityNeeds> {
    let lowered = summary.to_lowercase();
    let staffable = lowered.contains("photography")
        || lowered.contains("video")
        || lowered.contains("floor plan");
    if !staffable {
        return None;
    }
    Some(CapabilityNeeds {
        photo: lowered.contains("photo"),
        video: lowered.contains("video"),
    })
}

fn satisfies(contractor: &Contractor, needs: &CapabilityNeeds) -> bool {
    match (needs.photo, needs.video) {
        (true, true) => {
            contractor.has_capability(ServiceCapability::Photographer)
                && contractor.has_capability(ServiceCapability::Videographer)
        }
        (true, false) => contractor.has_capability(ServiceCapability::Photographer),
        (false, true) => contractor.has_capability(ServiceCapability::Videographer),
        // Staffable events demanding neither capability (floor plans) have
        // no matching trade on the roster.
        (false, false) => false,
    }
}

/// Interval overlap between a booking and an event. Touching endpoints do
/// not conflict: starts are checked half-open `[)`, ends `(]`, so a booking
/// that ends exactly when the event starts leaves the contractor free.
fn overlaps(
    booking_start: DateTime<Utc>,
    booking_end: DateTime<Utc>,
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
) -> bool {
    (booking_start >= event_start && booking_start < event_end)
        || (booking_end > event_start && booking_end <= event_end)
        || (event_start >= booking_start && event_start < booking_end)
        || (event_end > booking_start && event_end <= booking_end)
}

/// Whole-event containment in the availability window, both endpoints
/// inclusive.
fn within_window(
    event_start: DateTime<Utc>,
    event_end: DateTime<Utc>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> bool {
    event_start >= window_start
        && event_start <= window_end
        && event_end >= window_start
        && event_end <= window_end
}

/// Assign contractors to the staffable events in the list.
///
/// The list order is preserved and doubles as assignment priority: earlier
/// events claim contractors first, and an assignment made here blocks the
/// same contractor from overlapping events later in the list.
///
/// # Errors
///
/// Fails when the roster itself is invalid or when a staffable event has a
/// negative duration.
pub fn assign_contractors(
    events: Vec<Event>,
    roster: &RosterSnapshot,
    config: &ScheduleConfig,
) -> EngineResult<Vec<Event>> {
    roster.validate()?;

    let mut assigned: HashMap<ContractorId, Vec<(DateTime<Utc>, DateTime<Utc>)>> = HashMap::new();
    let mut out = Vec::with_capacity(events.len());

    for mut event in events {
        let Some(needs) = capability_needs(&event.summary) else {
            out.push(event);
            continue;
        };
        let Some(end) = event.end else {
            out.push(event);
            continue;
        };

        let event_start = event.start.with_timezone(&Utc);
        let event_end = end.with_timezone(&Utc);
        if event_end < event_start {
            return Err(EngineError::degenerate_interval(
                format!("event '{}'", event.summary),
                event_start,
                event_end,
            ));
        }

        let local_start = event.start.with_timezone(&config.timezone);
        let day = WeekdayCode::from_weekday(local_start.weekday());
        let local_date = local_start.date_naive();

        for contractor in &roster.contractors {
            if !satisfies(contractor, &needs) {
                continue;
            }
            let Some(window) = contractor.day_availability(day) else {
                continue;
            };
            if !window.available {
                continue;
            }

            let window_start =
                resolve_local_datetime(config.timezone, local_date.and_time(window.start_time))
                    .with_timezone(&Utc);
            let window_end =
                resolve_local_datetime(config.timezone, local_date.and_time(window.end_time))
                    .with_timezone(&Utc);
            if !within_window(event_start, event_end, window_start, window_end) {
                continue;
            }

            let mut conflict = roster
                .bookings
                .iter()
                .filter(|booking| booking.contractor_id == contractor.id)
                .any(|booking| {
                    overlaps(booking.start_time, booking.end_time, event_start, event_end)
                });
            if !conflict {
                if let Some(intervals) = assigned.get(&contractor.id) {
                    conflict = intervals
                        .iter()
                        .any(|(start, end)| overlaps(*start, *end, event_start, event_end));
                }
            }
            if conflict {
                continue;
            }

            debug!(
                "assigned contractor '{}' to '{}' on {}",
                contractor.name, event.summary, local_date
            );
            assigned
                .entry(contractor.id.clone())
                .or_default()
                .push((event_start, event_end));
            event.contractor = Some(AssignedContractor::from(contractor));
            break;
        }

        if event.contractor.is_none() {
            debug!("no contractor available for '{}' on {}", event.summary, local_date);
        }
        out.push(event);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roster::{Booking, DayAvailability};
    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::Australia::Sydney;
    use std::collections::BTreeMap;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn contractor(
        id: &str,
        name: &str,
        services: &[ServiceCapability],
        days: &[(WeekdayCode, u32, u32)],
    ) -> Contractor {
        let mut availability = BTreeMap::new();
        for (day, start_hour, end_hour) in days {
            availability.insert(
                *day,
                DayAvailability {
                    available: true,
                    start_time: t(*start_hour, 0),
                    end_time: t(*end_hour, 0),
                },
            );
        }
        Contractor {
            id: ContractorId::new(id),
            name: name.to_string(),
            mobile: String::new(),
            email: String::new(),
            picture: None,
            services: services.to_vec(),
            availability,
        }
    }

    fn roster(contractors: Vec<Contractor>) -> RosterSnapshot {
        RosterSnapshot {
            contractors,
            bookings: Vec::new(),
        }
    }

    /// Monday 2025-03-17 in Sydney, as a timed event.
    fn monday_event(summary: &str, start_hour: u32, duration_minutes: i64) -> Event {
        let start = Sydney
            .with_ymd_and_hms(2025, 3, 17, start_hour, 0, 0)
            .unwrap();
        let end = start + chrono::Duration::minutes(duration_minutes);
        Event::timed(summary, start.fixed_offset(), end.fixed_offset())
    }

    fn assigned_name(event: &Event) -> Option<&str> {
        event.contractor.as_ref().map(|c| c.name.as_str())
    }

    #[test]
    fn test_first_fit_in_roster_order() {
        let snapshot = roster(vec![
            contractor("c1", "Alice", &[ServiceCapability::Photographer], &[(WeekdayCode::Mon, 8, 18)]),
            contractor("c2", "Bruno", &[ServiceCapability::Photographer], &[(WeekdayCode::Mon, 8, 18)]),
        ]);
        let events = vec![monday_event("Photography 10 Images", 9, 90)];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Alice"));
    }

    #[test]
    fn test_merged_media_event_requires_both_capabilities() {
        let snapshot = roster(vec![
            contractor("c1", "Alice", &[ServiceCapability::Photographer], &[(WeekdayCode::Mon, 8, 18)]),
            contractor(
                "c2",
                "Bruno",
                &[ServiceCapability::Photographer, ServiceCapability::Videographer],
                &[(WeekdayCode::Mon, 8, 18)],
            ),
        ]);
        let events = vec![monday_event("Photography 10 Images and Property Video", 9, 180)];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Bruno"));
    }

    #[test]
    fn test_video_event_skips_plain_photographer() {
        let snapshot = roster(vec![
            contractor("c1", "Alice", &[ServiceCapability::Photographer], &[(WeekdayCode::Mon, 8, 18)]),
            contractor("c2", "Vera", &[ServiceCapability::Videographer], &[(WeekdayCode::Mon, 8, 18)]),
        ]);
        let events = vec![monday_event("Property Video", 9, 90)];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Vera"));
    }

    #[test]
    fn test_floor_plan_events_stay_unassigned() {
        let snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer, ServiceCapability::Videographer],
            &[(WeekdayCode::Mon, 8, 18)],
        )]);
        let events = vec![monday_event("Medium Floor Plan", 16, 60)];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert!(out[0].contractor.is_none());
    }

    #[test]
    fn test_window_containment_is_inclusive_at_both_ends() {
        let snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 9, 17)],
        )]);

        // Exactly filling the window is allowed.
        let exact = vec![monday_event("Photography 10 Images", 9, 8 * 60)];
        let out = assign_contractors(exact, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Alice"));

        // Starting before the window is not.
        let early = vec![monday_event("Photography 10 Images", 8, 90)];
        let out = assign_contractors(early, &snapshot, &ScheduleConfig::default()).unwrap();
        assert!(out[0].contractor.is_none());

        // Running past the window is not.
        let late = vec![monday_event("Photography 10 Images", 16, 90)];
        let out = assign_contractors(late, &snapshot, &ScheduleConfig::default()).unwrap();
        assert!(out[0].contractor.is_none());
    }

    #[test]
    fn test_day_off_and_unavailable_day_skipped() {
        // Saturday-only photographer never sees a Monday shoot.
        let weekender = contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Sat, 8, 18)],
        );
        let out = assign_contractors(
            vec![monday_event("Photography 10 Images", 9, 90)],
            &roster(vec![weekender]),
            &ScheduleConfig::default(),
        )
        .unwrap();
        assert!(out[0].contractor.is_none());

        // A listed day flagged unavailable counts as a day off.
        let mut off_monday = contractor(
            "c2",
            "Bruno",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 8, 18)],
        );
        off_monday
            .availability
            .get_mut(&WeekdayCode::Mon)
            .unwrap()
            .available = false;
        let out = assign_contractors(
            vec![monday_event("Photography 10 Images", 9, 90)],
            &roster(vec![off_monday]),
            &ScheduleConfig::default(),
        )
        .unwrap();
        assert!(out[0].contractor.is_none());
    }

    #[test]
    fn test_existing_booking_blocks_overlap_but_not_back_to_back() {
        let mut snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 8, 18)],
        )]);
        let booked_start = Sydney.with_ymd_and_hms(2025, 3, 17, 8, 0, 0).unwrap();
        snapshot.bookings.push(Booking {
            contractor_id: ContractorId::new("c1"),
            start_time: booked_start.with_timezone(&Utc),
            end_time: (booked_start + chrono::Duration::hours(2)).with_timezone(&Utc),
        });

        // Overlapping the 08:00-10:00 booking fails.
        let overlapping = vec![monday_event("Photography 10 Images", 9, 90)];
        let out = assign_contractors(overlapping, &snapshot, &ScheduleConfig::default()).unwrap();
        assert!(out[0].contractor.is_none());

        // Starting exactly at 10:00 when the booking ends succeeds.
        let adjacent = vec![monday_event("Photography 10 Images", 10, 90)];
        let out = assign_contractors(adjacent, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Alice"));
    }

    #[test]
    fn test_assignments_made_in_run_block_double_booking() {
        let snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 8, 18)],
        )]);
        let events = vec![
            monday_event("Photography 10 Images", 9, 120),
            monday_event("Dusk Photography", 10, 30),
            monday_event("Photography 5 Images", 11, 60),
        ];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(assigned_name(&out[0]), Some("Alice"));
        // 10:00 falls inside the 09:00-11:00 assignment just made.
        assert!(out[1].contractor.is_none());
        // 11:00 is back-to-back with it, which is fine.
        assert_eq!(assigned_name(&out[2]), Some("Alice"));
    }

    #[test]
    fn test_degenerate_event_interval_rejected() {
        let snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 8, 18)],
        )]);
        let start = Sydney.with_ymd_and_hms(2025, 3, 17, 10, 0, 0).unwrap();
        let backwards = Event::timed(
            "Photography 10 Images",
            start.fixed_offset(),
            (start - chrono::Duration::hours(1)).fixed_offset(),
        );

        let result = assign_contractors(vec![backwards], &snapshot, &ScheduleConfig::default());
        assert!(matches!(
            result,
            Err(EngineError::DegenerateInterval { .. })
        ));
    }

    #[test]
    fn test_invalid_roster_rejected() {
        let mut snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer],
            &[(WeekdayCode::Mon, 8, 18)],
        )]);
        let start = Utc.with_ymd_and_hms(2025, 3, 17, 0, 0, 0).unwrap();
        snapshot.bookings.push(Booking {
            contractor_id: ContractorId::new("c1"),
            start_time: start,
            end_time: start - chrono::Duration::hours(1),
        });

        let result = assign_contractors(Vec::new(), &snapshot, &ScheduleConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_non_media_events_pass_through() {
        let snapshot = roster(vec![contractor(
            "c1",
            "Alice",
            &[ServiceCapability::Photographer, ServiceCapability::Videographer],
            &[(WeekdayCode::Mon, 0, 23)],
        )]);
        let events = vec![
            monday_event("Open home", 10, 30),
            monday_event("Meeting: Launch to Market", 10, 30),
            Event::milestone(
                "Notify off-market buyers",
                Sydney
                    .with_ymd_and_hms(2025, 3, 17, 9, 0, 0)
                    .unwrap()
                    .fixed_offset(),
            ),
        ];

        let out = assign_contractors(events, &snapshot, &ScheduleConfig::default()).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|event| event.contractor.is_none()));
    }
}
