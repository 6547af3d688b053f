//! Mock user calendar. Simulates per-user busy dates so the planner can
//! steer trips into free windows.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarEvent {
    pub fn new(title: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            start,
            end,
        }
    }
}

/// Outcome of searching for a usable travel window inside a date range.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TravelWindow {
    AllClear {
        start_date: NaiveDate,
        end_date: NaiveDate,
        free_days: usize,
    },
    PartialConflict {
        suggested_start: NaiveDate,
        suggested_end: NaiveDate,
        free_days: usize,
    },
    InsufficientFreeDays {
        free_days: usize,
        required_days: usize,
    },
}

#[derive(Debug, Default)]
pub struct UserCalendar {
    events: HashMap<String, Vec<CalendarEvent>>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl UserCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calendar pre-loaded with the demo users' events.
    pub fn with_sample_events() -> Self {
        let mut calendar = Self::new();
        calendar.add_event("user_1", CalendarEvent::new("Team Meeting", date(2025, 12, 22), date(2025, 12, 22)));
        calendar.add_event("user_1", CalendarEvent::new("Project Deadline", date(2025, 12, 15), date(2025, 12, 15)));
        calendar.add_event("user_1", CalendarEvent::new("Family Event", date(2025, 12, 25), date(2025, 12, 26)));
        calendar.add_event("user_1", CalendarEvent::new("Work Conference", date(2026, 1, 5), date(2026, 1, 7)));
        calendar.add_event("user_2", CalendarEvent::new("Dentist Appointment", date(2025, 12, 18), date(2025, 12, 18)));
        calendar
    }

    pub fn add_event(&mut self, user_id: &str, event: CalendarEvent) {
        self.events.entry(user_id.to_string()).or_default().push(event);
    }

    /// Dates within the range on which the user has an event.
    pub fn busy_dates(&self, user_id: &str, range_start: NaiveDate, range_end: NaiveDate) -> Vec<NaiveDate> {
        let mut busy = BTreeSet::new();
        for event in self.events.get(user_id).map(Vec::as_slice).unwrap_or_default() {
            let mut current = event.start;
            while current <= event.end {
                if current >= range_start && current <= range_end {
                    busy.insert(current);
                }
                match current.succ_opt() {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }
        busy.into_iter().collect()
    }

    /// Dates within the range with no event.
    pub fn free_dates(&self, user_id: &str, range_start: NaiveDate, range_end: NaiveDate) -> Vec<NaiveDate> {
        let busy: BTreeSet<NaiveDate> =
            self.busy_dates(user_id, range_start, range_end).into_iter().collect();
        let mut free = Vec::new();
        let mut current = range_start;
        while current <= range_end {
            if !busy.contains(&current) {
                free.push(current);
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        free
    }

    pub fn is_date_free(&self, user_id: &str, day: NaiveDate) -> bool {
        self.busy_dates(user_id, day, day).is_empty()
    }

    /// Find the best travel window inside the preferred range: the whole
    /// range when it is clear, otherwise the longest consecutive free run of
    /// at least `min_days`.
    pub fn best_travel_window(
        &self,
        user_id: &str,
        preferred_start: NaiveDate,
        preferred_end: NaiveDate,
        min_days: usize,
    ) -> TravelWindow {
        let free = self.free_dates(user_id, preferred_start, preferred_end);
        let total_days = (preferred_end - preferred_start).num_days() as usize + 1;

        if free.len() == total_days {
            return TravelWindow::AllClear {
                start_date: preferred_start,
                end_date: preferred_end,
                free_days: total_days,
            };
        }

        if !free.is_empty() && free.len() >= min_days {
            let (run_start, run_len) = longest_consecutive_run(&free);
            if run_len >= min_days {
                let run_end = run_start + chrono::Duration::days(run_len as i64 - 1);
                return TravelWindow::PartialConflict {
                    suggested_start: run_start,
                    suggested_end: run_end,
                    free_days: run_len,
                };
            }
        }

        TravelWindow::InsufficientFreeDays {
            free_days: free.len(),
            required_days: min_days,
        }
    }
}

fn longest_consecutive_run(dates: &[NaiveDate]) -> (NaiveDate, usize) {
    let mut best_start = dates[0];
    let mut best_len = 1;
    let mut run_start = dates[0];
    let mut run_len = 1;

    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run_len += 1;
        } else {
            run_start = pair[1];
            run_len = 1;
        }
        if run_len > best_len {
            best_start = run_start;
            best_len = run_len;
        }
    }

    (best_start, best_len)
}
