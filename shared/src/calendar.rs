//! Month grid generation and date bucketing for the calendar view.
//!
//! A grid always holds six Sunday-first weeks (42 cells) starting on the
//! Sunday on or before the first of the displayed month, so leading and
//! trailing cells spill into the neighbouring months.
//!
//! Events are bucketed by the calendar date of their start instant in the
//! viewer's zone. [`build_month_grid`] uses the local zone; the `_in`
//! variants take the zone explicitly.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, TimeZone, Utc};

use crate::models::Event;

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_CELLS: usize = 6 * DAYS_PER_WEEK;

/// Event previews rendered inside one cell before "+N more"
pub const MAX_PREVIEWS: usize = 2;

const PREVIEW_CHARS: usize = 12;

pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<Event>,
}

impl CalendarDay {
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Events beyond the rendered previews
    pub fn hidden_event_count(&self) -> usize {
        self.events.len().saturating_sub(MAX_PREVIEWS)
    }
}

/// Six-week grid for one displayed month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// `"July 2025"`
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("Invalid Month")
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Sunday on or before the first of `reference`'s month
pub fn grid_start(reference: NaiveDate) -> NaiveDate {
    let first = first_of_month(reference);
    first - Duration::days(i64::from(first.weekday().num_days_from_sunday()))
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// Build the grid for `reference`'s month, bucketing events by local date
pub fn build_month_grid(
    reference: NaiveDate,
    now: DateTime<Utc>,
    selected: Option<NaiveDate>,
    events: &[Event],
) -> MonthGrid {
    build_month_grid_in(&Local, reference, now, selected, events)
}

pub fn build_month_grid_in<Tz: TimeZone>(
    tz: &Tz,
    reference: NaiveDate,
    now: DateTime<Utc>,
    selected: Option<NaiveDate>,
    events: &[Event],
) -> MonthGrid {
    let today = now.with_timezone(tz).date_naive();
    let start = grid_start(reference);

    let dated: Vec<(NaiveDate, &Event)> = events
        .iter()
        .filter_map(|event| event.start_date_in(tz).map(|date| (date, event)))
        .collect();

    let days = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            CalendarDay {
                date,
                is_current_month: date.year() == reference.year()
                    && date.month() == reference.month(),
                is_today: date == today,
                is_selected: selected == Some(date),
                events: dated
                    .iter()
                    .filter(|(event_date, _)| *event_date == date)
                    .map(|(_, event)| (*event).clone())
                    .collect(),
            }
        })
        .collect();

    MonthGrid {
        year: reference.year(),
        month: reference.month(),
        days,
    }
}

/// Events starting on `date` in the local zone
pub fn events_on(date: NaiveDate, events: &[Event]) -> Vec<Event> {
    events_on_in(&Local, date, events)
}

pub fn events_on_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate, events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.start_date_in(tz) == Some(date))
        .cloned()
        .collect()
}

/// Shorten a title for the in-cell preview
pub fn preview_title(title: &str) -> String {
    if title.chars().count() > PREVIEW_CHARS {
        let cut: String = title.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Weekday};

    use crate::models::DEFAULT_EVENT_LOCATION;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn event_at(id: &str, start: Option<DateTime<Utc>>) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            start,
            end: start.map(|s| s + Duration::minutes(30)),
            location: DEFAULT_EVENT_LOCATION.to_string(),
            description: String::new(),
            attendees: vec![],
        }
    }

    fn local_instant(tz: &FixedOffset, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        tz.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        local_instant(&utc(), 2025, 7, 10, 9, 0)
    }

    #[test]
    fn test_grid_always_has_42_contiguous_cells_from_sunday() {
        for year in 2023..=2026 {
            for month in 1..=12 {
                let grid = build_month_grid_in(&utc(), date(year, month, 15), now(), None, &[]);

                assert_eq!(grid.days.len(), GRID_CELLS);
                assert_eq!(grid.days[0].date.weekday(), Weekday::Sun);
                for pair in grid.days.windows(2) {
                    assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
                }
                assert_eq!(grid.weeks().count(), 6);
            }
        }
    }

    #[test]
    fn test_july_grid_leads_with_june_cells() {
        let first = event_at("1", Some(local_instant(&utc(), 2025, 7, 1, 10, 0)));
        let grid = build_month_grid_in(&utc(), date(2025, 7, 20), now(), None, &[first.clone()]);

        assert_eq!(grid.days[0].date, date(2025, 6, 29));
        assert_eq!(grid.days[1].date, date(2025, 6, 30));
        assert!(!grid.days[0].is_current_month);
        assert!(!grid.days[1].is_current_month);

        let july_first = &grid.days[2];
        assert_eq!(july_first.date, date(2025, 7, 1));
        assert!(july_first.is_current_month);
        assert_eq!(july_first.events, vec![first]);
        assert!(july_first.has_events());
    }

    #[test]
    fn test_same_date_events_share_a_cell() {
        let morning = event_at("a", Some(local_instant(&utc(), 2025, 7, 8, 8, 0)));
        let evening = event_at("b", Some(local_instant(&utc(), 2025, 7, 8, 19, 45)));
        let grid = build_month_grid_in(&utc(), date(2025, 7, 1), now(), None, &[morning, evening]);

        let cell = grid.days.iter().find(|d| d.date == date(2025, 7, 8)).unwrap();
        let ids: Vec<_> = cell.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_midnight_neighbours_land_in_different_cells() {
        let zone = FixedOffset::east_opt(5 * 3600).unwrap();
        let late = event_at("late", Some(local_instant(&zone, 2025, 7, 3, 23, 59)));
        let early = event_at("early", Some(local_instant(&zone, 2025, 7, 4, 0, 1)));
        let grid = build_month_grid_in(&zone, date(2025, 7, 1), now(), None, &[late, early]);

        let third = grid.days.iter().find(|d| d.date == date(2025, 7, 3)).unwrap();
        let fourth = grid.days.iter().find(|d| d.date == date(2025, 7, 4)).unwrap();
        assert_eq!(third.events.len(), 1);
        assert_eq!(third.events[0].id, "late");
        assert_eq!(fourth.events.len(), 1);
        assert_eq!(fourth.events[0].id, "early");
    }

    #[test]
    fn test_bucketing_follows_viewer_zone() {
        let instant = local_instant(&utc(), 2025, 7, 1, 23, 30);
        let events = vec![event_at("x", Some(instant))];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(events_on_in(&utc(), date(2025, 7, 1), &events).len(), 1);
        assert!(events_on_in(&plus_two, date(2025, 7, 1), &events).is_empty());
        assert_eq!(events_on_in(&plus_two, date(2025, 7, 2), &events).len(), 1);
    }

    #[test]
    fn test_unparseable_start_matches_no_cell() {
        let broken = event_at("broken", None);
        let grid = build_month_grid_in(&utc(), date(2025, 7, 1), now(), None, &[broken]);

        assert!(grid.days.iter().all(|d| !d.has_events()));
    }

    #[test]
    fn test_today_and_selected_flags() {
        let grid = build_month_grid_in(
            &utc(),
            date(2025, 7, 1),
            now(),
            Some(date(2025, 7, 22)),
            &[],
        );

        let today: Vec<_> = grid.days.iter().filter(|d| d.is_today).map(|d| d.date).collect();
        let selected: Vec<_> = grid.days.iter().filter(|d| d.is_selected).map(|d| d.date).collect();
        assert_eq!(today, vec![date(2025, 7, 10)]);
        assert_eq!(selected, vec![date(2025, 7, 22)]);
    }

    #[test]
    fn test_four_week_month_still_renders_six_rows() {
        // February 2026 starts on a Sunday and has exactly four weeks
        let grid = build_month_grid_in(&utc(), date(2026, 2, 1), now(), None, &[]);

        assert_eq!(grid.days[0].date, date(2026, 2, 1));
        assert!(grid.days[..28].iter().all(|d| d.is_current_month));
        assert!(grid.days[28..].iter().all(|d| !d.is_current_month));
        assert_eq!(grid.days[41].date, date(2026, 3, 14));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        assert_eq!(previous_month(date(2025, 1, 17)), date(2024, 12, 1));
        assert_eq!(next_month(date(2025, 12, 31)), date(2026, 1, 1));
        assert_eq!(next_month(date(2025, 1, 31)), date(2025, 2, 1));
    }

    #[test]
    fn test_grid_title() {
        let grid = build_month_grid_in(&utc(), date(2025, 7, 4), now(), None, &[]);
        assert_eq!(grid.title(), "July 2025");
        assert_eq!(month_name(13), "Invalid Month");
    }

    #[test]
    fn test_preview_title_truncates_long_titles() {
        assert_eq!(preview_title("Team Standup"), "Team Standup");
        assert_eq!(preview_title("Client Call - Project Review"), "Client Call ...");
    }

    #[test]
    fn test_hidden_event_count() {
        let start = Some(local_instant(&utc(), 2025, 7, 8, 8, 0));
        let events: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| event_at(id, start)).collect();
        let grid = build_month_grid_in(&utc(), date(2025, 7, 1), now(), None, &events);

        let cell = grid.days.iter().find(|d| d.date == date(2025, 7, 8)).unwrap();
        assert_eq!(cell.hidden_event_count(), 2);
    }
}
