use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utility::id::{HasId, Id};

pub type ServiceId = Id<Service>;

/// Placeholder type tying `ServiceId` to the calendar domain; the calendar
/// itself is stored per `service_id` in `Calendar` below, not as a struct of
/// its own.
pub struct Service;

impl HasId for Service {
    type IdType = String;
}

/// `{service_id, per-weekday bit, start_date, end_date}` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarWindow {
    pub service_id: ServiceId,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CalendarWindow {
    fn runs_on_weekday(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn operates_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date && self.runs_on_weekday(date.weekday())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExceptionKind {
    Added,
    Removed,
}

/// `{service_id, date, kind}` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarException {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub kind: ExceptionKind,
}

/// All calendar data for one mode, keyed by `service_id`. Answers "is this
/// service operating on date X" per §3/§8's calendar-correctness property:
/// a `REMOVED` exception excludes an otherwise-operating weekday, an
/// `ADDED` exception includes an otherwise non-operating one.
#[derive(Debug, Clone, Default)]
pub struct ServiceCalendar {
    windows: HashMap<ServiceId, CalendarWindow>,
    exceptions: HashMap<ServiceId, Vec<CalendarException>>,
}

impl ServiceCalendar {
    pub fn new(
        windows: Vec<CalendarWindow>,
        exceptions: Vec<CalendarException>,
    ) -> Self {
        let mut by_service: HashMap<ServiceId, Vec<CalendarException>> = HashMap::new();
        for exception in exceptions {
            by_service.entry(exception.service_id.clone()).or_default().push(exception);
        }
        Self {
            windows: windows
                .into_iter()
                .map(|w| (w.service_id.clone(), w))
                .collect(),
            exceptions: by_service,
        }
    }

    pub fn operates_on(&self, service_id: &ServiceId, date: NaiveDate) -> bool {
        if let Some(exceptions) = self.exceptions.get(service_id) {
            for exception in exceptions {
                if exception.date == date {
                    return exception.kind == ExceptionKind::Added;
                }
            }
        }
        self.windows
            .get(service_id)
            .map(|window| window.operates_on(date))
            .unwrap_or(false)
    }

    pub fn known_service(&self, service_id: &ServiceId) -> bool {
        self.windows.contains_key(service_id) || self.exceptions.contains_key(service_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(service_id: &str) -> CalendarWindow {
        CalendarWindow {
            service_id: Id::new(service_id.to_owned()),
            monday: true,
            tuesday: true,
            wednesday: true,
            thursday: true,
            friday: true,
            saturday: false,
            sunday: false,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        }
    }

    #[test]
    fn removed_exception_excludes_an_operating_weekday() {
        let service_id: ServiceId = Id::new("wd".to_owned());
        let calendar = ServiceCalendar::new(
            vec![window("wd")],
            vec![CalendarException {
                service_id: service_id.clone(),
                date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), // a Monday
                kind: ExceptionKind::Removed,
            }],
        );
        assert!(!calendar.operates_on(&service_id, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()));
        assert!(calendar.operates_on(&service_id, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()));
    }

    #[test]
    fn added_exception_includes_an_off_weekday() {
        let service_id: ServiceId = Id::new("wd".to_owned());
        let calendar = ServiceCalendar::new(
            vec![window("wd")],
            vec![CalendarException {
                service_id: service_id.clone(),
                date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(), // a Saturday
                kind: ExceptionKind::Added,
            }],
        );
        assert!(calendar.operates_on(&service_id, NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()));
    }
}
