use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One time block on the study schedule. Times are zero-padded "HH:MM"
/// strings, so lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub activity: String,
}

/// A full study schedule plus the generator's reasoning.
///
/// Items are kept ordered by (date, start time); [`OptimizedSchedule::sort`]
/// re-asserts that invariant after any wholesale replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedSchedule {
    #[serde(rename = "schedule")]
    pub items: Vec<ScheduleItem>,
    pub reasoning: String,
}

impl OptimizedSchedule {
    pub fn sort(&mut self) {
        self.items
            .sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(date: (i32, u32, u32), start: &str) -> ScheduleItem {
        ScheduleItem {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            activity: "Study".to_string(),
        }
    }

    #[test]
    fn test_sort_orders_by_date_then_start() {
        let mut schedule = OptimizedSchedule {
            items: vec![
                item((2026, 7, 29), "09:00"),
                item((2026, 7, 28), "14:00"),
                item((2026, 7, 28), "09:00"),
            ],
            reasoning: String::new(),
        };
        schedule.sort();

        let order: Vec<(NaiveDate, String)> = schedule
            .items
            .iter()
            .map(|i| (i.date, i.start_time.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                (NaiveDate::from_ymd_opt(2026, 7, 28).unwrap(), "09:00".to_string()),
                (NaiveDate::from_ymd_opt(2026, 7, 28).unwrap(), "14:00".to_string()),
                (NaiveDate::from_ymd_opt(2026, 7, 29).unwrap(), "09:00".to_string()),
            ]
        );
    }
}
