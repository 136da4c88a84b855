//! Day-of-week × hour activity grid.

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use super::tally::Tally;
use crate::Message;

/// Days in the grid, Sunday first.
pub const DAYS: usize = 7;

/// Hours in the grid.
pub const HOURS: usize = 24;

/// Maximum entries in [`HeatmapCell::top_users`].
pub const TOP_USERS: usize = 5;

/// A sender and a message count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCount {
    pub name: String,
    pub count: usize,
}

/// Activity for one (day, hour) slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    /// 0..=23, wall-clock.
    pub hour: u8,
    pub count: usize,
    /// Up to five busiest senders, count descending, first-seen order on ties.
    pub top_users: Vec<UserCount>,
}

/// Position of a (day, hour) slot in the output of [`heatmap`].
pub fn cell_index(day_of_week: usize, hour: usize) -> usize {
    day_of_week * HOURS + hour
}

/// Builds the full 168-cell grid from authored messages.
///
/// Cells are ordered day-major: Sunday 00h, Sunday 01h, ..., Saturday 23h.
/// Empty slots are present with a zero count.
///
/// ```rust
/// use chatpulse::analytics::{heatmap, heatmap::cell_index};
/// use chatpulse::Message;
/// use chrono::NaiveDate;
///
/// // 2024-03-17 is a Sunday.
/// let ts = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap().and_hms_opt(21, 15, 0).unwrap();
/// let cells = heatmap(&[Message::new(ts, "Ana", "boa noite")]);
///
/// assert_eq!(cells.len(), 168);
/// assert_eq!(cells[cell_index(0, 21)].count, 1);
/// assert_eq!(cells[cell_index(0, 21)].top_users[0].name, "Ana");
/// ```
pub fn heatmap(messages: &[Message]) -> Vec<HeatmapCell> {
    let mut grid: Vec<Tally<String>> = vec![Tally::new(); DAYS * HOURS];

    for msg in messages.iter().filter(|m| m.is_authored()) {
        let day = msg.timestamp.weekday().num_days_from_sunday() as usize;
        let hour = msg.timestamp.hour() as usize;
        grid[cell_index(day, hour)].add(&msg.sender);
    }

    grid.into_iter()
        .enumerate()
        .map(|(i, users)| {
            let count = users.iter().map(|(_, c)| c).sum::<usize>();
            let top_users = users
                .into_sorted()
                .into_iter()
                .take(TOP_USERS)
                .map(|(name, count)| UserCount { name, count })
                .collect();
            HeatmapCell {
                day_of_week: (i / HOURS) as u8,
                hour: (i % HOURS) as u8,
                count,
                top_users,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    // 2024-03-18 is a Monday.
    fn monday(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 18)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_grid_has_all_cells() {
        let cells = heatmap(&[]);
        assert_eq!(cells.len(), 168);
        assert!(cells.iter().all(|c| c.count == 0 && c.top_users.is_empty()));
        assert_eq!(cells[0].day_of_week, 0);
        assert_eq!(cells[0].hour, 0);
        assert_eq!(cells[167].day_of_week, 6);
        assert_eq!(cells[167].hour, 23);
    }

    #[test]
    fn test_day_and_hour_placement() {
        let cells = heatmap(&[Message::new(monday(9), "Ana", "x")]);
        let cell = &cells[cell_index(1, 9)];
        assert_eq!((cell.day_of_week, cell.hour, cell.count), (1, 9, 1));
    }

    #[test]
    fn test_system_messages_excluded() {
        let cells = heatmap(&[Message::system(monday(9), "Rui saiu")]);
        assert_eq!(cells.iter().map(|c| c.count).sum::<usize>(), 0);
    }

    #[test]
    fn test_top_users_limited_and_ordered() {
        let mut messages = Vec::new();
        for (name, n) in [("A", 1), ("B", 3), ("C", 2), ("D", 2), ("E", 1), ("F", 4)] {
            for _ in 0..n {
                messages.push(Message::new(monday(20), name, "x"));
            }
        }
        let cell = &heatmap(&messages)[cell_index(1, 20)];
        let top: Vec<(&str, usize)> = cell
            .top_users
            .iter()
            .map(|u| (u.name.as_str(), u.count))
            .collect();
        assert_eq!(cell.count, 13);
        assert_eq!(top, vec![("F", 4), ("B", 3), ("C", 2), ("D", 2), ("A", 1)]);
    }

    #[test]
    fn test_total_equals_authored_messages() {
        let messages: Vec<Message> = (0..24)
            .map(|h| Message::new(monday(h), if h % 2 == 0 { "A" } else { "B" }, "x"))
            .collect();
        let total: usize = heatmap(&messages).iter().map(|c| c.count).sum();
        assert_eq!(total, 24);
    }
}
