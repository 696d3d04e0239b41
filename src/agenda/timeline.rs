use chrono::{Duration, NaiveTime};

use super::model::AgendaItem;

/// Derived, display-only time slot for one agenda item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn start_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// 09:00, the default meeting start.
pub fn default_anchor() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

/// Lay items out back to back from `anchor`. Wraps past midnight.
pub fn derive_timeline(items: &[AgendaItem], anchor: NaiveTime) -> Vec<TimeSlot> {
    let mut cursor = anchor;
    items
        .iter()
        .map(|item| {
            let start = cursor;
            let (end, _) =
                start.overflowing_add_signed(Duration::minutes(i64::from(item.duration_minutes)));
            cursor = end;
            TimeSlot { start, end }
        })
        .collect()
}
