use crate::dates;
use crate::models::{DisplayRow, GoalDetailsPayload, SummaryView};

pub fn build_summary(payload: &GoalDetailsPayload) -> SummaryView {
    SummaryView {
        status_label: payload.status_string.clone(),
        aggregate_text: format!("Sum: {:.1} {}", payload.status.sum, payload.unit),
        message_text: payload.status.status_message.clone(),
        goal_message: payload.goal_summary_message.clone(),
    }
}

/// Daily summary rows in the order the backend produced them (newest
/// first); this function does not sort. Zero-valued days drop the unit
/// suffix, the final row is flagged for highlighting.
pub fn build_daily_rows(payload: &GoalDetailsPayload) -> Vec<DisplayRow> {
    let summaries = &payload.status.event_summary_list;
    summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| {
            let is_zero = summary.summed_measurement == 0.0;
            let display_value = if is_zero {
                format!("{:.1}", summary.summed_measurement)
            } else {
                format!("{:.1} {}", summary.summed_measurement, payload.unit)
            };
            DisplayRow {
                weekday: dates::day_of_week(summary.date),
                formatted_date: dates::format_date(summary.date),
                display_value,
                value: summary.summed_measurement,
                is_zero,
                is_last_row: index + 1 == summaries.len(),
            }
        })
        .collect()
}

/// Raw entry rows in stored order; the unit suffix is always shown and
/// no row is highlighted.
pub fn build_all_entries_rows(payload: &GoalDetailsPayload) -> Vec<DisplayRow> {
    payload
        .event_model_list
        .iter()
        .map(|event| DisplayRow {
            weekday: dates::day_of_week(event.date_of_event),
            formatted_date: dates::format_date(event.date_of_event),
            display_value: format!("{:.1} {}", event.measurement, payload.unit),
            value: event.measurement,
            is_zero: false,
            is_last_row: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_payload;

    #[test]
    fn summary_fields_come_from_the_payload() {
        let summary = build_summary(&demo_payload());
        assert_eq!(summary.status_label, "In Momentum");
        assert_eq!(summary.aggregate_text, "Sum: 240.0 minutes");
        assert_eq!(
            summary.message_text,
            "You have a surplus of 90 minutes. Keep it up!"
        );
        assert_eq!(
            summary.goal_message,
            "Target: 150 minutes within a rolling 7 day period."
        );
    }

    #[test]
    fn daily_rows_preserve_order_and_count() {
        let rows = build_daily_rows(&demo_payload());
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].formatted_date, "9/9/23");
        assert_eq!(rows[7].formatted_date, "9/2/23");
    }

    #[test]
    fn only_the_final_daily_row_is_highlighted() {
        let rows = build_daily_rows(&demo_payload());
        let highlighted: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_last_row)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(highlighted, vec![7]);
    }

    #[test]
    fn zero_days_drop_the_unit_suffix() {
        let rows = build_daily_rows(&demo_payload());
        let zero_dates: Vec<&str> = rows
            .iter()
            .filter(|row| row.is_zero)
            .map(|row| row.formatted_date.as_str())
            .collect();
        assert_eq!(zero_dates, vec!["9/9/23", "9/7/23", "9/4/23", "9/3/23", "9/2/23"]);

        assert_eq!(rows[0].display_value, "0.0");
        assert_eq!(rows[1].display_value, "140.0 minutes");
        assert!(!rows[1].is_zero);
    }

    #[test]
    fn entry_rows_always_carry_the_unit() {
        let payload = demo_payload();
        let rows = build_all_entries_rows(&payload);
        assert_eq!(rows.len(), payload.event_model_list.len());
        assert_eq!(rows[0].display_value, "65.0 minutes");
        assert_eq!(rows[0].weekday, "Tue");
        assert!(rows.iter().all(|row| !row.is_zero && !row.is_last_row));
    }

    #[test]
    fn builders_accept_an_entryless_payload() {
        let mut payload = demo_payload();
        payload.status.event_summary_list.clear();
        payload.event_model_list.clear();
        assert!(build_daily_rows(&payload).is_empty());
        assert!(build_all_entries_rows(&payload).is_empty());
    }
}
