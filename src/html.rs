use std::fmt::Write;

use crate::models::{DisplayRow, SummaryView};

pub fn summary_fragment(summary: &SummaryView) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<h4>Status: {}</h4>", esc(&summary.status_label));
    let _ = writeln!(output, "<p>{}</p>", esc(&summary.goal_message));
    let _ = writeln!(output, "<p>{}</p>", esc(&summary.aggregate_text));
    let _ = writeln!(output, "<p>{}</p>", esc(&summary.message_text));
    output
}

pub fn daily_table_fragment(rows: &[DisplayRow]) -> String {
    table_fragment("Daily Event Summaries", "Daily Sum", rows)
}

pub fn entries_table_fragment(rows: &[DisplayRow]) -> String {
    table_fragment("All Entries", "Measurement", rows)
}

fn table_fragment(title: &str, value_header: &str, rows: &[DisplayRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "<h4>{title}</h4>");
    let _ = writeln!(output, "<table>");
    let _ = writeln!(
        output,
        "<thead><tr><th>Date</th><th>{value_header}</th></tr></thead>"
    );
    let _ = writeln!(output, "<tbody>");
    for row in rows {
        let row_class = if row.is_last_row { " class=\"last-row\"" } else { "" };
        let cell_class = if row.is_zero { " class=\"hide-zero\"" } else { "" };
        let cell_text = if row.is_zero {
            format!("{:.1}", row.value)
        } else {
            esc(&row.display_value)
        };
        let _ = writeln!(
            output,
            "<tr{}><td>{}, {}</td><td{}>{}</td></tr>",
            row_class, row.weekday, row.formatted_date, cell_class, cell_text
        );
    }
    let _ = writeln!(output, "</tbody>");
    let _ = writeln!(output, "</table>");
    output
}

/// Minimal HTML escaping for text that came from the payload.
pub fn esc(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_payload;
    use crate::view;

    #[test]
    fn summary_fragment_lists_status_sum_and_messages() {
        let fragment = summary_fragment(&view::build_summary(&demo_payload()));
        assert!(fragment.contains("<h4>Status: In Momentum</h4>"));
        assert!(fragment.contains("<p>Sum: 240.0 minutes</p>"));
        assert!(fragment.contains("<p>You have a surplus of 90 minutes. Keep it up!</p>"));
    }

    #[test]
    fn daily_table_marks_zero_cells_and_the_last_row() {
        let fragment = daily_table_fragment(&view::build_daily_rows(&demo_payload()));
        assert!(fragment.contains("<th>Daily Sum</th>"));
        assert!(fragment.contains("<td>Sat, 9/9/23</td><td class=\"hide-zero\">0.0</td>"));
        assert!(fragment.contains("<td>Fri, 9/8/23</td><td>140.0 minutes</td>"));
        assert!(fragment.contains("<tr class=\"last-row\"><td>Sat, 9/2/23</td>"));
    }

    #[test]
    fn entries_table_shows_every_measurement_with_unit() {
        let fragment = entries_table_fragment(&view::build_all_entries_rows(&demo_payload()));
        assert!(fragment.contains("<th>Measurement</th>"));
        assert!(fragment.contains("<td>Tue, 9/5/23</td><td>65.0 minutes</td>"));
        assert!(!fragment.contains("last-row"));
        assert!(!fragment.contains("hide-zero"));
    }

    #[test]
    fn esc_neutralizes_markup_characters() {
        assert_eq!(esc("5 < 6 & \"x\""), "5 &lt; 6 &amp; &quot;x&quot;");
        assert_eq!(esc("plain"), "plain");
    }
}
