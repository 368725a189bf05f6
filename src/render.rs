use std::fmt::Write;

/// Named insertion points of the detail page. Everything the pipeline
/// shows goes through these four operations, so the whole flow is
/// testable against an in-memory page.
pub trait RenderPort {
    fn write_summary(&mut self, html: &str);
    fn write_daily_table(&mut self, html: &str);
    fn write_entries_table(&mut self, html: &str);
    fn set_panel_visible(&mut self, visible: bool);
}

/// Visibility of the all-entries panel. Lives for the page lifetime;
/// re-fetching a goal does not touch it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionToggle {
    #[default]
    Hidden,
    Visible,
}

impl SectionToggle {
    pub fn toggle(&mut self) {
        *self = match self {
            SectionToggle::Hidden => SectionToggle::Visible,
            SectionToggle::Visible => SectionToggle::Hidden,
        };
    }

    pub fn is_visible(self) -> bool {
        self == SectionToggle::Visible
    }
}

/// In-memory page backend: holds the current markup of each region and
/// assembles the final document on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRegions {
    pub summary: String,
    pub daily_table: String,
    pub entries_table: String,
    pub panel_visible: bool,
}

impl PageRegions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_document(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "<div class=\"container\">");
        let _ = writeln!(output, "<div id=\"goal-summary\">");
        let _ = write!(output, "{}", self.summary);
        let _ = writeln!(output, "</div>");
        let _ = writeln!(output, "<div id=\"daily-summaries\">");
        let _ = write!(output, "{}", self.daily_table);
        let _ = writeln!(output, "</div>");
        let panel_class = if self.panel_visible { "" } else { " class=\"hidden\"" };
        let _ = writeln!(output, "<div id=\"all-entries\"{panel_class}>");
        let _ = write!(output, "{}", self.entries_table);
        let _ = writeln!(output, "</div>");
        let _ = writeln!(output, "</div>");
        output
    }
}

impl RenderPort for PageRegions {
    fn write_summary(&mut self, html: &str) {
        self.summary = html.to_string();
    }

    fn write_daily_table(&mut self, html: &str) {
        self.daily_table = html.to_string();
    }

    fn write_entries_table(&mut self, html: &str) {
        self.entries_table = html.to_string();
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_starts_hidden_and_alternates() {
        let mut toggle = SectionToggle::default();
        assert!(!toggle.is_visible());

        toggle.toggle();
        assert!(toggle.is_visible());

        toggle.toggle();
        assert!(!toggle.is_visible());
    }

    #[test]
    fn document_hides_the_entries_panel_until_toggled() {
        let mut page = PageRegions::new();
        page.write_entries_table("<table></table>\n");

        assert!(page.to_document().contains("<div id=\"all-entries\" class=\"hidden\">"));

        page.set_panel_visible(true);
        assert!(page.to_document().contains("<div id=\"all-entries\">"));
    }

    #[test]
    fn regions_hold_the_last_write() {
        let mut page = PageRegions::new();
        page.write_summary("<h4>one</h4>");
        page.write_summary("<h4>two</h4>");
        assert_eq!(page.summary, "<h4>two</h4>");

        page.write_summary("");
        assert_eq!(page.summary, "");
    }
}
