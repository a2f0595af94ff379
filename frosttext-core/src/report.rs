//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use serde::{Deserialize, Serialize};

/// One generated forecast text for one area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AreaReport {
    pub area: String,
    pub story: String,
    pub language: String,
    /// The finished sentence(s); empty when the story was suppressed
    pub text: String,
}

/// Sort reports deterministically
pub fn sort_reports(mut reports: Vec<AreaReport>) -> Vec<AreaReport> {
    reports.sort_by(|a, b| {
        a.area
            .cmp(&b.area)
            .then_with(|| a.story.cmp(&b.story))
            .then_with(|| a.language.cmp(&b.language))
    });
    reports
}

/// Render reports as text output
pub fn render_text(reports: &[AreaReport]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<20} {:<12} {}\n", "AREA", "STORY", "TEXT"));
    for report in reports {
        let text = if report.text.is_empty() {
            "-"
        } else {
            report.text.as_str()
        };
        output.push_str(&format!(
            "{:<20} {:<12} {}\n",
            truncate_or_pad(&report.area, 20),
            report.story,
            text
        ));
    }
    output
}

/// Render reports as JSON output
pub fn render_json(reports: &[AreaReport]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(area: &str, story: &str, text: &str) -> AreaReport {
        AreaReport {
            area: area.to_string(),
            story: story.to_string(),
            language: "fi".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_sort_by_area_then_story() {
        let reports = vec![
            report("uusimaa", "overview", "a"),
            report("lappi", "probability", "b"),
            report("lappi", "overview", "c"),
        ];
        let sorted = sort_reports(reports);
        assert_eq!(sorted[0].area, "lappi");
        assert_eq!(sorted[0].story, "overview");
        assert_eq!(sorted[1].story, "probability");
        assert_eq!(sorted[2].area, "uusimaa");
    }

    #[test]
    fn test_render_text_marks_suppressed_stories() {
        let out = render_text(&[report("lappi", "overview", "")]);
        assert!(out.contains('-'));
    }

    #[test]
    fn test_render_text_has_header() {
        let out = render_text(&[]);
        assert!(out.starts_with("AREA"));
    }

    #[test]
    fn test_render_json_round_trips() {
        let reports = vec![report("lappi", "overview", "Yleisesti hallaa.")];
        let json = render_json(&reports);
        let back: Vec<AreaReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reports);
    }

    #[test]
    fn test_truncate_long_area_names() {
        let out = render_text(&[report("a-very-long-area-name-indeed", "overview", "x")]);
        assert!(out.contains("..."));
    }
}
