//! Frosttext core library - tiered weather-risk classification and
//! localized forecast sentence composition

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Classification is pure: no I/O, no clocks, no global mutable state
// - Identical input yields identical output
// - Tier tables and configuration are validated at construction, never
//   per call
// - Language-specific text appears only behind the dictionary boundary

pub mod classifier;
pub mod combiner;
pub mod config;
pub mod dictionary;
pub mod gate;
pub mod measurement;
pub mod phrase;
pub mod region;
pub mod render;
pub mod report;
pub mod story;
pub mod tiers;

pub use config::ResolvedConfig;
pub use dictionary::Dictionary;
pub use measurement::Measurement;
pub use report::{render_json, render_text, sort_reports, AreaReport};
pub use story::{generate, AreaInput, StoryKind};

use anyhow::Result;
use render::Renderer;

/// Generate and render one story for one area
pub fn generate_report(
    input: &AreaInput,
    story: StoryKind,
    config: &ResolvedConfig,
    dict: &dyn Dictionary,
) -> Result<AreaReport> {
    let paragraph = story::generate(input, story, config)?;
    let text = Renderer::new(dict).render_paragraph(&paragraph)?;
    Ok(AreaReport {
        area: input.area.clone(),
        story: story.as_str().to_string(),
        language: dict.language().to_string(),
        text,
    })
}

/// Generate and render one story for a batch of areas, sorted
/// deterministically
pub fn generate_reports(
    inputs: &[AreaInput],
    story: StoryKind,
    config: &ResolvedConfig,
    dict: &dyn Dictionary,
) -> Result<Vec<AreaReport>> {
    let mut reports = Vec::with_capacity(inputs.len());
    for input in inputs {
        reports.push(generate_report(input, story, config, dict)?);
    }
    Ok(sort_reports(reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{english, finnish};

    fn input(area: &str, risk: f64, severe: f64) -> AreaInput {
        AreaInput {
            area: area.to_string(),
            risk_probability: Some(Measurement::from(risk)),
            severe_probability: Some(Measurement::from(severe)),
            regions: Vec::new(),
        }
    }

    #[test]
    fn test_generate_report_finnish() {
        let config = ResolvedConfig::defaults().unwrap();
        let dict = finnish();
        let report =
            generate_report(&input("uusimaa", 90.0, 0.0), StoryKind::Overview, &config, &dict)
                .unwrap();
        assert_eq!(report.area, "uusimaa");
        assert_eq!(report.story, "overview");
        assert_eq!(report.language, "fi");
        assert_eq!(report.text, "Yleisesti hallaa.");
    }

    #[test]
    fn test_generate_report_english() {
        let config = ResolvedConfig::defaults().unwrap();
        let dict = english();
        let report =
            generate_report(&input("uusimaa", 90.0, 0.0), StoryKind::Overview, &config, &dict)
                .unwrap();
        assert_eq!(report.text, "Widely frost.");
    }

    #[test]
    fn test_generate_reports_sorted_by_area() {
        let config = ResolvedConfig::defaults().unwrap();
        let dict = finnish();
        let inputs = vec![
            input("uusimaa", 90.0, 0.0),
            input("lappi", 20.0, 0.0),
        ];
        let reports =
            generate_reports(&inputs, StoryKind::Overview, &config, &dict).unwrap();
        assert_eq!(reports[0].area, "lappi");
        assert_eq!(reports[1].area, "uusimaa");
    }

    #[test]
    fn test_suppressed_story_yields_empty_text() {
        let config = ResolvedConfig::defaults().unwrap();
        let dict = finnish();
        let report =
            generate_report(&input("lappi", 5.0, 0.0), StoryKind::Overview, &config, &dict)
                .unwrap();
        assert_eq!(report.text, "");
    }
}
