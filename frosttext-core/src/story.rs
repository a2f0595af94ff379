//! Built-in stories: the closed set of tagged classification configurations
//!
//! Every story shares one behavioral shape (tier -> phrase -> optional
//! severity clause); only the data differs, so stories are enum-selected
//! configurations rather than a class per phenomenon.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::classify;
use crate::combiner::{one_night, RegionalParams};
use crate::config::ResolvedConfig;
use crate::measurement::Measurement;
use crate::phrase::{Paragraph, Sentence, Token};
use crate::region::{RegionId, RegionInput};
use crate::tiers::{SeverityClause, TierRow, TierTable};

/// The whole-area overview tier table (breakpoints 20/30/50/70/90)
pub fn overview_table() -> Result<TierTable> {
    TierTable::new(vec![
        TierRow {
            lower_bound: f64::NEG_INFINITY,
            phrase: &[],
            severity: None,
        },
        TierRow {
            lower_bound: 20.0,
            phrase: &["hallanaroilla alueilla", "hallanvaara"],
            severity: Some(SeverityClause::Standalone(&["paikoin", "ankaraa hallaa"])),
        },
        TierRow {
            lower_bound: 30.0,
            phrase: &["mahdollisesti", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka paikoin voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 50.0,
            phrase: &["paikoin", "hallaa", "tai", "selkeillä alueilla", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka paikoin voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 70.0,
            phrase: &["monin paikoin", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 90.0,
            phrase: &["yleisesti", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka voi olla ankaraa"])),
        },
    ])
}

/// The per-region tier table (breakpoints 10/25/45/65/85)
pub fn regional_table() -> Result<TierTable> {
    TierTable::new(vec![
        TierRow {
            lower_bound: f64::NEG_INFINITY,
            phrase: &[],
            severity: None,
        },
        TierRow {
            lower_bound: 10.0,
            phrase: &["alavilla mailla", "hallan vaara"],
            severity: Some(SeverityClause::Standalone(&["paikoin", "ankaraa hallaa"])),
        },
        TierRow {
            lower_bound: 25.0,
            phrase: &["mahdollisesti", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka paikoin voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 45.0,
            phrase: &["paikoin", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka paikoin voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 65.0,
            phrase: &["monin paikoin", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka voi olla ankaraa"])),
        },
        TierRow {
            lower_bound: 85.0,
            phrase: &["yleisesti", "hallaa"],
            severity: Some(SeverityClause::Embedded(&["joka voi olla ankaraa"])),
        },
    ])
}

/// Which story to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoryKind {
    /// Whole-area tiered sentence over the overview table
    Overview,
    /// Coast/inland gated classification and combination
    OneNight,
    /// Plain numeric probability sentence
    Probability,
}

impl StoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryKind::Overview => "overview",
            StoryKind::OneNight => "one-night",
            StoryKind::Probability => "probability",
        }
    }
}

/// One area's measurements, as supplied by the upstream aggregation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AreaInput {
    /// Area name, used for reporting and per-area season overrides
    pub area: String,

    /// Whole-area risk probability (overview and probability stories)
    #[serde(default)]
    pub risk_probability: Option<Measurement>,

    /// Whole-area severe-event probability
    #[serde(default)]
    pub severe_probability: Option<Measurement>,

    /// Per-region measurements (one-night story)
    #[serde(default)]
    pub regions: Vec<RegionInput>,
}

impl AreaInput {
    fn region(&self, id: RegionId) -> Result<&RegionInput> {
        let mut found = None;
        for region in &self.regions {
            if region.region == id {
                if found.is_some() {
                    anyhow::bail!(
                        "area '{}' supplies the {} region twice",
                        self.area,
                        id.as_str()
                    );
                }
                found = Some(region);
            }
        }
        found.ok_or_else(|| {
            anyhow::anyhow!("area '{}' is missing the {} region", self.area, id.as_str())
        })
    }
}

/// Generate one story for one area.
///
/// Pure: all inputs are passed by value or shared reference, and the
/// same inputs always produce the same paragraph.
pub fn generate(input: &AreaInput, story: StoryKind, config: &ResolvedConfig) -> Result<Paragraph> {
    debug!(area = %input.area, story = story.as_str(), "generating story");
    match story {
        StoryKind::Overview => {
            let table = overview_table()?;
            Ok(classify(
                &input.risk_probability.unwrap_or(Measurement::missing()),
                &input.severe_probability.unwrap_or(Measurement::missing()),
                &table,
                config.overview_severity_threshold,
                config.overview_floor,
            ))
        }
        StoryKind::OneNight => {
            let table = regional_table()?;
            let params = RegionalParams {
                reporting_floor: config.regional_floor,
                severity_threshold: config.regional_severity_threshold,
                min_season_coverage: config.min_season_for(&input.area),
                max_existing_coverage: config.max_existing_coverage,
            };
            let coastal = input.region(RegionId::Coast)?;
            let inland = input.region(RegionId::Inland)?;
            one_night(coastal, inland, &table, &params)
        }
        StoryKind::Probability => Ok(probability(
            &input.risk_probability.unwrap_or(Measurement::missing()),
            &input.severe_probability.unwrap_or(Measurement::missing()),
            config,
        )),
    }
}

/// The plain probability sentence: severe probability wins when it meets
/// its limit, the base probability is reported above its own limit, and
/// anything else is suppressed.
fn probability(
    value: &Measurement,
    severe_value: &Measurement,
    config: &ResolvedConfig,
) -> Paragraph {
    let mut paragraph = Paragraph::new();

    if let Some(sv) = severe_value.value {
        if sv >= config.probability_severe_limit {
            let mut sentence =
                Sentence::from_phrases(&["ankaran hallan todennäköisyys", "on"]);
            sentence.push(Token::Percentage(sv.round() as i64));
            paragraph.push(sentence);
            return paragraph;
        }
    }
    if let Some(v) = value.value {
        if v >= config.probability_normal_limit {
            let mut sentence = Sentence::from_phrases(&["hallan todennäköisyys", "on"]);
            sentence.push(Token::Percentage(v.round() as i64));
            paragraph.push(sentence);
        }
    }
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::finnish;
    use crate::render::Renderer;

    fn render(paragraph: &Paragraph) -> String {
        let dict = finnish();
        Renderer::new(&dict).render_paragraph(paragraph).unwrap()
    }

    fn overview_input(risk: f64, severe: f64) -> AreaInput {
        AreaInput {
            area: "testmaa".to_string(),
            risk_probability: Some(Measurement::from(risk)),
            severe_probability: Some(Measurement::from(severe)),
            regions: Vec::new(),
        }
    }

    fn region(id: RegionId, season: f64, existing: f64, risk: f64, severe: f64) -> RegionInput {
        RegionInput {
            region: id,
            season_coverage: Measurement::from(season),
            existing_event_coverage: Measurement::from(existing),
            risk_probability: Measurement::from(risk),
            severe_probability: Measurement::from(severe),
        }
    }

    fn one_night_input(coastal: RegionInput, inland: RegionInput) -> AreaInput {
        AreaInput {
            area: "testmaa".to_string(),
            risk_probability: None,
            severe_probability: None,
            regions: vec![coastal, inland],
        }
    }

    // Overview acceptance table: floor 20, severity threshold 10.

    #[test]
    fn test_overview_zero_is_suppressed() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(0.0, 0.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "");
    }

    #[test]
    fn test_overview_tier1() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(20.0, 0.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "Hallanaroilla alueilla hallanvaara.");
    }

    #[test]
    fn test_overview_tier1_severe() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(20.0, 10.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(
            render(&p),
            "Hallanaroilla alueilla hallanvaara. Paikoin ankaraa hallaa."
        );
    }

    #[test]
    fn test_overview_tier2_severe() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(30.0, 10.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "Mahdollisesti hallaa, joka paikoin voi olla ankaraa.");
    }

    #[test]
    fn test_overview_tier3() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(50.0, 0.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "Paikoin hallaa tai selkeillä alueilla hallaa.");
    }

    #[test]
    fn test_overview_tier4_severe() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(70.0, 10.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "Monin paikoin hallaa, joka voi olla ankaraa.");
    }

    #[test]
    fn test_overview_tier5() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(90.0, 0.0), StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "Yleisesti hallaa.");
    }

    #[test]
    fn test_overview_missing_risk_is_suppressed() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = AreaInput {
            area: "testmaa".to_string(),
            risk_probability: None,
            severe_probability: Some(Measurement::from(50.0)),
            regions: Vec::new(),
        };
        let p = generate(&input, StoryKind::Overview, &config).unwrap();
        assert_eq!(render(&p), "");
    }

    // Regional acceptance table: floor 10, min season 33.3, max existing 20.

    #[test]
    fn test_one_night_coastal_only() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = one_night_input(
            region(RegionId::Coast, 95.0, 0.0, 15.0, 0.0),
            region(RegionId::Inland, 20.0, 0.0, 50.0, 0.0),
        );
        let p = generate(&input, StoryKind::OneNight, &config).unwrap();
        assert_eq!(render(&p), "Rannikolla mahdollisesti hallaa.");
    }

    #[test]
    fn test_one_night_equal_lowest_tiers() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = one_night_input(
            region(RegionId::Coast, 100.0, 0.0, 10.0, 0.0),
            region(RegionId::Inland, 100.0, 0.0, 15.0, 0.0),
        );
        let p = generate(&input, StoryKind::OneNight, &config).unwrap();
        assert_eq!(render(&p), "Alavilla mailla hallan vaara.");
    }

    #[test]
    fn test_one_night_dominant_coast_severe() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = one_night_input(
            region(RegionId::Coast, 100.0, 0.0, 90.0, 25.0),
            region(RegionId::Inland, 100.0, 0.0, 5.0, 0.0),
        );
        let p = generate(&input, StoryKind::OneNight, &config).unwrap();
        assert_eq!(render(&p), "Rannikolla hallaa, joka voi olla ankaraa.");
    }

    #[test]
    fn test_one_night_both_inactive() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = one_night_input(
            region(RegionId::Coast, 10.0, 0.0, 50.0, 0.0),
            region(RegionId::Inland, 15.0, 0.0, 50.0, 0.0),
        );
        let p = generate(&input, StoryKind::OneNight, &config).unwrap();
        assert_eq!(render(&p), "");
    }

    #[test]
    fn test_one_night_area_season_override() {
        let mut config = ResolvedConfig::defaults().unwrap();
        config
            .season_overrides
            .insert("testmaa".to_string(), 60.0);
        // 50% season coverage admits under the default 33.3 but not
        // under the 60% override
        let input = one_night_input(
            region(RegionId::Coast, 50.0, 0.0, 50.0, 0.0),
            region(RegionId::Inland, 50.0, 0.0, 50.0, 0.0),
        );
        let p = generate(&input, StoryKind::OneNight, &config).unwrap();
        assert_eq!(render(&p), "");
    }

    #[test]
    fn test_one_night_missing_region_is_error() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = AreaInput {
            area: "testmaa".to_string(),
            risk_probability: None,
            severe_probability: None,
            regions: vec![region(RegionId::Coast, 95.0, 0.0, 15.0, 0.0)],
        };
        assert!(generate(&input, StoryKind::OneNight, &config).is_err());
    }

    #[test]
    fn test_one_night_duplicate_region_is_error() {
        let config = ResolvedConfig::defaults().unwrap();
        let input = AreaInput {
            area: "testmaa".to_string(),
            risk_probability: None,
            severe_probability: None,
            regions: vec![
                region(RegionId::Coast, 95.0, 0.0, 15.0, 0.0),
                region(RegionId::Coast, 95.0, 0.0, 15.0, 0.0),
                region(RegionId::Inland, 95.0, 0.0, 15.0, 0.0),
            ],
        };
        assert!(generate(&input, StoryKind::OneNight, &config).is_err());
    }

    // Probability story: normal limit 50, severe limit 30.

    #[test]
    fn test_probability_reports_severe_first() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(80.0, 40.0), StoryKind::Probability, &config).unwrap();
        assert_eq!(render(&p), "Ankaran hallan todennäköisyys on 40%.");
    }

    #[test]
    fn test_probability_reports_base() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(80.0, 10.0), StoryKind::Probability, &config).unwrap();
        assert_eq!(render(&p), "Hallan todennäköisyys on 80%.");
    }

    #[test]
    fn test_probability_below_limits_is_suppressed() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(40.0, 10.0), StoryKind::Probability, &config).unwrap();
        assert_eq!(render(&p), "");
    }

    #[test]
    fn test_probability_rounds_value() {
        let config = ResolvedConfig::defaults().unwrap();
        let p = generate(&overview_input(72.6, 0.0), StoryKind::Probability, &config).unwrap();
        assert_eq!(render(&p), "Hallan todennäköisyys on 73%.");
    }

    #[test]
    fn test_story_kind_serde() {
        let kind: StoryKind = serde_json::from_str(r#""one-night""#).unwrap();
        assert_eq!(kind, StoryKind::OneNight);
        assert_eq!(StoryKind::Probability.as_str(), "probability");
    }

    #[test]
    fn test_builtin_tables_validate() {
        assert!(overview_table().is_ok());
        assert!(regional_table().is_ok());
        assert_eq!(overview_table().unwrap().first_reportable_bound(), 20.0);
        assert_eq!(regional_table().unwrap().first_reportable_bound(), 10.0);
    }
}
