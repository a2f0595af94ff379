//! Regional combiner: merge coastal and inland outcomes into one sentence
//!
//! The mixed-tier sentence shapes are not derivable from a closed-form
//! rule; they are kept as a literal lookup table over the
//! (coastal, inland) outcome pair. Equal-tier pairs fall back to the
//! tier table's own whole-area phrase.

use anyhow::Result;
use tracing::debug;

use crate::classifier::effective_tier;
use crate::gate::admit;
use crate::phrase::{Paragraph, Sentence, Token};
use crate::region::{RegionId, RegionInput, RegionOutcome};
use crate::tiers::{SeverityClause, TierTable};

/// Thresholds for one regional evaluation, resolved from configuration
/// by the caller (per-area season override already applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalParams {
    pub reporting_floor: f64,
    pub severity_threshold: f64,
    pub min_season_coverage: f64,
    pub max_existing_coverage: f64,
}

const ALAVILLA_MAILLA_HALLAN_VAARA: &[&str] = &["alavilla mailla", "hallan vaara"];
const MAHDOLLISESTI_HALLAA: &[&str] = &["mahdollisesti", "hallaa"];
const PAIKOIN_HALLAA: &[&str] = &["paikoin", "hallaa"];
const MONIN_PAIKOIN_HALLAA: &[&str] = &["monin paikoin", "hallaa"];
const YLEISESTI_HALLAA: &[&str] = &["yleisesti", "hallaa"];
const HALLAA: &[&str] = &["hallaa"];

fn whole(phrase: &'static [&'static str]) -> Sentence {
    Sentence::from_phrases(phrase)
}

fn qualified(region: RegionId, phrase: &'static [&'static str]) -> Sentence {
    let mut sentence = Sentence::from_phrases(&[region.phrase_key()]);
    sentence.extend(Sentence::from_phrases(phrase));
    sentence
}

fn compound(
    first: RegionId,
    first_phrase: &'static [&'static str],
    second: RegionId,
    second_phrase: &'static [&'static str],
) -> Sentence {
    let mut sentence = qualified(first, first_phrase);
    sentence.push(Token::Delimiter(","));
    sentence.extend(qualified(second, second_phrase));
    sentence
}

/// Evaluate the gate and tier for one region
pub fn region_outcome(
    input: &RegionInput,
    table: &TierTable,
    params: &RegionalParams,
) -> RegionOutcome {
    if !admit(
        &input.season_coverage,
        &input.existing_event_coverage,
        params.min_season_coverage,
        params.max_existing_coverage,
    ) {
        return RegionOutcome::Inactive;
    }
    let tier = effective_tier(&input.risk_probability, table, params.reporting_floor);
    let severe =
        matches!(input.severe_probability.value, Some(v) if v >= params.severity_threshold);
    RegionOutcome::Active { tier, severe }
}

/// The story-selection table.
///
/// `None` is a structurally inactive region; `Some(0)` is admitted but
/// below the lowest reportable tier. One-sided active regions are
/// qualified by their region name; equal tiers collapse to the
/// whole-area phrase; the remaining mixed pairs are literal entries.
fn combine(coastal: Option<usize>, inland: Option<usize>, table: &TierTable) -> Sentence {
    use RegionId::{Coast, Inland};

    match (coastal, inland) {
        // Nothing reportable anywhere.
        (None, None) | (None, Some(0)) | (Some(0), None) | (Some(0), Some(0)) => Sentence::new(),

        // One-sided activity: qualify with the region name. The lowest
        // reportable tier renders "mahdollisesti hallaa" here, not its
        // whole-area idiom.
        (Some(1), None) => qualified(Coast, MAHDOLLISESTI_HALLAA),
        (Some(2), None) | (Some(2), Some(0)) => qualified(Coast, MAHDOLLISESTI_HALLAA),
        (Some(3), None) | (Some(3), Some(0)) => qualified(Coast, PAIKOIN_HALLAA),
        (Some(4), None) | (Some(4), Some(0)) => qualified(Coast, MONIN_PAIKOIN_HALLAA),
        (Some(5), None) | (Some(5), Some(0)) => qualified(Coast, HALLAA),
        (None, Some(1)) => qualified(Inland, MAHDOLLISESTI_HALLAA),
        (None, Some(2)) => qualified(Inland, MAHDOLLISESTI_HALLAA),
        (None, Some(3)) => qualified(Inland, PAIKOIN_HALLAA),
        (None, Some(4)) => qualified(Inland, MONIN_PAIKOIN_HALLAA),
        (None, Some(5)) => qualified(Inland, YLEISESTI_HALLAA),

        // Coast below the floor but inland reportable.
        (Some(0), Some(1)) => qualified(Inland, ALAVILLA_MAILLA_HALLAN_VAARA),
        (Some(0), Some(2)) => qualified(Inland, MAHDOLLISESTI_HALLAA),
        (Some(0), Some(3)) => qualified(Inland, PAIKOIN_HALLAA),
        (Some(0), Some(4)) => qualified(Inland, MONIN_PAIKOIN_HALLAA),
        (Some(0), Some(5)) => qualified(Inland, YLEISESTI_HALLAA),

        // Equal tiers: the whole-area phrase from the tier table.
        (Some(c), Some(i)) if c == i => whole(table.row(c).phrase),

        // Adjacent-tier pairs absorb into one whole-area phrase.
        (Some(1), Some(0)) => whole(ALAVILLA_MAILLA_HALLAN_VAARA),
        (Some(1), Some(2)) | (Some(2), Some(1)) => whole(MAHDOLLISESTI_HALLAA),
        (Some(1), Some(3)) | (Some(2), Some(3)) | (Some(3), Some(2)) => whole(PAIKOIN_HALLAA),

        // Wide splits become compound two-clause sentences; clause
        // order is fixed per entry.
        (Some(1), Some(4)) => qualified(Inland, MONIN_PAIKOIN_HALLAA),
        (Some(1), Some(5)) => qualified(Inland, YLEISESTI_HALLAA),
        (Some(2), Some(4)) => {
            compound(Inland, MONIN_PAIKOIN_HALLAA, Coast, MAHDOLLISESTI_HALLAA)
        }
        (Some(2), Some(5)) => compound(Inland, YLEISESTI_HALLAA, Coast, MAHDOLLISESTI_HALLAA),
        (Some(3), Some(1)) => compound(Inland, ALAVILLA_MAILLA_HALLAN_VAARA, Coast, PAIKOIN_HALLAA),
        (Some(3), Some(4)) => whole(MONIN_PAIKOIN_HALLAA),
        (Some(3), Some(5)) => compound(Inland, YLEISESTI_HALLAA, Coast, PAIKOIN_HALLAA),
        (Some(4), Some(1)) => {
            compound(Inland, ALAVILLA_MAILLA_HALLAN_VAARA, Coast, MONIN_PAIKOIN_HALLAA)
        }
        (Some(4), Some(2)) => compound(Coast, MONIN_PAIKOIN_HALLAA, Inland, MAHDOLLISESTI_HALLAA),
        (Some(4), Some(3)) => compound(Inland, PAIKOIN_HALLAA, Coast, MONIN_PAIKOIN_HALLAA),
        (Some(5), Some(1)) => compound(Inland, ALAVILLA_MAILLA_HALLAN_VAARA, Coast, HALLAA),
        (Some(5), Some(2)) => compound(Coast, HALLAA, Inland, MAHDOLLISESTI_HALLAA),
        (Some(5), Some(3)) => compound(Coast, HALLAA, Inland, PAIKOIN_HALLAA),
        (Some(5), Some(4)) => compound(Coast, HALLAA, Inland, MONIN_PAIKOIN_HALLAA),
        (Some(4), Some(5)) => whole(YLEISESTI_HALLAA),

        _ => Sentence::new(),
    }
}

/// Merge two per-region outcomes into the final paragraph.
///
/// The inputs must be exactly one coastal and one inland region, in that
/// order; anything else is a configuration error, not a data condition.
pub fn one_night(
    coastal: &RegionInput,
    inland: &RegionInput,
    table: &TierTable,
    params: &RegionalParams,
) -> Result<Paragraph> {
    if coastal.region != RegionId::Coast {
        anyhow::bail!(
            "combiner expects a coastal region first (got {})",
            coastal.region.as_str()
        );
    }
    if inland.region != RegionId::Inland {
        anyhow::bail!(
            "combiner expects an inland region second (got {})",
            inland.region.as_str()
        );
    }

    let coastal_outcome = region_outcome(coastal, table, params);
    let inland_outcome = region_outcome(inland, table, params);
    debug!(?coastal_outcome, ?inland_outcome, "regional outcomes");

    let mut sentence = combine(coastal_outcome.tier(), inland_outcome.tier(), table);

    let mut paragraph = Paragraph::new();
    let mut standalone = Sentence::new();

    if !sentence.is_empty() {
        if let Some((tier, severe)) = dominant(&coastal_outcome, &inland_outcome) {
            if severe && tier >= 1 {
                match table.row(tier).severity {
                    Some(SeverityClause::Embedded(clause)) => {
                        sentence.push(Token::Delimiter(","));
                        sentence.extend(Sentence::from_phrases(clause));
                    }
                    Some(SeverityClause::Standalone(clause)) => {
                        standalone = Sentence::from_phrases(clause);
                    }
                    None => {}
                }
            }
        }
    }

    paragraph.push(sentence);
    paragraph.push(standalone);
    Ok(paragraph)
}

/// The highest reported tier and its severity flag; ties take either
/// region's flag.
fn dominant(coastal: &RegionOutcome, inland: &RegionOutcome) -> Option<(usize, bool)> {
    match (coastal.tier(), inland.tier()) {
        (None, None) => None,
        (Some(c), None) => Some((c, coastal.is_severe())),
        (None, Some(i)) => Some((i, inland.is_severe())),
        (Some(c), Some(i)) => {
            if c > i {
                Some((c, coastal.is_severe()))
            } else if i > c {
                Some((i, inland.is_severe()))
            } else {
                Some((c, coastal.is_severe() || inland.is_severe()))
            }
        }
    }
}
