//! Scalar risk classification: one value, one table, one sentence
//!
//! Global invariants enforced:
//! - Pure and idempotent; identical inputs yield identical output
//! - Always terminates with a sentence or the empty sentence, never an
//!   error
//! - Tier membership is the only determinant of the base phrase

use crate::measurement::Measurement;
use crate::phrase::{Paragraph, Sentence, Token};
use crate::tiers::{SeverityClause, TierTable};
use tracing::debug;

/// Resolve the reportable tier for a value: 0 when the value is missing
/// or below the reporting floor, otherwise the table tier.
pub fn effective_tier(value: &Measurement, table: &TierTable, reporting_floor: f64) -> usize {
    match value.value {
        None => 0,
        Some(v) if v < reporting_floor => 0,
        Some(v) => table.select(v),
    }
}

/// Classify a whole-area risk value into a sentence, with an optional
/// severity clause.
///
/// A missing or below-floor value yields the empty paragraph regardless
/// of the severity input. When the severe-event probability meets
/// `severity_threshold`, the selected tier's clause is attached: a
/// separate sentence for the lowest non-empty tier, an embedded relative
/// clause for all higher tiers. Severe risk is not validated to be a
/// subset of base risk; callers supply consistent inputs.
pub fn classify(
    value: &Measurement,
    severe_value: &Measurement,
    table: &TierTable,
    severity_threshold: f64,
    reporting_floor: f64,
) -> Paragraph {
    let mut paragraph = Paragraph::new();

    let tier = effective_tier(value, table, reporting_floor);
    debug!(value = ?value.value, tier, reporting_floor, "tier selected");
    if tier == 0 {
        return paragraph;
    }

    let row = table.row(tier);
    let mut sentence = Sentence::from_phrases(row.phrase);

    let severe = matches!(severe_value.value, Some(sv) if sv >= severity_threshold);
    debug!(severe_value = ?severe_value.value, severity_threshold, severe, "severity check");

    let mut standalone = Sentence::new();
    if severe {
        match row.severity {
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

    paragraph.push(sentence);
    paragraph.push(standalone);
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiers::TierRow;

    fn table() -> TierTable {
        TierTable::new(vec![
            TierRow {
                lower_bound: f64::NEG_INFINITY,
                phrase: &[],
                severity: None,
            },
            TierRow {
                lower_bound: 20.0,
                phrase: &["low"],
                severity: Some(SeverityClause::Standalone(&["standalone severe"])),
            },
            TierRow {
                lower_bound: 50.0,
                phrase: &["high"],
                severity: Some(SeverityClause::Embedded(&["embedded severe"])),
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_missing_value_is_suppressed() {
        let p = classify(
            &Measurement::missing(),
            &Measurement::from(100.0),
            &table(),
            10.0,
            20.0,
        );
        assert!(p.is_empty());
    }

    #[test]
    fn test_below_floor_is_suppressed_regardless_of_severity() {
        let p = classify(
            &Measurement::from(15.0),
            &Measurement::from(100.0),
            &table(),
            10.0,
            20.0,
        );
        assert!(p.is_empty());
    }

    #[test]
    fn test_raised_floor_suppresses_low_tier() {
        let p = classify(
            &Measurement::from(25.0),
            &Measurement::missing(),
            &table(),
            10.0,
            40.0,
        );
        assert!(p.is_empty());
    }

    #[test]
    fn test_same_tier_same_sentence() {
        let a = classify(
            &Measurement::from(50.0),
            &Measurement::missing(),
            &table(),
            10.0,
            20.0,
        );
        let b = classify(
            &Measurement::from(64.9),
            &Measurement::missing(),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let value = Measurement::from(55.0);
        let severe = Measurement::from(12.0);
        let a = classify(&value, &severe, &table(), 10.0, 20.0);
        let b = classify(&value, &severe, &table(), 10.0, 20.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_standalone_severity_adds_second_sentence() {
        let p = classify(
            &Measurement::from(20.0),
            &Measurement::from(10.0),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(p.sentences().len(), 2);
    }

    #[test]
    fn test_embedded_severity_joins_base_sentence() {
        let p = classify(
            &Measurement::from(60.0),
            &Measurement::from(10.0),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(p.sentences().len(), 1);
        assert_eq!(
            p.sentences()[0].tokens(),
            &[
                Token::Phrase("high"),
                Token::Delimiter(","),
                Token::Phrase("embedded severe"),
            ]
        );
    }

    #[test]
    fn test_missing_severity_is_no_clause() {
        let p = classify(
            &Measurement::from(60.0),
            &Measurement::missing(),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(p.sentences().len(), 1);
        assert_eq!(p.sentences()[0].tokens(), &[Token::Phrase("high")]);
    }

    #[test]
    fn test_severity_below_threshold_is_no_clause() {
        let p = classify(
            &Measurement::from(60.0),
            &Measurement::from(9.9),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(p.sentences()[0].tokens(), &[Token::Phrase("high")]);
    }

    #[test]
    fn test_severe_above_base_is_not_validated() {
        // severe 90 > base 60; classifier still reports tier + clause
        let p = classify(
            &Measurement::from(60.0),
            &Measurement::from(90.0),
            &table(),
            10.0,
            20.0,
        );
        assert_eq!(p.sentences().len(), 1);
    }

    #[test]
    fn test_effective_tier_floor_and_missing() {
        let t = table();
        assert_eq!(effective_tier(&Measurement::missing(), &t, 20.0), 0);
        assert_eq!(effective_tier(&Measurement::from(10.0), &t, 20.0), 0);
        assert_eq!(effective_tier(&Measurement::from(20.0), &t, 20.0), 1);
        assert_eq!(effective_tier(&Measurement::from(99.0), &t, 20.0), 2);
    }
}
