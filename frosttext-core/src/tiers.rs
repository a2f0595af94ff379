//! Tier tables: ordered risk breakpoints mapped to phrase templates
//!
//! Global invariants enforced:
//! - Breakpoints are strictly increasing; violations are construction
//!   errors, never discovered per call
//! - The first row is always the unbounded-below suppressed tier
//! - Tier selection is half-open and lower-inclusive; the top tier is
//!   closed above

use anyhow::Result;

/// The severity clause attached to a tier when the severe-event
/// probability meets the configured threshold.
///
/// The lowest non-empty tier states severity as a separate sentence; all
/// higher tiers embed it as a relative clause. The wording depends on the
/// tier, so the clause lives on the tier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClause {
    /// A follow-up sentence of its own
    Standalone(&'static [&'static str]),
    /// A relative clause joined to the base sentence with a comma
    Embedded(&'static [&'static str]),
}

/// One tier: a lower bound, a phrase template, and an optional severity
/// clause. An empty phrase means the tier is suppressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRow {
    pub lower_bound: f64,
    pub phrase: &'static [&'static str],
    pub severity: Option<SeverityClause>,
}

/// An ordered list of tiers over a 0-100 probability scale.
///
/// Configuration-immutable for the lifetime of a run and safe to share
/// across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    rows: Vec<TierRow>,
}

impl TierTable {
    /// Validate and build a tier table.
    ///
    /// Rejects tables whose first row is not the unbounded-below
    /// suppressed tier, and tables whose bounds are not strictly
    /// increasing.
    pub fn new(rows: Vec<TierRow>) -> Result<Self> {
        if rows.len() < 2 {
            anyhow::bail!(
                "tier table needs the suppressed tier and at least one reportable tier (got {} rows)",
                rows.len()
            );
        }
        let first = &rows[0];
        if first.lower_bound != f64::NEG_INFINITY {
            anyhow::bail!(
                "first tier must be unbounded below (got lower bound {})",
                first.lower_bound
            );
        }
        if !first.phrase.is_empty() {
            anyhow::bail!("first tier must be the suppressed (empty) tier");
        }
        for pair in rows.windows(2) {
            if pair[0].lower_bound >= pair[1].lower_bound {
                anyhow::bail!(
                    "tier bounds must be strictly increasing ({} then {})",
                    pair[0].lower_bound,
                    pair[1].lower_bound
                );
            }
        }
        for (i, row) in rows.iter().enumerate().skip(1) {
            if row.phrase.is_empty() {
                anyhow::bail!("tier {} is missing its phrase template", i);
            }
        }
        Ok(TierTable { rows })
    }

    /// Select the tier index for a value: the greatest `i` with
    /// `rows[i].lower_bound <= value`. A value exactly on a breakpoint
    /// belongs to the upper tier.
    pub fn select(&self, value: f64) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.lower_bound <= value)
            .unwrap_or(0)
    }

    pub fn row(&self, tier: usize) -> &TierRow {
        &self.rows[tier]
    }

    /// Number of tiers including the suppressed tier
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first reportable breakpoint; the default reporting floor
    pub fn first_reportable_bound(&self) -> f64 {
        self.rows[1].lower_bound
    }
}
