//! Mandatory break check.
//!
//! A day that spans more than the policy's first window must contain at
//! least the first interval's required break. When it does not, one
//! synthetic break covering the shortfall is inserted after an anchor entry
//! and every later entry is moved forward by the same amount.
//!
//! Only interval 0 is evaluated. [`BreakPolicy`] models the later intervals
//! but there is no pass over them yet.

use crate::core::calculator::policy::BreakPolicy;
use crate::core::calculator::timeline::{build_gaps, elapsed, ensure_ordered, total_pause};
use crate::core::collaborators::{
    AnchorCandidate, AnchorChoice, AnchorRequest, ChoiceProvider, DecisionStore,
};
use crate::core::decision::{CachedAnchor, DecisionCache, MissReason};
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeLogEntry;
use chrono::{Duration, NaiveDate};

/// Key under which anchor decisions of this engine are stored.
pub const BREAK_ENGINE_KEY: &str = "quicktrack.core.compliance.BreakComplianceEngine";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    Cached,
    Chosen { previous: MissReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComplianceOutcome {
    /// The day is not long enough for a break to be owed.
    NotOwed { elapsed: Duration },
    /// Enough break time was recorded.
    Satisfied { total_pause: Duration },
    /// A synthetic break was inserted after `anchor`.
    Inserted {
        anchor: usize,
        remaining: Duration,
        source: AnchorSource,
    },
    /// The anchor choice was abandoned; nothing changed.
    Cancelled { remaining: Duration },
}

#[derive(Debug, Clone)]
pub struct ComplianceReport {
    pub date: NaiveDate,
    pub entries: Vec<TimeLogEntry>,
    pub outcome: ComplianceOutcome,
}

impl ComplianceReport {
    pub fn is_adjusted(&self) -> bool {
        matches!(self.outcome, ComplianceOutcome::Inserted { .. })
    }
}

pub struct BreakComplianceEngine {
    policy: BreakPolicy,
    key: String,
}

impl BreakComplianceEngine {
    pub fn new(policy: BreakPolicy) -> Self {
        Self::with_key(policy, BREAK_ENGINE_KEY)
    }

    /// Engines sharing a decision store need distinct keys.
    pub fn with_key(policy: BreakPolicy, key: &str) -> Self {
        Self {
            policy,
            key: key.to_string(),
        }
    }

    pub fn policy(&self) -> &BreakPolicy {
        &self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check one day and return either the original or the adjusted entries.
    ///
    /// The chooser is consulted only when no valid decision is stored for
    /// the day. Out-of-order input fails with `InvalidSequenceOrder`.
    pub fn apply<S, P>(
        &self,
        date: NaiveDate,
        entries: &[TimeLogEntry],
        store: &S,
        chooser: &mut P,
    ) -> AppResult<ComplianceReport>
    where
        S: DecisionStore,
        P: ChoiceProvider,
    {
        ensure_ordered(date, entries)?;

        let unchanged = |outcome| ComplianceReport {
            date,
            entries: entries.to_vec(),
            outcome,
        };

        let elapsed = elapsed(entries);
        if elapsed <= self.policy.min_span {
            return Ok(unchanged(ComplianceOutcome::NotOwed { elapsed }));
        }

        let interval = 0;
        let gaps = build_gaps(entries);
        let total_pause = total_pause(&gaps);
        let required = self.policy.required_break(interval);
        if total_pause >= required {
            return Ok(unchanged(ComplianceOutcome::Satisfied { total_pause }));
        }

        let remaining = required - total_pause;
        let cache = DecisionCache::new(store, &self.key);

        let (anchor, source) = match cache.lookup(date, interval, entries.len())? {
            CachedAnchor::Hit(i) => (i, AnchorSource::Cached),
            CachedAnchor::Miss(previous) => {
                let window_end = entries[0].timestamp + self.policy.compliance_window_end(interval);
                let candidates: Vec<AnchorCandidate<'_>> = gaps
                    .iter()
                    .map(|g| {
                        let gap_end = g.end();
                        AnchorCandidate {
                            entry: g.entry,
                            gap_end,
                            inside_window: g.entry.timestamp <= window_end
                                && gap_end.is_none_or(|end| end <= window_end),
                        }
                    })
                    .collect();

                let request = AnchorRequest {
                    date,
                    total_pause,
                    required,
                    remaining,
                };

                match chooser.choose_anchor(&request, &candidates)? {
                    AnchorChoice::Cancelled => {
                        return Ok(unchanged(ComplianceOutcome::Cancelled { remaining }));
                    }
                    AnchorChoice::Selected(i) if i >= entries.len() => {
                        return Err(AppError::OutOfRangeDecision {
                            index: i,
                            len: entries.len(),
                        });
                    }
                    AnchorChoice::Selected(i) => {
                        cache.put(date, interval, entries.len(), i)?;
                        (i, AnchorSource::Chosen { previous })
                    }
                }
            }
        };

        Ok(ComplianceReport {
            date,
            entries: insert_with_time_shift(entries, anchor, remaining),
            outcome: ComplianceOutcome::Inserted {
                anchor,
                remaining,
                source,
            },
        })
    }
}

/// Insert a break right after `anchor`, at the point where the anchor's
/// gap used to end, and move every later entry forward by `shift`.
///
/// If `anchor` is the last entry the break takes the anchor's timestamp.
pub fn insert_with_time_shift(
    entries: &[TimeLogEntry],
    anchor: usize,
    shift: Duration,
) -> Vec<TimeLogEntry> {
    let mut out = Vec::with_capacity(entries.len() + 1);

    for (i, entry) in entries.iter().enumerate() {
        if i < anchor {
            out.push(entry.clone());
        } else if i == anchor {
            let gap_end = entries
                .get(i + 1)
                .map(|next| next.timestamp)
                .unwrap_or(entry.timestamp);
            out.push(entry.clone());
            out.push(entry.synthetic_break(gap_end));
        } else {
            out.push(entry.shifted(shift));
        }
    }

    out
}
