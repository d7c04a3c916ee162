use serde::{Deserialize, Serialize};

/// Where a synthetic break was inserted for a day, and under which
/// entry count the choice was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionDecision {
    pub interval_index: usize,
    pub total_entries: usize,
    pub after_entry_index: usize,
}
