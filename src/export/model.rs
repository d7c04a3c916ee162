use crate::core::calculator::timeline::build_gaps;
use crate::models::entry::TimeLogEntry;
use serde::Serialize;

/// Flat export row: one entry and the minutes until the next one.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub time: String,
    pub mode: String,
    pub project: String,
    pub location: String,
    pub message: String,
    pub minutes: i64,
    pub inserted: bool,
}

/// Rows for one (already break-adjusted) day. The last entry has no
/// following segment and exports zero minutes.
pub(crate) fn day_rows(entries: &[TimeLogEntry], all_modes: bool) -> Vec<EntryExport> {
    build_gaps(entries)
        .into_iter()
        .filter(|g| all_modes || g.entry.mode.is_exported())
        .map(|g| {
            let e = g.entry;
            EntryExport {
                id: e.id,
                date: e.date().format("%Y-%m-%d").to_string(),
                time: e.time_str(),
                mode: e.mode.to_db_str().to_string(),
                project: e.project.clone(),
                location: e.location.clone(),
                message: e.message.clone(),
                minutes: g.duration.map(|d| d.num_minutes()).unwrap_or(0),
                inserted: e.synthetic,
            }
        })
        .collect()
}
