#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime};
use quicktrack::core::collaborators::{
    AnchorCandidate, AnchorChoice, AnchorRequest, ChoiceProvider, DecisionStore,
};
use quicktrack::errors::AppResult;
use quicktrack::models::decision::InsertionDecision;
use quicktrack::models::entry::TimeLogEntry;
use quicktrack::models::mode::TimeLogMode;
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn qt() -> Command {
    cargo_bin_cmd!("quicktrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_quicktrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `init` in test mode (no config file written).
pub fn init_db(db_path: &str) {
    qt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Log one entry through the CLI at a fixed date and time.
pub fn log_at(db_path: &str, date: &str, time: &str, mode: &str, text: &str) {
    qt().args([
        "--db", db_path, "--test", "log", text, "--mode", mode, "--date", date, "--at", time,
    ])
    .assert()
    .success();
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(date: NaiveDate, h: u32, min: u32) -> NaiveDateTime {
    date.and_hms_opt(h, min, 0).unwrap()
}

/// Build a day from (HH, MM, mode) triples; ids start at 1.
pub fn entries(date: NaiveDate, spec: &[(u32, u32, TimeLogMode)]) -> Vec<TimeLogEntry> {
    spec.iter()
        .enumerate()
        .map(|(i, (h, m, mode))| {
            TimeLogEntry::new(i as i64 + 1, at(date, *h, *m), *mode, &format!("entry {}", i + 1))
                .with_project("proj")
        })
        .collect()
}

/// In-memory decision store.
#[derive(Default)]
pub struct MemoryStore {
    pub decisions: RefCell<HashMap<(NaiveDate, String), InsertionDecision>>,
    pub writes: RefCell<usize>,
}

impl DecisionStore for MemoryStore {
    fn read_decision(&self, date: NaiveDate, key: &str) -> AppResult<Option<InsertionDecision>> {
        Ok(self.decisions.borrow().get(&(date, key.to_string())).copied())
    }

    fn write_decision(
        &self,
        date: NaiveDate,
        key: &str,
        decision: &InsertionDecision,
    ) -> AppResult<()> {
        *self.writes.borrow_mut() += 1;
        self.decisions
            .borrow_mut()
            .insert((date, key.to_string()), *decision);
        Ok(())
    }
}

/// Answers from a fixed script and records what it was shown.
pub struct ScriptedChooser {
    pub answers: Vec<AnchorChoice>,
    pub calls: usize,
    pub last_window_hints: Vec<bool>,
    pub last_request: Option<AnchorRequest>,
}

impl ScriptedChooser {
    pub fn new(answers: &[AnchorChoice]) -> Self {
        Self {
            answers: answers.to_vec(),
            calls: 0,
            last_window_hints: Vec::new(),
            last_request: None,
        }
    }

    pub fn always(index: usize) -> Self {
        Self::new(&[AnchorChoice::Selected(index); 8])
    }
}

impl ChoiceProvider for ScriptedChooser {
    fn choose_anchor(
        &mut self,
        request: &AnchorRequest,
        candidates: &[AnchorCandidate<'_>],
    ) -> AppResult<AnchorChoice> {
        let answer = self
            .answers
            .get(self.calls)
            .copied()
            .unwrap_or(AnchorChoice::Cancelled);
        self.calls += 1;
        self.last_window_hints = candidates.iter().map(|c| c.inside_window).collect();
        self.last_request = Some(*request);
        Ok(answer)
    }
}
