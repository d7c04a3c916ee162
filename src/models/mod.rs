pub mod day;
pub mod decision;
pub mod entry;
pub mod mode;
pub mod totals;
