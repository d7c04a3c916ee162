pub mod audit;
pub mod breaks;
pub mod calculator;
pub mod collaborators;
pub mod compliance;
pub mod config;
pub mod decision;
pub mod del;
pub mod edit;
pub mod list;
pub mod log;
pub mod projects;
pub mod search;
pub mod total;
pub mod undo;
