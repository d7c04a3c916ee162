pub mod policy;
pub mod timeline;
pub mod worked;
