pub mod models;
pub mod summaries;
pub mod system;
