pub mod outline;
pub mod query;
