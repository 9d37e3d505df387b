pub mod middleware;
pub mod query;
