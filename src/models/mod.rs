pub mod forecast;
pub mod query;
