use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use crate::models::forecast::{default_model_version, DetailedForecast, Location};

/// Location as reported by the forecast API, either a plain label or a full location
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaceRef {
    Name(String),
    Location(Location),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryMetadata {
    pub location: PlaceRef,
    pub generated_at: DateTime<Utc>,
    #[serde(default = "default_model_version")]
    pub model_version: String,
}

/// Raw response envelope from the forecast API
#[derive(Deserialize)]
pub struct QueryEnvelope {
    pub success: bool,
    pub error: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub week_avg_score: Option<f64>,
    pub metadata: Option<QueryMetadata>,
    #[serde(default)]
    pub forecasts: Vec<DetailedForecast>,
}

/// A week of detailed forecasts as answered by the forecast API
#[derive(Debug, Clone, PartialEq)]
pub struct WeekQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub week_avg_score: f64,
    pub metadata: QueryMetadata,
    pub forecasts: Vec<DetailedForecast>,
}

/// Business level outcome of a query, the API may accept or reject it
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Accepted(WeekQuery),
    Rejected { message: String },
}
