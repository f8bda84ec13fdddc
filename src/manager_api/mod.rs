use chrono::NaiveDate;
use log::{info, warn};
use crate::config::Api;
use crate::errors::ForecastError;
use crate::models::query::{QueryEnvelope, QueryResult, WeekQuery};
use crate::transport::{Fetch, HttpFetch};

const FORECAST_PATH: &str = "/api/forecast";

/// Client for the forecast API answering week queries by start date
pub struct ForecastApi {
    fetch: Box<dyn Fetch>,
}

impl ForecastApi {
    /// Returns a new ForecastApi
    ///
    /// # Arguments
    ///
    /// * 'fetch' - transport to the API, paths are relative to the API base url
    pub fn new(fetch: Box<dyn Fetch>) -> Self {
        Self { fetch }
    }

    pub fn from_config(config: &Api) -> Self {
        Self::new(Box::new(HttpFetch::new(&config.base_url, config.timeout_secs)))
    }

    /// Queries the week of detailed forecasts starting at the given date.
    ///
    /// The date is validated before anything goes on the wire. A rejection reported
    /// inside a successful http response comes back as `QueryResult::Rejected`, it is
    /// up to the caller to branch on it.
    ///
    /// # Arguments
    ///
    /// * 'date' - start date as YYYY-MM-DD
    pub fn query(&self, date: &str) -> Result<QueryResult, ForecastError> {
        let date = validate_date(date)?;
        let date_param = date.format("%Y-%m-%d").to_string();

        let reply = self.fetch
            .get(FORECAST_PATH, &[("date", date_param.as_str())])
            .map_err(|e| ForecastError::Unreachable { cause: e.0 })?;

        if !reply.is_success() {
            warn!("forecast api answered {} for {}", reply.status, date_param);
            return Err(ForecastError::RemoteError { status: reply.status });
        }

        let envelope: QueryEnvelope = serde_json::from_str(&reply.body)
            .map_err(|e| ForecastError::MalformedResponse(e.to_string()))?;

        let result = envelope_to_result(envelope)?;
        match &result {
            QueryResult::Accepted(week) =>
                info!("forecast api returned {} days from {} to {}", week.forecasts.len(), week.start_date, week.end_date),
            QueryResult::Rejected { message } =>
                warn!("forecast api rejected query for {}: {}", date_param, message),
        }

        Ok(result)
    }
}

impl QueryResult {
    /// Turns a rejection into an error for callers that don't tell them apart
    pub fn into_week(self) -> Result<WeekQuery, ForecastError> {
        match self {
            QueryResult::Accepted(week) => Ok(week),
            QueryResult::Rejected { message } => Err(ForecastError::RemoteRejected { message }),
        }
    }
}

/// Checks that a date is given and well-formed
///
/// # Arguments
///
/// * 'date' - the date as entered by the user
fn validate_date(date: &str) -> Result<NaiveDate, ForecastError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ForecastError::InvalidInput("no date given".to_string()));
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| ForecastError::InvalidInput(format!("'{}': {}", date, e)))
}

/// Maps the response envelope onto a query result
///
/// # Arguments
///
/// * 'envelope' - the parsed response
fn envelope_to_result(envelope: QueryEnvelope) -> Result<QueryResult, ForecastError> {
    if !envelope.success {
        let message = envelope.error.unwrap_or_else(|| "unknown error".to_string());
        return Ok(QueryResult::Rejected { message });
    }

    let missing = |field: &str| ForecastError::MalformedResponse(format!("successful response without {}", field));

    Ok(QueryResult::Accepted(WeekQuery {
        start_date: envelope.start_date.ok_or_else(|| missing("start_date"))?,
        end_date: envelope.end_date.ok_or_else(|| missing("end_date"))?,
        week_avg_score: envelope.week_avg_score.ok_or_else(|| missing("week_avg_score"))?,
        metadata: envelope.metadata.ok_or_else(|| missing("metadata"))?,
        forecasts: envelope.forecasts,
    }))
}
