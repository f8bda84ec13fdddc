use thiserror::Error;

/// User facing error classes, each calling for a different remedy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NoLocalData,
    InvalidDate,
    RemoteFailure,
    Internal,
}

/// Errors that end a forecast load or query
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("no usable forecast source, tried: {}", .tried.join(", "))]
    DataUnavailable { tried: Vec<String> },
    #[error("invalid forecast record: {0}")]
    InvalidRecord(String),
    #[error("invalid date input: {0}")]
    InvalidInput(String),
    #[error("forecast api returned http status {status}")]
    RemoteError { status: u16 },
    #[error("forecast api rejected the query: {message}")]
    RemoteRejected { message: String },
    #[error("forecast api unreachable: {cause}")]
    Unreachable { cause: String },
    #[error("forecast api returned a malformed document: {0}")]
    MalformedResponse(String),
    #[error("load superseded by a newer request")]
    Superseded,
}

impl ForecastError {
    /// Returns the user facing class of the error
    pub fn class(&self) -> ErrorClass {
        match self {
            ForecastError::DataUnavailable { .. } => ErrorClass::NoLocalData,
            ForecastError::InvalidInput(_) => ErrorClass::InvalidDate,
            ForecastError::RemoteError { .. }
            | ForecastError::RemoteRejected { .. }
            | ForecastError::Unreachable { .. }
            | ForecastError::MalformedResponse(_) => ErrorClass::RemoteFailure,
            ForecastError::InvalidRecord(_) | ForecastError::Superseded => ErrorClass::Internal,
        }
    }

    /// Returns a message telling the user what went wrong and what to do about it
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::DataUnavailable { tried } =>
                format!("Unable to load forecast data. Please check that one of these exists: {}", tried.join(", ")),
            ForecastError::InvalidInput(e) =>
                format!("Please select a valid date (YYYY-MM-DD): {}", e),
            ForecastError::RemoteError { status } =>
                format!("Forecast API error: status {}", status),
            ForecastError::RemoteRejected { message } =>
                message.to_string(),
            ForecastError::Unreachable { cause } =>
                format!("Unable to connect to the forecast API server, please make sure it is running. Error: {}", cause),
            ForecastError::MalformedResponse(e) =>
                format!("Forecast API sent an unreadable answer: {}", e),
            ForecastError::InvalidRecord(e) =>
                format!("Forecast data is malformed: {}", e),
            ForecastError::Superseded =>
                "A newer request replaced this one".to_string(),
        }
    }
}

/// Failure of one static source attempt, never surfaced past the resolver
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{path}: {cause}")]
    Transport { path: String, cause: TransportError },
    #[error("{path}: http status {status}")]
    Status { path: String, status: u16 },
    #[error("{path}: json document error: {msg}")]
    Document { path: String, msg: String },
}

#[derive(Error, Debug)]
#[error("transport error: {0}")]
pub struct TransportError(pub String);
impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> TransportError {
        TransportError(format!("http request error: {}", e))
    }
}
impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> TransportError {
        TransportError(format!("io error: {}", e))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::File: {0}")]
    File(#[from] std::io::Error),
    #[error("ConfigError::Document: {0}")]
    Document(#[from] toml::de::Error),
    #[error("ConfigError::Value: {0}")]
    Value(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Value(e.to_string()) }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("LoggingError::Appender: {0}")]
    Appender(#[from] std::io::Error),
    #[error("LoggingError::Config: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("LoggingError::Init: {0}")]
    Init(#[from] log::SetLoggerError),
}
