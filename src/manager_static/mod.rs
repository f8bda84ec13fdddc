use log::{info, warn};
use crate::config::Sources;
use crate::errors::{ForecastError, SourceError};
use crate::models::forecast::{ForecastSet, Mode};
use crate::transport::{fetcher_for, Fetch};

/// One static forecast document and the shape it is expected to have
pub struct SourceSpec {
    pub path: String,
    pub mode: Mode,
}

/// Resolves which of the pre-generated forecast documents to show
pub struct SourceResolver {
    fetch: Box<dyn Fetch>,
    sources: Vec<SourceSpec>,
}

impl SourceResolver {
    /// Returns a new resolver trying the given sources in order
    ///
    /// # Arguments
    ///
    /// * 'fetch' - where to fetch the documents from
    /// * 'sources' - documents in priority order
    pub fn new(fetch: Box<dyn Fetch>, sources: Vec<SourceSpec>) -> Self {
        Self { fetch, sources }
    }

    /// Returns a resolver trying the detailed document first and then the daily one
    ///
    /// # Arguments
    ///
    /// * 'config' - static sources configuration
    pub fn from_config(config: &Sources) -> Self {
        let sources = vec![
            SourceSpec { path: config.detailed.to_string(), mode: Mode::Detailed },
            SourceSpec { path: config.daily.to_string(), mode: Mode::Daily },
        ];

        Self::new(fetcher_for(&config.location, config.timeout_secs), sources)
    }

    /// Returns the forecast set from the first source that can be fetched and parsed.
    ///
    /// Every source is fetched and parsed on its own, nothing carries over from a failed
    /// attempt. A body that comes with a non-success status is never parsed.
    pub fn resolve(&self) -> Result<ForecastSet, ForecastError> {
        for source in &self.sources {
            match self.try_source(source) {
                Ok(set) => {
                    info!("loaded {} ({}, {} days)", source.path, set.mode(), set.len());
                    return Ok(set);
                }
                Err(e) => warn!("forecast source unusable, {}", e),
            }
        }

        Err(ForecastError::DataUnavailable {
            tried: self.sources.iter().map(|s| s.path.to_string()).collect(),
        })
    }

    /// Fetches and parses one source
    ///
    /// # Arguments
    ///
    /// * 'source' - the source to try
    fn try_source(&self, source: &SourceSpec) -> Result<ForecastSet, SourceError> {
        let reply = self.fetch
            .get(&source.path, &[])
            .map_err(|cause| SourceError::Transport { path: source.path.to_string(), cause })?;

        if !reply.is_success() {
            return Err(SourceError::Status { path: source.path.to_string(), status: reply.status });
        }

        ForecastSet::parse(source.mode, &reply.body)
            .map_err(|e| SourceError::Document { path: source.path.to_string(), msg: e.to_string() })
    }
}
