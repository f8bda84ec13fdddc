use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use log::debug;
use ureq::Agent;
use crate::errors::TransportError;

/// A fetched document together with its status
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something documents can be fetched from by relative path
pub trait Fetch {
    /// Fetches a document
    ///
    /// A non-success status is not an error at this level, only failing to get any
    /// answer at all is.
    ///
    /// # Arguments
    ///
    /// * 'path' - path relative to the fetcher's base
    /// * 'query' - query parameters, ignored where there is no notion of them
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Reply, TransportError>;
}

/// Fetches documents over http(s) from a base url
pub struct HttpFetch {
    agent: Agent,
    base_url: String,
}

impl HttpFetch {
    /// Returns a new HttpFetch
    ///
    /// # Arguments
    ///
    /// * 'base_url' - the url all paths are relative to
    /// * 'timeout_secs' - global timeout for each request
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .http_status_as_error(false)
            .build();

        let agent = config.into();

        Self { agent, base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl Fetch for HttpFetch {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Reply, TransportError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("GET {}", url);

        let mut req = self.agent.get(url.as_str());
        for &(key, value) in query {
            req = req.query(key, value);
        }

        let mut res = req.call()?;
        let status = res.status().as_u16();

        // Bodies of failed replies are never used, so they are not read either
        if !res.status().is_success() {
            return Ok(Reply { status, body: String::new() });
        }
        let body = res.body_mut().read_to_string()?;

        Ok(Reply { status, body })
    }
}

/// Fetches documents from a local directory
pub struct FileFetch {
    root: PathBuf,
}

impl FileFetch {
    pub fn new(root: &str) -> Self {
        Self { root: PathBuf::from(root) }
    }
}

impl Fetch for FileFetch {
    fn get(&self, path: &str, _query: &[(&str, &str)]) -> Result<Reply, TransportError> {
        let file_path = self.root.join(path);
        debug!("reading {}", file_path.display());

        match fs::read_to_string(&file_path) {
            Ok(body) => Ok(Reply { status: 200, body }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Reply { status: 404, body: String::new() }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Returns a fetcher for the given location, http(s) urls are fetched over the network
/// and anything else is taken as a directory
///
/// # Arguments
///
/// * 'location' - base url or directory
/// * 'timeout_secs' - request timeout for network fetches
pub fn fetcher_for(location: &str, timeout_secs: u64) -> Box<dyn Fetch> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFetch::new(location, timeout_secs))
    } else {
        Box::new(FileFetch::new(location))
    }
}
