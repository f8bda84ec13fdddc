use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};
use log::info;
use crate::best_slot::pick_best_night_slot;
use crate::config::Config;
use crate::errors::ForecastError;
use crate::manager_api::ForecastApi;
use crate::manager_static::SourceResolver;
use crate::models::forecast::{DailyForecast, DetailedForecast, ForecastSet, Location, Mode, Timeslot};
use crate::models::query::{PlaceRef, WeekQuery};
use crate::normalize::normalize;

/// What the user asked to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// The pre-generated best week, from the static sources
    BestWeek,
    /// The week starting at the given date, from the forecast API
    Week { start: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Static(Mode),
    Api,
}

/// Header information of a forecast page
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader {
    pub location: String,
    pub generated_at: DateTime<Utc>,
    pub model_version: String,
    pub source: PageSource,
    pub subtitle: String,
}

impl PageHeader {
    pub fn mode_label(&self) -> String {
        match &self.source {
            PageSource::Static(mode) => mode.to_string(),
            PageSource::Api => "API dynamic query".to_string(),
        }
    }
}

/// A detailed day together with its locally selected best night slot
#[derive(Debug, Clone, PartialEq)]
pub struct DetailedDay {
    pub forecast: DetailedForecast,
    pub best_night: Timeslot,
}

/// Ordered day cards, ready for presentation
#[derive(Debug, Clone, PartialEq)]
pub enum DayCards {
    Daily(Vec<DailyForecast>),
    Detailed(Vec<DetailedDay>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPage {
    pub view: ViewState,
    pub header: PageHeader,
    pub days: DayCards,
}

/// Monotonic request counter, only the latest request may deliver a page
#[derive(Default)]
pub struct Generation(AtomicU64);

impl Generation {
    /// Starts a new request and returns its ticket
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Acquires, orders and selects forecasts for a view
pub struct ForecastView {
    resolver: SourceResolver,
    api: ForecastApi,
    generation: Arc<Generation>,
}

impl ForecastView {
    /// Returns a new ForecastView
    ///
    /// # Arguments
    ///
    /// * 'resolver' - resolver for the static sources
    /// * 'api' - client for the forecast API
    /// * 'generation' - request counter, may be shared with whoever issues loads
    pub fn new(resolver: SourceResolver, api: ForecastApi, generation: Arc<Generation>) -> Self {
        Self { resolver, api, generation }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SourceResolver::from_config(&config.sources),
            ForecastApi::from_config(&config.api),
            Arc::new(Generation::default()),
        )
    }

    /// Loads the page for the given view.
    ///
    /// A load that completes after a newer load has started is discarded with
    /// `ForecastError::Superseded`.
    ///
    /// # Arguments
    ///
    /// * 'view' - what to load
    pub fn load(&self, view: &ViewState) -> Result<ForecastPage, ForecastError> {
        let ticket = self.generation.next();

        let result = match view {
            ViewState::BestWeek => self.best_week(),
            ViewState::Week { start } => self.week(start),
        };

        // Failures of an outdated request are discarded just like its pages
        if !self.generation.is_current(ticket) {
            info!("discarding result of request {}, a newer request exists", ticket);
            return Err(ForecastError::Superseded);
        }

        result
    }

    /// Loads the default best week view from the static sources, never the API
    pub fn resolve_local_default(&self) -> Result<ForecastPage, ForecastError> {
        self.load(&ViewState::BestWeek)
    }

    fn best_week(&self) -> Result<ForecastPage, ForecastError> {
        let set = self.resolver.resolve()?;
        let location = location_label(set.location());
        let generated_at = set.generated_at();
        let model_version = set.model_version().to_string();

        let (source, days) = match set {
            ForecastSet::Detailed(file) => (PageSource::Static(Mode::Detailed), DayCards::Detailed(select_detailed(&file.forecasts)?)),
            ForecastSet::Daily(file) => (PageSource::Static(Mode::Daily), DayCards::Daily(normalize(&file.forecasts))),
        };

        let header = PageHeader {
            location,
            generated_at,
            model_version,
            source,
            subtitle: "7-Day Viewing Conditions - Best Week".to_string(),
        };

        Ok(ForecastPage { view: ViewState::BestWeek, header, days })
    }

    fn week(&self, start: &str) -> Result<ForecastPage, ForecastError> {
        let WeekQuery { start_date, end_date, week_avg_score, metadata, forecasts } =
            self.api.query(start)?.into_week()?;

        let location = match &metadata.location {
            PlaceRef::Name(name) => name.to_string(),
            PlaceRef::Location(location) => location_label(location),
        };

        let header = PageHeader {
            location,
            generated_at: metadata.generated_at,
            model_version: metadata.model_version,
            source: PageSource::Api,
            subtitle: format!("{} to {} | Week Avg: {}", start_date, end_date, week_avg_score),
        };

        Ok(ForecastPage {
            view: ViewState::Week { start: start.to_string() },
            header,
            days: DayCards::Detailed(select_detailed(&forecasts)?),
        })
    }
}

/// Orders detailed records and selects the best night slot of each, the one path for
/// detailed data whatever its origin
///
/// # Arguments
///
/// * 'forecasts' - detailed records in any order
pub fn select_detailed(forecasts: &[DetailedForecast]) -> Result<Vec<DetailedDay>, ForecastError> {
    normalize(forecasts)
        .into_iter()
        .map(|forecast| {
            let best_night = pick_best_night_slot(&forecast.timeslots)
                .map_err(|e| ForecastError::InvalidRecord(format!("{} {}: {}", forecast.day_of_week, forecast.date, e)))?
                .clone();
            Ok(DetailedDay { forecast, best_night })
        })
        .collect()
}

/// Formats a location as name and coordinates, e.g. "La Jolla (32.86°N, 117.26°W)"
///
/// # Arguments
///
/// * 'location' - the location
fn location_label(location: &Location) -> String {
    let ns = if location.lat >= 0.0 { 'N' } else { 'S' };
    let ew = if location.lon >= 0.0 { 'E' } else { 'W' };

    format!("{} ({:.2}°{}, {:.2}°{})", location.name, location.lat.abs(), ns, location.lon.abs(), ew)
}
