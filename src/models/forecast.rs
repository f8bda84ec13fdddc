use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer};

/// Granularity of a forecast set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Detailed,
    Daily,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Detailed => write!(f, "3-hour timeslots"),
            Mode::Daily    => write!(f, "Daily forecast"),
        }
    }
}

/// Day of week as named in forecast documents. Names that don't match any weekday
/// are kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOfWeek {
    Known(Weekday),
    Unknown(String),
}

impl DayOfWeek {
    /// Returns the canonical position of the day, Monday = 0 through Sunday = 6.
    /// Unknown names all get 7 and hence sort after every known day.
    pub fn index(&self) -> u32 {
        match self {
            DayOfWeek::Known(day) => day.num_days_from_monday(),
            DayOfWeek::Unknown(_) => 7,
        }
    }

    pub fn from_name(name: &str) -> DayOfWeek {
        match Weekday::from_str(name.trim()) {
            Ok(day) => DayOfWeek::Known(day),
            Err(_) => DayOfWeek::Unknown(name.to_string()),
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DayOfWeek::Known(Weekday::Mon) => "Monday",
            DayOfWeek::Known(Weekday::Tue) => "Tuesday",
            DayOfWeek::Known(Weekday::Wed) => "Wednesday",
            DayOfWeek::Known(Weekday::Thu) => "Thursday",
            DayOfWeek::Known(Weekday::Fri) => "Friday",
            DayOfWeek::Known(Weekday::Sat) => "Saturday",
            DayOfWeek::Known(Weekday::Sun) => "Sunday",
            DayOfWeek::Unknown(name) => name.as_str(),
        };
        write!(f, "{}", name)
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(DayOfWeek::from_name(&name))
    }
}

/// Viewing quality rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Rating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    /// Rates a 0-100 score, same thresholds as the forecast generator uses
    pub fn from_score(score: f64) -> Rating {
        if score >= 70.0 {
            Rating::Excellent
        } else if score >= 50.0 {
            Rating::Good
        } else if score >= 30.0 {
            Rating::Fair
        } else {
            Rating::Poor
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Rating::Excellent => "🌟",
            Rating::Good      => "✨",
            Rating::Fair      => "💫",
            Rating::Poor      => "⭐",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rating::Poor      => write!(f, "Poor"),
            Rating::Fair      => write!(f, "Fair"),
            Rating::Good      => write!(f, "Good"),
            Rating::Excellent => write!(f, "Excellent"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TideState {
    High,
    Low,
}

impl TideState {
    /// Positive levels are high tide, everything else low
    pub fn from_level(level: f64) -> TideState {
        if level > 0.0 { TideState::High } else { TideState::Low }
    }
}

impl fmt::Display for TideState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TideState::High => write!(f, "High"),
            TideState::Low  => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Moon {
    pub phase: String,
    pub illumination: f64,
    pub dark_night: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tide {
    pub level: f64,
    pub near_low_tide: Option<bool>,
    #[serde(default)]
    pub low_tide_times: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyConditions {
    pub moon: Moon,
    pub tide: Tide,
    pub wave_height_m: f64,
    pub water_temp_c: f64,
}

/// One day of a daily mode forecast
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DailyForecast {
    pub day_of_week: DayOfWeek,
    pub date: NaiveDate,
    pub score: f64,
    pub rating: Rating,
    pub conditions: DailyConditions,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeslotConditions {
    pub tide_level: f64,
    pub moon_illumination: Option<f64>,
    pub wave_height_m: Option<f64>,
    pub water_temp_c: Option<f64>,
}

/// One three-hour window within a detailed mode day
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Timeslot {
    pub time: String,
    pub score: f64,
    pub icon: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_night: bool,
    pub rating: Option<Rating>,
    pub conditions: TimeslotConditions,
}

impl Timeslot {
    /// Returns the slot rating, derived from the score when the document carries none
    pub fn rating(&self) -> Rating {
        self.rating.unwrap_or_else(|| Rating::from_score(self.score))
    }
}

/// One day of a detailed mode forecast
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetailedForecast {
    pub day_of_week: DayOfWeek,
    pub date: NaiveDate,
    pub avg_score: f64,
    pub best_score: f64,
    pub best_time: String,
    pub recommendation: String,
    pub timeslots: Vec<Timeslot>,
}

/// Common view on daily and detailed records
pub trait DayRecord {
    fn day_of_week(&self) -> &DayOfWeek;
}

impl DayRecord for DailyForecast {
    fn day_of_week(&self) -> &DayOfWeek { &self.day_of_week }
}

impl DayRecord for DetailedForecast {
    fn day_of_week(&self) -> &DayOfWeek { &self.day_of_week }
}

/// A forecast document as written by the forecast generator
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastFile<T> {
    pub generated_at: DateTime<Utc>,
    pub location: Location,
    #[serde(default = "default_model_version")]
    pub model_version: String,
    pub forecasts: Vec<T>,
}

/// A complete forecast set, all records of the same granularity
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastSet {
    Detailed(ForecastFile<DetailedForecast>),
    Daily(ForecastFile<DailyForecast>),
}

impl ForecastSet {
    /// Parses a json document of the given mode
    ///
    /// # Arguments
    ///
    /// * 'mode' - the shape the document is expected to have
    /// * 'json' - the document
    pub fn parse(mode: Mode, json: &str) -> Result<ForecastSet, serde_json::Error> {
        let set = match mode {
            Mode::Detailed => ForecastSet::Detailed(serde_json::from_str(json)?),
            Mode::Daily => ForecastSet::Daily(serde_json::from_str(json)?),
        };

        Ok(set)
    }

    pub fn mode(&self) -> Mode {
        match self {
            ForecastSet::Detailed(_) => Mode::Detailed,
            ForecastSet::Daily(_) => Mode::Daily,
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            ForecastSet::Detailed(f) => &f.location,
            ForecastSet::Daily(f) => &f.location,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        match self {
            ForecastSet::Detailed(f) => f.generated_at,
            ForecastSet::Daily(f) => f.generated_at,
        }
    }

    pub fn model_version(&self) -> &str {
        match self {
            ForecastSet::Detailed(f) => &f.model_version,
            ForecastSet::Daily(f) => &f.model_version,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ForecastSet::Detailed(f) => f.forecasts.len(),
            ForecastSet::Daily(f) => f.forecasts.len(),
        }
    }
}

pub fn default_model_version() -> String {
    "v1.0".to_string()
}

/// Accepts both json booleans and 0/1 integers
fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
    }
}
