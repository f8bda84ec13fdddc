use chrono_tz::Tz;
use crate::errors::{ErrorClass, ForecastError};
use crate::models::forecast::{DailyForecast, TideState, Timeslot};
use crate::view::{DayCards, DetailedDay, ForecastPage};

/// Receiver of forecast pages and errors, responsible for everything visual
pub trait Presenter {
    fn render(&self, page: &ForecastPage);
    fn show_error(&self, error: &ForecastError);
}

/// Prints pages and errors as plain text on stdout, timestamps in the given zone
pub struct TextPresenter {
    pub timezone: Tz,
}

impl Presenter for TextPresenter {
    fn render(&self, page: &ForecastPage) {
        println!("{}", format_page(page, self.timezone));
    }

    fn show_error(&self, error: &ForecastError) {
        println!("{}", format_error(error));
    }
}

/// Formats a whole page, header first and then one card per day
///
/// # Arguments
///
/// * 'page' - the page to format
/// * 'tz' - time zone the update time is shown in
pub fn format_page(page: &ForecastPage, tz: Tz) -> String {
    let header = &page.header;
    let generated = header.generated_at.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z");
    let caption = format!("{} ", header.subtitle);

    let mut msg = format!("{:=<100}\n", caption);
    msg += &format!("{}\n", header.location);
    msg += &format!("Updated: {} | Mode: {} | {}\n", generated, header.mode_label(), header.model_version);

    match &page.days {
        DayCards::Daily(days) => days.iter().for_each(|d| msg += &format_daily(d)),
        DayCards::Detailed(days) => days.iter().for_each(|d| msg += &format_detailed(d)),
    }

    msg
}

fn format_daily(day: &DailyForecast) -> String {
    let c = &day.conditions;

    let mut card = format!("\n{:-<60}\n", format!("{} {} ", day.day_of_week, day.date));
    card += &format!("Score: {} {}  {}\n", day.score, day.rating.icon(), day.rating);
    card += &format!("🌙 Moon: {} ({:.0}%)", c.moon.phase, c.moon.illumination * 100.0);
    if c.moon.dark_night == Some(true) {
        card += " - dark night";
    }
    card += &format!("\n🌊 Tide: {} ({:.2})", TideState::from_level(c.tide.level), c.tide.level);
    if c.tide.near_low_tide == Some(true) {
        card += " - near low tide";
    }
    if !c.tide.low_tide_times.is_empty() {
        card += &format!(", low at {}", c.tide.low_tide_times.join(", "));
    }
    card += "\n";
    card += &format!("🌊 Wave: {}m\n", c.wave_height_m);
    card += &format!("🌡️ Water Temp: {}°C\n", c.water_temp_c);
    card += &format!("{}\n", day.recommendation);

    card
}

fn format_detailed(day: &DetailedDay) -> String {
    let f = &day.forecast;

    let mut card = format!("\n{:-<60}\n", format!("{} {} ", f.day_of_week, f.date));
    card += &format!("Avg: {}  Best: {} @ {}\n", f.avg_score, f.best_score, f.best_time);
    card += &format!("Best night slot: {}\n", format_slot_summary(&day.best_night));

    for slot in &f.timeslots {
        let marker = if slot.time == f.best_time { "*" } else { " " };
        let night = if slot.is_night { "🌙" } else { "☀️" };
        let tide = match TideState::from_level(slot.conditions.tide_level) {
            TideState::High => "⬆️",
            TideState::Low => "⬇️",
        };
        card += &format!("{} {} {:>3} {} {} {}\n", marker, slot.time, slot.score, slot.icon, night, tide);
    }
    card += &format!("💡 {}\n", f.recommendation);

    card
}

/// Time, score and rating icon of a slot, followed by whatever conditions it carries
fn format_slot_summary(slot: &Timeslot) -> String {
    let c = &slot.conditions;
    let mut summary = format!("{} ({} {})", slot.time, slot.score, slot.rating().icon());

    if let Some(moon) = c.moon_illumination {
        summary += &format!(" 🌙 {:.0}%", moon * 100.0);
    }
    if let Some(wave) = c.wave_height_m {
        summary += &format!(" 🌊 {}m", wave);
    }
    if let Some(temp) = c.water_temp_c {
        summary += &format!(" 🌡️ {}°C", temp);
    }

    summary
}

/// Formats an error the way the user should see it
///
/// # Arguments
///
/// * 'error' - the error to format
pub fn format_error(error: &ForecastError) -> String {
    let caption = match error.class() {
        ErrorClass::NoLocalData => "No local forecast data",
        ErrorClass::InvalidDate => "Invalid date",
        ErrorClass::RemoteFailure => "Forecast API problem",
        ErrorClass::Internal => "Forecast error",
    };

    format!("{:=<100}\n❌ {}\n", format!("{} ", caption), error.user_message())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use chrono_tz::{America, UTC};
    use super::*;
    use crate::models::forecast::{DailyConditions, DayOfWeek, DetailedForecast, Mode, Moon, Rating, Tide, TimeslotConditions};
    use crate::view::{PageHeader, PageSource, ViewState};

    fn slot(time: &str, score: f64, is_night: bool, tide_level: f64) -> Timeslot {
        Timeslot {
            time: time.to_string(),
            score,
            icon: "✨".to_string(),
            is_night,
            rating: None,
            conditions: TimeslotConditions { tide_level, moon_illumination: None, wave_height_m: None, water_temp_c: None },
        }
    }

    fn page() -> ForecastPage {
        let mut best_night = slot("00:00", 85.0, true, -0.4);
        best_night.conditions.moon_illumination = Some(0.1);
        best_night.conditions.water_temp_c = Some(20.9);
        let timeslots = vec![best_night, slot("09:00", 90.0, false, 0.5)];
        let forecast = DetailedForecast {
            day_of_week: DayOfWeek::from_name("Tuesday"),
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            avg_score: 48.0,
            best_score: 90.0,
            best_time: "09:00".to_string(),
            recommendation: "Recommended: 00:00".to_string(),
            timeslots: timeslots.clone(),
        };

        ForecastPage {
            view: ViewState::BestWeek,
            header: PageHeader {
                location: "La Jolla Shores (32.86°N, 117.26°W)".to_string(),
                generated_at: Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap(),
                model_version: "1.0-climatology".to_string(),
                source: PageSource::Static(Mode::Detailed),
                subtitle: "7-Day Viewing Conditions - Best Week".to_string(),
            },
            days: DayCards::Detailed(vec![DetailedDay { forecast, best_night: timeslots[0].clone() }]),
        }
    }

    #[test]
    fn detailed_page_shows_both_best_values() {
        let text = format_page(&page(), UTC);

        assert!(text.starts_with("7-Day Viewing Conditions - Best Week ="));
        assert!(text.contains("Mode: 3-hour timeslots | 1.0-climatology"));
        assert!(text.contains("Tuesday 2025-06-03"));
        assert!(text.contains("Best: 90 @ 09:00"));
        assert!(text.contains("Best night slot: 00:00 (85 🌟) 🌙 10% 🌡️ 20.9°C\n"));
        assert!(text.contains("* 09:00"));
        assert!(text.contains("  00:00"));
    }

    #[test]
    fn update_time_is_shown_in_configured_zone() {
        assert!(format_page(&page(), America::Los_Angeles).contains("Updated: 2025-06-01 01:30 PDT |"));
        assert!(format_page(&page(), UTC).contains("Updated: 2025-06-01 08:30 UTC |"));
    }

    #[test]
    fn daily_card_shows_dark_night_and_low_tides() {
        let day = DailyForecast {
            day_of_week: DayOfWeek::from_name("Monday"),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            score: 74.0,
            rating: Rating::Excellent,
            conditions: DailyConditions {
                moon: Moon { phase: "New Moon".to_string(), illumination: 0.03, dark_night: Some(true) },
                tide: Tide { level: -0.35, near_low_tide: Some(true), low_tide_times: vec!["21:40".to_string()] },
                wave_height_m: 0.7,
                water_temp_c: 20.2,
            },
            recommendation: "Excellent conditions!".to_string(),
        };

        let text = format_daily(&day);

        assert!(text.contains("Score: 74 🌟  Excellent"));
        assert!(text.contains("🌙 Moon: New Moon (3%) - dark night\n"));
        assert!(text.contains("🌊 Tide: Low (-0.35) - near low tide, low at 21:40\n"));
    }

    #[test]
    fn error_captions_follow_class() {
        assert!(format_error(&ForecastError::DataUnavailable { tried: vec!["forecast.json".to_string()] }).starts_with("No local forecast data"));
        assert!(format_error(&ForecastError::InvalidInput("no date given".to_string())).starts_with("Invalid date"));
        assert!(format_error(&ForecastError::Unreachable { cause: "refused".to_string() }).starts_with("Forecast API problem"));
    }
}
