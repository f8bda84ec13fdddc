use crate::errors::ForecastError;
use crate::models::forecast::Timeslot;

/// Picks the recommended timeslot of a day.
///
/// Night slots are preferred and among them the highest score wins, the earliest slot
/// on equal scores. A day without night slots falls back to its first slot. The
/// server declared best time plays no part in this.
///
/// # Arguments
///
/// * 'timeslots' - the timeslots of one day in document order
pub fn pick_best_night_slot(timeslots: &[Timeslot]) -> Result<&Timeslot, ForecastError> {
    let first = timeslots.first()
        .ok_or_else(|| ForecastError::InvalidRecord("day without timeslots".to_string()))?;

    let best = timeslots
        .iter()
        .filter(|t| t.is_night)
        .fold(None, |leader: Option<&Timeslot>, t| match leader {
            Some(l) if t.score <= l.score => Some(l),
            _ => Some(t),
        });

    Ok(best.unwrap_or(first))
}
