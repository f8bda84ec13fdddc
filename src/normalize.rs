use crate::models::forecast::DayRecord;

/// Returns the records ordered Monday through Sunday, records with unknown day names last.
///
/// The sort is stable, so records sharing a day keep their input order. The input is
/// left untouched.
///
/// # Arguments
///
/// * 'records' - forecast records in any order
pub fn normalize<T: DayRecord + Clone>(records: &[T]) -> Vec<T> {
    let mut ordered = records.to_vec();
    ordered.sort_by_key(|r| r.day_of_week().index());

    ordered
}
