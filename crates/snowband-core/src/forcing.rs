/// Daily forcing for a snow run.
///
/// Precipitation [mm/day] and air temperature [C] aligned with calendar
/// dates. Only the shape is validated: NaN or negative values are kept and
/// propagate numerically (see [`Forcing::warnings`]).
use jiff::civil::Date;

use crate::calendar;
use crate::cemaneige::DailyForcing;
use crate::error::{ForcingSeries, InputShapeError, NumericPropagationWarning};

///
/// Fields are private so the series keep the length and day range checked
/// at construction.
#[derive(Debug, Clone)]
pub struct Forcing {
    precip: Vec<f64>,
    temp: Vec<f64>,
    day_of_year: Vec<u16>,
}

impl Forcing {
    /// Build forcing from calendar dates.
    ///
    /// Fails if the series are empty or their lengths differ.
    pub fn new(precip: Vec<f64>, temp: Vec<f64>, dates: &[Date]) -> Result<Self, InputShapeError> {
        check_shape(&precip, &temp, dates.len(), "dates")?;
        let day_of_year = dates.iter().map(|d| calendar::folded_day_of_year(*d)).collect();
        Ok(Self {
            precip,
            temp,
            day_of_year,
        })
    }

    /// Build forcing from already folded days of year.
    pub fn from_day_of_year(
        precip: Vec<f64>,
        temp: Vec<f64>,
        day_of_year: Vec<u16>,
    ) -> Result<Self, InputShapeError> {
        check_shape(&precip, &temp, day_of_year.len(), "day_of_year")?;
        if let Some((step, &value)) = day_of_year
            .iter()
            .enumerate()
            .find(|(_, d)| !calendar::is_table_day(**d))
        {
            return Err(InputShapeError::InvalidDayOfYear { step, value });
        }
        Ok(Self {
            precip,
            temp,
            day_of_year,
        })
    }

    pub fn precip(&self) -> &[f64] {
        &self.precip
    }

    pub fn temp(&self) -> &[f64] {
        &self.temp
    }

    /// Folded 1-based day of year per step, in `1..=365`.
    pub fn day_of_year(&self) -> &[u16] {
        &self.day_of_year
    }

    /// Daily forcing in time order, one item per step.
    pub fn days(&self) -> impl ExactSizeIterator<Item = DailyForcing> + '_ {
        (0..self.len()).map(|t| {
            DailyForcing::from_checked(self.precip[t], self.temp[t], self.day_of_year[t])
        })
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.precip.len()
    }

    /// Always `false` for validated forcing; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.precip.is_empty()
    }

    /// Report NaN values, and negative precipitation, without rejecting them.
    pub fn warnings(&self) -> Vec<NumericPropagationWarning> {
        [
            NumericPropagationWarning::scan(ForcingSeries::Precipitation, &self.precip),
            NumericPropagationWarning::scan(ForcingSeries::Temperature, &self.temp),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn check_shape(
    precip: &[f64],
    temp: &[f64],
    calendar_len: usize,
    calendar_name: &'static str,
) -> Result<(), InputShapeError> {
    if precip.is_empty() {
        return Err(InputShapeError::Empty);
    }
    let expected = precip.len();
    if temp.len() != expected {
        return Err(InputShapeError::LengthMismatch {
            name: "temp",
            expected,
            actual: temp.len(),
        });
    }
    if calendar_len != expected {
        return Err(InputShapeError::LengthMismatch {
            name: calendar_name,
            expected,
            actual: calendar_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn dates(n: usize) -> Vec<Date> {
        let start = date(2024, 2, 27);
        (0..n as i64)
            .map(|i| start.checked_add(jiff::Span::new().days(i)).unwrap())
            .collect()
    }

    // -- valid construction --

    #[test]
    fn valid_forcing() {
        let f = Forcing::new(vec![1.0, 2.0, 3.0], vec![0.0, -1.0, 2.0], &dates(3)).unwrap();
        assert_eq!(f.len(), 3);
        assert!(!f.is_empty());
    }

    #[test]
    fn day_of_year_is_folded() {
        // Feb 27, Feb 28, Feb 29, Mar 1 of a leap year
        let f = Forcing::new(vec![0.0; 4], vec![0.0; 4], &dates(4)).unwrap();
        assert_eq!(f.day_of_year(), &[58, 59, 59, 60]);
    }

    // -- shape errors --

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Forcing::new(vec![], vec![], &[]).unwrap_err(),
            InputShapeError::Empty
        );
    }

    #[test]
    fn rejects_temp_length_mismatch() {
        let err = Forcing::new(vec![1.0, 2.0], vec![1.0], &dates(2)).unwrap_err();
        assert_eq!(
            err,
            InputShapeError::LengthMismatch {
                name: "temp",
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_date_length_mismatch() {
        let err = Forcing::new(vec![1.0, 2.0], vec![1.0, 2.0], &dates(3)).unwrap_err();
        assert!(err.to_string().contains("dates"));
    }

    #[test]
    fn rejects_out_of_range_day_of_year() {
        let err = Forcing::from_day_of_year(vec![0.0; 2], vec![0.0; 2], vec![365, 366]).unwrap_err();
        assert_eq!(err, InputShapeError::InvalidDayOfYear { step: 1, value: 366 });
        assert!(Forcing::from_day_of_year(vec![0.0], vec![0.0], vec![0]).is_err());
    }

    #[test]
    fn days_follow_the_series() {
        let f = Forcing::from_day_of_year(vec![1.0, 2.0], vec![-1.0, 3.0], vec![10, 11]).unwrap();
        let days: Vec<DailyForcing> = f.days().collect();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].precip(), 2.0);
        assert_eq!(days[1].temp(), 3.0);
        assert_eq!(days[1].day_of_year(), 11);
    }

    // -- numeric warnings --

    #[test]
    fn nan_is_kept_and_reported() {
        let f = Forcing::from_day_of_year(vec![f64::NAN, -1.0], vec![0.0, f64::NAN], vec![1, 2])
            .unwrap();
        assert!(f.precip()[0].is_nan());
        let w = f.warnings();
        assert_eq!(w.len(), 2);
        assert_eq!(w[0].series, ForcingSeries::Precipitation);
        assert_eq!((w[0].nan_count, w[0].negative_count), (1, 1));
        assert_eq!(w[1].series, ForcingSeries::Temperature);
    }

    #[test]
    fn clean_forcing_has_no_warnings() {
        let f = Forcing::from_day_of_year(vec![1.0], vec![-3.0], vec![1]).unwrap();
        assert!(f.warnings().is_empty());
    }
}
