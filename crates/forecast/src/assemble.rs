//! Conversion of raw forecasts into dated, bounded tables.

use chrono::NaiveDate;
use vaxcast_arima::ArimaForecast;
use vaxcast_series::daily_sequence;

use crate::error::ForecastError;
use crate::output::{ForecastRow, ForecastTable};

/// Dates step `i` as `last_date + (i + 1)` days and clamps every value to
/// `bounds`.
///
/// Clamping is monotone, so `lower <= predicted <= upper` is preserved.
///
/// # Errors
///
/// [`ForecastError::Schema`] if the forecast dates run past the end of the
/// representable calendar.
pub fn assemble(
    forecast: &ArimaForecast,
    last_date: NaiveDate,
    bounds: (f64, f64),
) -> Result<ForecastTable, ForecastError> {
    let horizon = forecast.len();
    let dates = last_date
        .succ_opt()
        .map(|first| daily_sequence(first, horizon))
        .unwrap_or_default();
    if dates.len() != horizon {
        return Err(ForecastError::Schema {
            reason: format!("cannot date {horizon} days after {last_date}"),
        });
    }

    let (min, max) = bounds;
    let clamp = |x: f64| x.clamp(min, max);
    let rows = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| ForecastRow {
            predicted: clamp(forecast.point()[i]),
            lower_bound: clamp(forecast.lower()[i]),
            upper_bound: clamp(forecast.upper()[i]),
            date,
        })
        .collect();
    Ok(ForecastTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaxcast_arima::ArimaSpec;

    fn forecast_near_ceiling() -> ArimaForecast {
        let data: Vec<f64> = (0..30)
            .map(|i| 90.0 + 0.4 * i as f64 + if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        ArimaSpec::new(0, 1, 0).fit(&data).unwrap().forecast(30, 0.95).unwrap()
    }

    #[test]
    fn dates_follow_last_observation() {
        let last = NaiveDate::from_ymd_opt(2021, 12, 20).unwrap();
        let table = assemble(&forecast_near_ceiling(), last, (0.0, 100.0)).unwrap();
        assert_eq!(table.len(), 30);
        assert_eq!(table.rows()[0].date, NaiveDate::from_ymd_opt(2021, 12, 21).unwrap());
        assert_eq!(table.rows()[29].date, NaiveDate::from_ymd_opt(2022, 1, 19).unwrap());
    }

    #[test]
    fn values_are_clamped_and_ordered() {
        let last = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        let table = assemble(&forecast_near_ceiling(), last, (0.0, 100.0)).unwrap();
        for row in table.rows() {
            assert!(row.lower_bound >= 0.0 && row.upper_bound <= 100.0);
            assert!(row.lower_bound <= row.predicted && row.predicted <= row.upper_bound);
        }
        assert_eq!(table.rows()[29].upper_bound, 100.0);
    }

    #[test]
    fn end_of_calendar_is_an_error() {
        let err = assemble(&forecast_near_ceiling(), NaiveDate::MAX, (0.0, 100.0)).unwrap_err();
        assert_eq!(err.kind(), "schema");
    }
}
