//! Month-indexed mean temperature, the series behind the seasonality chart.

use hw_lst::reading::Reading;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean reading value of one calendar month, pooled over every region and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean_value: f64,
    pub reading_count: usize,
}

/// Group readings by calendar month and average their values.
///
/// Only months with readings appear, in calendar order.
pub fn monthly_means<'a, I>(readings: I) -> Vec<MonthlyMean>
where
    I: IntoIterator<Item = &'a Reading>,
{
    let mut by_month: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for reading in readings {
        let entry = by_month.entry(reading.month()).or_insert((0.0, 0));
        entry.0 += reading.value;
        entry.1 += 1;
    }
    by_month
        .into_iter()
        .map(|(month, (sum, count))| MonthlyMean {
            month,
            mean_value: sum / count as f64,
            reading_count: count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_monthly_means() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        let readings = vec![
            Reading::new("A", date(2019, 11, 1), 36.0),
            Reading::new("B", date(2020, 1, 1), 30.0),
            Reading::new("A", date(2019, 1, 2), 34.0),
            Reading::new("A", date(2019, 11, 2), 38.0),
        ];
        let means = monthly_means(&readings);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].month, 1);
        assert!((means[0].mean_value - 32.0).abs() < 1e-9);
        assert_eq!(means[0].reading_count, 2);
        assert_eq!(means[1].month, 11);
        assert!((means[1].mean_value - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_means_empty() {
        assert!(monthly_means(&Vec::<Reading>::new()).is_empty());
    }
}
