//! Statistics over bounded series.
//!
//! Series are plain slices but never longer than [`MAX_SERIES_LEN`]; longer
//! input is rejected rather than truncated.

use crate::error::{CoreError, CoreResult};

/// Largest series any helper in this module accepts.
pub const MAX_SERIES_LEN: usize = 200;

fn check_series(values: &[f64], what: &'static str) -> CoreResult<()> {
    if values.is_empty() {
        return Err(CoreError::Empty { what });
    }
    if values.len() > MAX_SERIES_LEN {
        return Err(CoreError::Capacity {
            what,
            len: values.len(),
            capacity: MAX_SERIES_LEN,
        });
    }
    Ok(())
}

/// Median; the mean of the two central values for even lengths.
pub fn median(values: &[f64]) -> CoreResult<f64> {
    check_series(values, "median")?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 0 {
        Ok((sorted[n / 2] + sorted[n / 2 - 1]) / 2.0)
    } else {
        Ok(sorted[n / 2])
    }
}

/// Index of the first smallest value.
pub fn argmin(values: &[f64]) -> CoreResult<usize> {
    check_series(values, "argmin")?;
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v < values[best] {
            best = i;
        }
    }
    Ok(best)
}

/// Index of the first largest value.
pub fn argmax(values: &[f64]) -> CoreResult<usize> {
    check_series(values, "argmax")?;
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    Ok(best)
}

pub fn minimum(values: &[f64]) -> CoreResult<f64> {
    Ok(values[argmin(values)?])
}

pub fn maximum(values: &[f64]) -> CoreResult<f64> {
    Ok(values[argmax(values)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn median_leaves_input_untouched() {
        let values = [5.0, 1.0, 3.0];
        let _ = median(&values).unwrap();
        assert_eq!(values, [5.0, 1.0, 3.0]);
    }

    #[test]
    fn extremes_report_first_occurrence() {
        let values = [2.0, 0.5, 7.0, 0.5, 7.0];
        assert_eq!(argmin(&values).unwrap(), 1);
        assert_eq!(argmax(&values).unwrap(), 2);
        assert_eq!(minimum(&values).unwrap(), 0.5);
        assert_eq!(maximum(&values).unwrap(), 7.0);
    }

    #[test]
    fn empty_and_oversized_series_are_rejected() {
        assert!(matches!(median(&[]), Err(CoreError::Empty { .. })));
        let long = vec![1.0; MAX_SERIES_LEN + 1];
        assert!(matches!(
            maximum(&long),
            Err(CoreError::Capacity { len: 201, .. })
        ));
        let full = vec![1.0; MAX_SERIES_LEN];
        assert!(maximum(&full).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn median_lies_between_extremes(values in prop::collection::vec(-1e3_f64..1e3_f64, 1..MAX_SERIES_LEN)) {
            let m = median(&values).unwrap();
            prop_assert!(m >= minimum(&values).unwrap());
            prop_assert!(m <= maximum(&values).unwrap());
        }
    }
}
