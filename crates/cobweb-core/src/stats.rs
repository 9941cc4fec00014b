//! Small numeric helpers for accuracy reporting over repeated runs.

use crate::errors::{CobwebError, CobwebResult};

/// Mean of a collection of values. Empty input is an invalid argument.
pub fn mean(values: &[f64]) -> CobwebResult<f64> {
    if values.is_empty() {
        return Err(CobwebError::EmptyCollection {
            context: "mean".to_string(),
        });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation. Empty input is an invalid argument.
pub fn std_dev(values: &[f64]) -> CobwebResult<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn std_dev_of_constant_is_zero() {
        assert_eq!(std_dev(&[5.0, 5.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn std_dev_of_spread() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(mean(&[]).is_err());
        assert!(std_dev(&[]).is_err());
    }
}
