use cardio_app::domain::vitals::{FEATURE_COUNT, FeatureVector};
use serde::Deserialize;

use crate::ModelLoadError;

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub(crate) fn check(&self) -> Result<(), ModelLoadError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelLoadError::Invalid(format!(
                "expected {} coefficients, found {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelLoadError::Invalid(
                "coefficients must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn positive_probability(&self, features: &FeatureVector) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(!sigmoid(-800.0).is_nan());
    }

    #[test]
    fn test_only_intercept() {
        let model = LogisticModel {
            coefficients: vec![0.0; FEATURE_COUNT],
            intercept: 0.0,
        };
        model.check().unwrap();
        let p = model.positive_probability(&FeatureVector([1.0; FEATURE_COUNT]));
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let model = LogisticModel {
            coefficients: vec![0.1; 12],
            intercept: 0.0,
        };
        assert!(matches!(model.check(), Err(ModelLoadError::Invalid(_))));
    }
}
