use serde::Serialize;

use crate::domain::vitals::FeatureVector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisClass {
    Negative,
    Positive,
}

impl DiagnosisClass {
    pub fn label(self) -> u8 {
        match self {
            DiagnosisClass::Negative => 0,
            DiagnosisClass::Positive => 1,
        }
    }
}

/// `predict_proba` row for a binary classifier: index 0 is the negative
/// class, index 1 the positive class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassProbabilities {
    pub negative: f64,
    pub positive: f64,
}

impl ClassProbabilities {
    pub fn from_positive(positive: f64) -> Self {
        Self {
            negative: 1.0 - positive,
            positive,
        }
    }

    /// Argmax with ties resolved to the negative class.
    pub fn decide(&self) -> DiagnosisClass {
        if self.positive > self.negative {
            DiagnosisClass::Positive
        } else {
            DiagnosisClass::Negative
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub class: DiagnosisClass,
    pub probabilities: ClassProbabilities,
}

impl Prediction {
    pub fn from_probabilities(probabilities: ClassProbabilities) -> Self {
        Self {
            class: probabilities.decide(),
            probabilities,
        }
    }

    /// Probability of the predicted class.
    pub fn confidence(&self) -> f64 {
        match self.class {
            DiagnosisClass::Positive => self.probabilities.positive,
            DiagnosisClass::Negative => self.probabilities.negative,
        }
    }

    pub fn confidence_percent(&self) -> String {
        format!("{:.2}", self.confidence() * 100.0)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PredictionReport {
    pub features: FeatureVector,
    pub prediction: Prediction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_follows_predicted_class() {
        let positive = Prediction::from_probabilities(ClassProbabilities::from_positive(0.8731));
        assert_eq!(positive.class, DiagnosisClass::Positive);
        assert_eq!(positive.confidence_percent(), "87.31");

        let negative = Prediction::from_probabilities(ClassProbabilities::from_positive(0.25));
        assert_eq!(negative.class, DiagnosisClass::Negative);
        assert_eq!(negative.confidence_percent(), "75.00");
    }

    #[test]
    fn test_tie_goes_to_negative() {
        let p = ClassProbabilities {
            negative: 0.5,
            positive: 0.5,
        };
        assert_eq!(p.decide(), DiagnosisClass::Negative);
    }
}
