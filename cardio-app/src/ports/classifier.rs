use crate::domain::{
    prediction::{ClassProbabilities, Prediction},
    vitals::FeatureVector,
};

/// A pre-trained binary classifier over the 13-column feature vector.
pub trait ClassifierPort {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError>;

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        self.predict_proba(features)
            .map(Prediction::from_probabilities)
    }

    /// Short human-readable description, e.g. "logistic regression".
    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier produced an invalid probability: {0}")]
    InvalidProbability(f64),
    #[error("classifier failed: {0}")]
    Internal(String),
}
