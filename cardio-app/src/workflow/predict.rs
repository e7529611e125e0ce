use std::sync::Arc;

use log::info;

use crate::{
    domain::{
        prediction::{Prediction, PredictionReport},
        vitals::{FeatureVector, PatientVitals},
    },
    ports::classifier::{ClassifierError, ClassifierPort},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

#[async_trait::async_trait]
pub trait PredictUseCase {
    async fn predict(&self, vitals: &PatientVitals) -> Result<PredictionReport, PredictError>;
    fn model_description(&self) -> String;
}

pub struct PredictUseCaseImpl<C: ClassifierPort> {
    classifier: Arc<C>,
}

impl<C: ClassifierPort> PredictUseCaseImpl<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }
}

fn check_probability(p: f64) -> Result<(), ClassifierError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ClassifierError::InvalidProbability(p))
    }
}

#[async_trait::async_trait]
impl<C: ClassifierPort + Send + Sync + 'static> PredictUseCase for PredictUseCaseImpl<C> {
    async fn predict(&self, vitals: &PatientVitals) -> Result<PredictionReport, PredictError> {
        let features = FeatureVector::from(vitals);
        let probabilities = self.classifier.predict_proba(&features)?;
        check_probability(probabilities.negative)?;
        check_probability(probabilities.positive)?;
        let prediction = Prediction::from_probabilities(probabilities);
        info!(
            "Prediction: class={} confidence={}% features={:?}",
            prediction.class.label(),
            prediction.confidence_percent(),
            features.as_slice()
        );
        Ok(PredictionReport {
            features,
            prediction,
        })
    }

    fn model_description(&self) -> String {
        self.classifier.describe()
    }
}
