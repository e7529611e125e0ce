//! Loads the exported heart-disease classifier from its JSON artifact.
//!
//! The artifact carries either logistic-regression weights or a fitted tree
//! ensemble, plus the column names it was trained on:
//!
//! ```json
//! { "kind": "logistic", "feature_names": ["age", "..."],
//!   "coefficients": [0.01, "..."], "intercept": -3.2 }
//! ```

use std::{fs, io, path::Path};

use cardio_app::{
    domain::{
        prediction::ClassProbabilities,
        vitals::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector},
    },
    ports::classifier::{ClassifierError, ClassifierPort},
};
use log::info;
use serde::Deserialize;

pub mod forest;
pub mod logistic;

use forest::ForestModel;
use logistic::LogisticModel;

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model file '{path}' not found")]
    NotFound { path: String },
    #[error("failed to read model file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelKind {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

#[derive(Debug, Clone, Deserialize)]
struct ModelArtifact {
    #[serde(default)]
    n_features: Option<usize>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    model: ModelKind,
}

pub struct JsonModelClassifier {
    model: ModelKind,
}

impl JsonModelClassifier {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ModelLoadError::NotFound {
                path: path.display().to_string(),
            },
            _ => ModelLoadError::Io(e),
        })?;
        let classifier = Self::from_json(&contents)?;
        info!(
            "Loaded {} from {}",
            classifier.describe(),
            path.display()
        );
        Ok(classifier)
    }

    pub fn from_json(contents: &str) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_str(contents)?;
        if let Some(n) = artifact.n_features {
            if n != FEATURE_COUNT {
                return Err(ModelLoadError::Invalid(format!(
                    "model expects {} features, form provides {}",
                    n, FEATURE_COUNT
                )));
            }
        }
        if let Some(names) = &artifact.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
                return Err(ModelLoadError::Invalid(format!(
                    "feature columns {:?} do not match {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }
        match &artifact.model {
            ModelKind::Logistic(m) => m.check()?,
            ModelKind::Forest(m) => m.check()?,
        }
        Ok(Self {
            model: artifact.model,
        })
    }
}

impl ClassifierPort for JsonModelClassifier {
    fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        let positive = match &self.model {
            ModelKind::Logistic(m) => m.positive_probability(features),
            ModelKind::Forest(m) => m.positive_probability(features),
        };
        if !positive.is_finite() {
            return Err(ClassifierError::InvalidProbability(positive));
        }
        Ok(ClassProbabilities::from_positive(positive))
    }

    fn describe(&self) -> String {
        match &self.model {
            ModelKind::Logistic(_) => "logistic regression".to_string(),
            ModelKind::Forest(m) => format!("random forest ({} trees)", m.trees.len()),
        }
    }
}
