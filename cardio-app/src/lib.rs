use std::sync::Arc;

use crate::{
    ports::{classifier::ClassifierPort, email::EmailPort, secrets::SecretsPort},
    workflow::{
        feedback::{SendFeedbackUseCase, SendFeedbackUseCaseImpl},
        predict::{PredictUseCase, PredictUseCaseImpl},
    },
};

pub mod domain;
pub mod ports;
pub mod workflow;

pub struct Application {
    pub predict_use_case: Box<dyn PredictUseCase + Send + Sync + 'static>,
    pub send_feedback_use_case: Box<dyn SendFeedbackUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    C: ClassifierPort + Send + Sync + 'static,
    S: SecretsPort + Send + Sync + 'static,
    E: EmailPort + Send + Sync + 'static,
>(
    classifier: Arc<C>,
    secrets: Arc<S>,
    email_port: Arc<E>,
) -> Application {
    Application {
        predict_use_case: Box::new(PredictUseCaseImpl::new(classifier)),
        send_feedback_use_case: Box::new(SendFeedbackUseCaseImpl::new(secrets, email_port)),
    }
}
