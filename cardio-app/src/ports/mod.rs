pub mod classifier;
pub mod email;
pub mod secrets;
