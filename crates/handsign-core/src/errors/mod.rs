//! Error handling for handsign.
//! One error enum per subsystem, `thiserror` only.

pub mod candidate_error;
pub mod classifier_error;
pub mod config_error;
pub mod decision_error;
pub mod input_error;
pub mod label_error;

pub use candidate_error::CandidateError;
pub use classifier_error::ClassifierError;
pub use config_error::ConfigError;
pub use decision_error::DecisionError;
pub use input_error::InsufficientInput;
pub use label_error::LabelMapError;

/// Top-level error aggregating subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum HandsignError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("label map error: {0}")]
    LabelMap(#[from] LabelMapError),

    #[error("candidate error: {0}")]
    Candidate(#[from] CandidateError),

    #[error("classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("decision error: {0}")]
    Decision(#[from] DecisionError),

    #[error("insufficient input: {0}")]
    InsufficientInput(#[from] InsufficientInput),
}

pub type HandsignResult<T> = Result<T, HandsignError>;
