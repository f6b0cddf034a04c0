//! Shortener core: pure workflow state machine and view-model helpers.
mod config;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use config::{ResponseFormat, ResponseGate, WorkflowConfig, STATUS_DISPLAY};
pub use effect::Effect;
pub use msg::{FailureReason, Msg, ShortenOutcome};
pub use state::{
    is_well_formed_uri, Phase, RequestId, WorkflowState, COPIED_MESSAGE, SUCCESS_COPIED_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use update::update;
pub use view_model::WorkflowView;
