use crate::{Phase, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowView {
    pub phase: Phase,
    pub input: String,
    pub short_url: Option<String>,
    pub status_message: Option<String>,
    pub is_error: bool,
    /// Post-success actions have a short URL to work with.
    pub actions_enabled: bool,
    pub last_request_id: Option<RequestId>,
}
