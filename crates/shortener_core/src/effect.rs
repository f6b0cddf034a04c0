use std::time::Duration;

use crate::{RequestId, ResponseFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Shorten {
        request_id: RequestId,
        long_url: String,
        format: ResponseFormat,
    },
    /// Deliver `Msg::StatusClearDue { generation }` once `after` has elapsed.
    ScheduleStatusClear { generation: u64, after: Duration },
    CopyToClipboard { text: String },
    ComposeMail { short_url: String },
    OpenInBrowser { url: String },
    SystemShare { items: Vec<String> },
}
