use rand::Rng;
use serde::Serialize;

use crate::models::status::Status;

/// Acknowledgement returned by the issue-report endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct IssueTicket {
    pub message: String,
    pub ticket_id: String,
    pub status: Status,
}

/// Files a mock issue report. The ticket number is a random four-digit number
/// behind the tool's prefix, e.g. `ZONER-4821`.
pub fn file_issue_report<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> IssueTicket {
    IssueTicket {
        message: "Issue reported successfully".to_string(),
        ticket_id: format!("{prefix}-{}", rng.gen_range(1000..=9999)),
        status: Status::Success,
    }
}
