use serde::Serialize;

/// Status marker carried by every tool response.
///
/// Only `success` exists on the wire: degraded results still report success and
/// use their `message` to say so.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
}
