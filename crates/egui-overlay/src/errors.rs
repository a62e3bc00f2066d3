#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("invalid overlay metrics: {0}")]
    InvalidMetrics(&'static str),
    #[error("action id {0} is out of range 1..=6")]
    InvalidActionId(u8),
}
