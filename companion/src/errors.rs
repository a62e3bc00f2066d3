use egui::WidgetText;
use egui_toast::{Toast, ToastKind, ToastOptions};

#[derive(Debug, thiserror::Error)]
pub enum CompanionError {
    #[error("{0}")]
    Plain(String),
    #[error("{0}")]
    Box(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Overlay(#[from] egui_overlay::OverlayError),
}

pub fn error_toast<E: Into<WidgetText>>(err: E) -> Toast {
    Toast {
        text: err.into(),
        kind: ToastKind::Error,
        options: ToastOptions::default()
            .duration_in_seconds(5.0)
            .show_progress(true),
        ..Default::default()
    }
}
