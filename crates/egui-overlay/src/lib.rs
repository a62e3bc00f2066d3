mod action;
mod controller;
mod drag;
mod errors;
mod input;
mod metrics;
mod placement;
mod status;
mod view;

pub use action::{ActionButton, ActionId, OverlayAction, ACTION_COUNT, DEFAULT_ICON};
pub use controller::OverlayController;
pub use drag::{ClickGate, DragSession, Gesture, PointerSource};
pub use errors::OverlayError;
pub use metrics::OverlayMetrics;
pub use placement::{clamp_position, HorizontalPlacement, PanelPlacement, VerticalPlacement};
pub use status::{Pulse, StatusLine};
pub use view::{ElementIds, OverlayView};
