use crate::errors::OverlayError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of action buttons exposed by every widget variant.
pub const ACTION_COUNT: usize = 6;

pub const DEFAULT_ICON: &str = "🗣️";

/// Identifier of one of the six action buttons, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ActionId(u8);

impl ActionId {
    pub fn new(id: u8) -> Result<Self, OverlayError> {
        if (1..=ACTION_COUNT as u8).contains(&id) {
            Ok(Self(id))
        } else {
            Err(OverlayError::InvalidActionId(id))
        }
    }

    pub fn all() -> impl Iterator<Item = ActionId> {
        (1..=ACTION_COUNT as u8).map(ActionId)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot of this button.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u8> for ActionId {
    type Error = OverlayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionId> for u8 {
    fn from(id: ActionId) -> Self {
        id.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: ActionId,
    pub label: String,
    pub icon: String,
}

impl ActionButton {
    pub fn new(id: ActionId, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            icon: icon.into(),
        }
    }

    pub fn default_label(id: ActionId) -> String {
        format!("Button {id}")
    }

    pub fn default_for(id: ActionId) -> Self {
        Self::new(id, Self::default_label(id), DEFAULT_ICON)
    }

    pub fn defaults() -> Vec<ActionButton> {
        ActionId::all().map(Self::default_for).collect()
    }
}

/// What the user asked the widget to do. Consumers drain these from the
/// controller once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    Button(ActionId),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_id_rejects_out_of_range() {
        assert!(ActionId::new(0).is_err());
        assert!(ActionId::new(7).is_err());
        assert_eq!(ActionId::new(6).map(ActionId::index).ok(), Some(5));
    }

    #[test]
    fn defaults_cover_all_slots() {
        let buttons = ActionButton::defaults();
        assert_eq!(buttons.len(), ACTION_COUNT);
        assert_eq!(buttons[2].label, "Button 3");
        assert_eq!(buttons[2].icon, DEFAULT_ICON);
    }

    #[test]
    fn button_serializes_with_numeric_id() {
        let button = ActionButton::default_for(ActionId::new(4).unwrap());
        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(json["id"], 4);
        assert!(serde_json::from_str::<ActionButton>(r#"{"id":9,"label":"x","icon":"y"}"#).is_err());
    }
}
