//! The configuration document shared by the configuration form, the side
//! panel and the overlay.
//!
//! Documents are merged field by field: anything missing, empty or invalid in
//! an incoming document leaves the current value in place.

use crate::consts::DEFAULT_TEXT;
use crate::errors::CompanionError;
use egui_overlay::{ActionButton, ActionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub buttons: Vec<ActionButton>,
    pub default_text: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            buttons: ActionButton::defaults(),
            default_text: DEFAULT_TEXT.to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn button(&self, id: ActionId) -> Option<&ActionButton> {
        self.buttons.get(id.index())
    }

    pub fn apply(&mut self, doc: ConfigDocument) {
        for patch in doc.buttons.unwrap_or_default() {
            let Some(id) = patch.id.and_then(RawId::action_id) else {
                continue;
            };
            let Some(button) = self.buttons.get_mut(id.index()) else {
                continue;
            };
            if let Some(label) = patch.label.filter(|s| !s.is_empty()) {
                button.label = label;
            }
            if let Some(icon) = patch.icon.filter(|s| !s.is_empty()) {
                button.icon = icon;
            }
        }
        if let Some(text) = doc.default_text.filter(|s| !s.is_empty()) {
            self.default_text = text;
        }
    }

    /// Parses `content` and merges it in. On a parse error nothing changes.
    pub fn apply_json(&mut self, content: &str) -> Result<(), CompanionError> {
        let doc = ConfigDocument::parse(content)?;
        self.apply(doc);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CompanionError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A configuration document as found in storage, where every field may be
/// missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    #[serde(default)]
    pub buttons: Option<Vec<ButtonPatch>>,
    #[serde(default)]
    pub default_text: Option<String>,
}

impl ConfigDocument {
    pub fn parse(content: &str) -> Result<Self, CompanionError> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ButtonPatch {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Button ids have been stored both as numbers and as strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn action_id(self) -> Option<ActionId> {
        let id = match self {
            RawId::Number(n) => n,
            RawId::Text(s) => s.trim().parse().ok()?,
        };
        ActionId::new(u8::try_from(id).ok()?).ok()
    }
}
