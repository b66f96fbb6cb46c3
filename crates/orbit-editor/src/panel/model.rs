//! Displayed panel state

use std::collections::HashMap;

use super::field::FieldId;

/// Everything the property panels show
#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    values: HashMap<FieldId, String>,
    /// Transform panel shown
    pub transform_visible: bool,
    /// CAD panel shown
    pub cad_visible: bool,
    /// Transform panel title
    pub header: String,
}

impl Default for PanelModel {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            transform_visible: false,
            cad_visible: false,
            header: "Transform".to_string(),
        }
    }
}

impl PanelModel {
    /// Current text of a field, empty when never written
    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: FieldId, text: impl Into<String>) {
        self.values.insert(field, text.into());
    }
}
