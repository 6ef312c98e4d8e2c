//! Component data models

use serde::{Deserialize, Serialize};

use super::kind::{ComponentKind, KindSet};

/// Physical sub-part of a lot's equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Free-form classifier such as `batterie-lithium`
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(rename = "weight", alias = "weightKg", alias = "weight_kg")]
    pub weight_kg: f64,
    /// Free-form material classifier such as `lithium-ion`
    #[serde(default)]
    pub material: String,
}

impl Component {
    pub fn new(component_type: impl Into<String>, weight_kg: f64, material: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            weight_kg,
            material: material.into(),
        }
    }

    pub fn kinds(&self) -> KindSet {
        ComponentKind::classify(&self.component_type)
    }

    pub fn is(&self, kind: ComponentKind) -> bool {
        self.kinds().contains(kind)
    }

    /// Material counts toward the sorted-plastics stream
    pub fn has_plastic_material(&self) -> bool {
        self.material.to_lowercase().contains("plastique")
    }
}

/// One piece of equipment listed on a lot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub name: String,
}

impl EquipmentItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
