//! Item descriptors - the flat view of one slot's content that the filter reads.

use serde::{Deserialize, Serialize};

use crate::code::ItemCode;

/// Material classes the filter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialClass {
    /// No material information.
    #[default]
    None,
    /// Leaves, flowers, crops, grass.
    Plant,
    /// Water, lava and other fluids.
    Liquid,
    /// Any other solid material.
    Other,
}

/// Immutable description of the item held in a slot.
///
/// Built fresh from the live slot for every evaluation and never persisted by
/// the filter itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    /// Item code, e.g. `game:rawclay`.
    pub code: ItemCode,
    /// Whether the stack holds a placeable block (as opposed to a plain item).
    #[serde(default = "default_is_block")]
    pub is_block: bool,
    /// Whether the item carries nutrition properties.
    #[serde(default)]
    pub has_nutrition: bool,
    /// Whether the block is a meal container (pies, cooked meals).
    #[serde(default)]
    pub is_meal: bool,
    /// Block material class.
    #[serde(default)]
    pub material: MaterialClass,
    /// Block entity class name (chests, signs, ...), if any.
    #[serde(default)]
    pub entity_class: Option<String>,
}

fn default_is_block() -> bool {
    true
}

impl ItemDescriptor {
    /// A plain placeable block with no special properties.
    pub fn block(code: impl Into<ItemCode>) -> Self {
        Self {
            code: code.into(),
            is_block: true,
            has_nutrition: false,
            is_meal: false,
            material: MaterialClass::None,
            entity_class: None,
        }
    }

    /// A non-block item (tools, loose food, ...).
    pub fn item(code: impl Into<ItemCode>) -> Self {
        Self {
            is_block: false,
            ..Self::block(code)
        }
    }

    /// Set the material class.
    pub fn with_material(mut self, material: MaterialClass) -> Self {
        self.material = material;
        self
    }

    /// Attach a block entity class.
    pub fn with_entity_class(mut self, entity_class: impl Into<String>) -> Self {
        self.entity_class = Some(entity_class.into());
        self
    }

    /// Mark the item as carrying nutrition.
    pub fn with_nutrition(mut self) -> Self {
        self.has_nutrition = true;
        self
    }

    /// Mark the block as a meal container.
    pub fn as_meal(mut self) -> Self {
        self.is_meal = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_flags() {
        let pie = ItemDescriptor::block("game:pie-perfect")
            .as_meal()
            .with_entity_class("Pie");
        assert!(pie.is_block);
        assert!(pie.is_meal);
        assert_eq!(pie.entity_class.as_deref(), Some("Pie"));

        let knife = ItemDescriptor::item("game:knife-flint");
        assert!(!knife.is_block);
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{ "code": "game:leaves-grown-oak", "material": "plant" }"#;
        let item: ItemDescriptor = serde_json::from_str(json).unwrap();
        assert!(item.is_block);
        assert!(!item.has_nutrition);
        assert_eq!(item.material, MaterialClass::Plant);
        assert_eq!(item.code.path(), "leaves-grown-oak");
        assert!(item.entity_class.is_none());
    }
}
