//! Building style hierarchy.
//!
//! A building is a tree of style items (facade, div, level, basement...).
//! Style attributes defined on an item apply to that item and, unless
//! overridden, to its descendants. The tree is stored as a flat arena with
//! parent indices so ancestor walks are cheap.

use serde::Deserialize;
use std::collections::HashMap;

/// The role of an item in the building style hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// The building root.
    Building,
    /// An exterior wall surface.
    Facade,
    /// A vertical subdivision of a facade.
    Div,
    /// A horizontal floor band.
    Level,
    /// The below-grade or ground-contact band.
    Basement,
    /// The roof surface.
    Roof,
}

/// One node in the building style hierarchy.
#[derive(Debug, Clone)]
pub struct Item {
    pub kind: ItemKind,
    /// Index of the parent item within the building arena.
    pub parent: Option<usize>,
    /// Style attributes defined directly on this item.
    pub style: HashMap<String, String>,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            parent: None,
            style: HashMap::new(),
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }

    /// Get a style attribute defined directly on this item.
    pub fn style_attr(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(|s| s.as_str())
    }
}

/// A building: an arena of style items rooted at item 0.
#[derive(Debug, Clone, Default)]
pub struct Building {
    items: Vec<Item>,
}

impl Building {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root-level item and return its index.
    pub fn add_root(&mut self, item: Item) -> usize {
        debug_assert!(item.parent.is_none());
        self.items.push(item);
        self.items.len() - 1
    }

    /// Add a child of an existing item and return its index.
    pub fn add_child(&mut self, parent: usize, mut item: Item) -> usize {
        item.parent = Some(parent);
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn item(&self, index: usize) -> &Item {
        &self.items[index]
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Resolve a style attribute on an item, walking up the ancestor
    /// chain until a definition is found.
    ///
    /// This is the explicit form of the deep style lookup: a basement
    /// without its own style block inherits the cladding attributes of
    /// its facade, which inherits from the building root.
    pub fn style_attr_deep(&self, item: usize, name: &str) -> Option<&str> {
        let mut current = Some(item);
        while let Some(index) = current {
            let item = &self.items[index];
            if let Some(value) = item.style_attr(name) {
                return Some(value);
            }
            current = item.parent;
        }
        None
    }

    /// Build a building from a declarative item tree.
    pub fn from_spec(spec: &ItemSpec) -> Self {
        let mut building = Building::new();
        let root = building.add_root(Item {
            kind: spec.kind,
            parent: None,
            style: spec.style.clone(),
        });
        for child in &spec.children {
            Self::add_spec_children(&mut building, root, child);
        }
        building
    }

    fn add_spec_children(building: &mut Building, parent: usize, spec: &ItemSpec) {
        let index = building.add_child(
            parent,
            Item {
                kind: spec.kind,
                parent: None,
                style: spec.style.clone(),
            },
        );
        for child in &spec.children {
            Self::add_spec_children(building, index, child);
        }
    }
}

/// Declarative item tree, as read from a building JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub kind: ItemKind,
    #[serde(default)]
    pub style: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<ItemSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_attr_deep() {
        let mut building = Building::new();
        let root = building.add_root(
            Item::new(ItemKind::Building)
                .with_style("claddingMaterial", "brick")
                .with_style("claddingColor", "red"),
        );
        let facade = building.add_child(root, Item::new(ItemKind::Facade));
        let basement = building.add_child(
            facade,
            Item::new(ItemKind::Basement).with_style("claddingColor", "gray"),
        );

        // Inherited from the root
        assert_eq!(building.style_attr_deep(facade, "claddingMaterial"), Some("brick"));
        assert_eq!(building.style_attr_deep(facade, "claddingColor"), Some("red"));

        // Overridden locally, material still inherited
        assert_eq!(building.style_attr_deep(basement, "claddingColor"), Some("gray"));
        assert_eq!(building.style_attr_deep(basement, "claddingMaterial"), Some("brick"));

        assert_eq!(building.style_attr_deep(basement, "roofShape"), None);
    }

    #[test]
    fn test_from_spec() {
        let json = r#"{
            "kind": "building",
            "style": {"claddingColor": "red"},
            "children": [
                {"kind": "facade", "children": [{"kind": "basement"}]}
            ]
        }"#;
        let spec: ItemSpec = serde_json::from_str(json).unwrap();
        let building = Building::from_spec(&spec);

        assert_eq!(building.items().len(), 3);
        assert_eq!(building.item(0).kind, ItemKind::Building);
        assert_eq!(building.item(2).kind, ItemKind::Basement);
        assert_eq!(building.style_attr_deep(2, "claddingColor"), Some("red"));
    }
}
