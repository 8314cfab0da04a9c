//! In-memory material presets for cost estimation.
//!
//! A material carries a unit cost and a color. Applying one to an object
//! copies both onto the object and links the id, so later edits to the
//! library never silently change existing estimates.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::map::object::{MapObject, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u64);

/// How a material's unit cost scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Priced per foot, applies to fences
    Linear,
    /// Priced per acre, applies to zones
    Area,
    /// Flat price per placement, applies to points
    Item,
}

impl MaterialKind {
    pub fn all() -> &'static [MaterialKind] {
        &[MaterialKind::Linear, MaterialKind::Area, MaterialKind::Item]
    }

    /// Label for the unit badge in the library list.
    pub fn unit_label(&self) -> &'static str {
        match self {
            MaterialKind::Linear => "Per Foot",
            MaterialKind::Area => "Per Acre",
            MaterialKind::Item => "Per Item",
        }
    }

    /// Label for the kind picker when adding a material.
    pub fn picker_label(&self) -> &'static str {
        match self {
            MaterialKind::Linear => "Linear (Fence)",
            MaterialKind::Area => "Area (Seed/Fert)",
            MaterialKind::Item => "Item (Gate/Post)",
        }
    }

    /// Whether this material can be assigned to objects of the given kind.
    pub fn matches(&self, shape: ShapeKind) -> bool {
        matches!(
            (self, shape),
            (MaterialKind::Linear, ShapeKind::Polyline)
                | (MaterialKind::Area, ShapeKind::Polygon)
                | (MaterialKind::Item, ShapeKind::Point)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub kind: MaterialKind,
    pub unit_cost: f32,
    pub color: Color,
}

impl Material {
    /// Link this material to an object, copying its cost and color.
    pub fn apply_to(&self, object: &mut MapObject) {
        object.material = Some(self.id);
        object.unit_cost = self.unit_cost;
        object.color = self.color;
    }
}

/// The session's material presets. Starts empty.
#[derive(Resource, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    next_id: u64,
}

impl MaterialLibrary {
    pub fn add(&mut self, name: String, kind: MaterialKind, unit_cost: f32, color: Color) -> MaterialId {
        let id = MaterialId(self.next_id);
        self.next_id += 1;
        self.materials.push(Material {
            id,
            name,
            kind,
            unit_cost,
            color,
        });
        id
    }

    /// Remove a preset. Objects that linked it keep their copied cost and
    /// color; the dangling link just reads back as unset.
    pub fn remove(&mut self, id: MaterialId) {
        self.materials.retain(|m| m.id != id);
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// Presets assignable to the given shape kind.
    pub fn for_shape(&self, shape: ShapeKind) -> impl Iterator<Item = &Material> {
        self.materials.iter().filter(move |m| m.kind.matches(shape))
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::object::{ObjectId, Shape};

    fn library_with_fence_wire() -> (MaterialLibrary, MaterialId) {
        let mut library = MaterialLibrary::default();
        let id = library.add(
            "Woven Wire".to_string(),
            MaterialKind::Linear,
            2.50,
            Color::srgb(0.5, 0.5, 0.5),
        );
        (library, id)
    }

    #[test]
    fn test_library_starts_empty() {
        let library = MaterialLibrary::default();
        assert!(library.is_empty());
        assert_eq!(library.len(), 0);
    }

    #[test]
    fn test_add_allocates_unique_ids() {
        let mut library = MaterialLibrary::default();
        let a = library.add("A".to_string(), MaterialKind::Linear, 1.0, Color::WHITE);
        let b = library.add("B".to_string(), MaterialKind::Area, 2.0, Color::WHITE);
        assert_ne!(a, b);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_remove_deletes_only_target() {
        let mut library = MaterialLibrary::default();
        let a = library.add("A".to_string(), MaterialKind::Linear, 1.0, Color::WHITE);
        let b = library.add("B".to_string(), MaterialKind::Item, 2.0, Color::WHITE);
        library.remove(a);
        assert!(library.get(a).is_none());
        assert!(library.get(b).is_some());
    }

    #[test]
    fn test_for_shape_filters_by_kind() {
        let mut library = MaterialLibrary::default();
        library.add("Wire".to_string(), MaterialKind::Linear, 2.0, Color::WHITE);
        library.add("Seed".to_string(), MaterialKind::Area, 120.0, Color::WHITE);
        library.add("Gate".to_string(), MaterialKind::Item, 250.0, Color::WHITE);

        let fence_options: Vec<_> = library.for_shape(ShapeKind::Polyline).collect();
        assert_eq!(fence_options.len(), 1);
        assert_eq!(fence_options[0].name, "Wire");

        let zone_options: Vec<_> = library.for_shape(ShapeKind::Polygon).collect();
        assert_eq!(zone_options.len(), 1);
        assert_eq!(zone_options[0].name, "Seed");

        assert_eq!(library.for_shape(ShapeKind::Slope).count(), 0);
    }

    #[test]
    fn test_kind_matching() {
        assert!(MaterialKind::Linear.matches(ShapeKind::Polyline));
        assert!(!MaterialKind::Linear.matches(ShapeKind::Polygon));
        assert!(MaterialKind::Area.matches(ShapeKind::Polygon));
        assert!(MaterialKind::Item.matches(ShapeKind::Point));
        for kind in MaterialKind::all() {
            assert!(!kind.matches(ShapeKind::Slope));
        }
    }

    #[test]
    fn test_apply_to_copies_cost_and_color() {
        let (library, id) = library_with_fence_wire();
        let shape = Shape::polyline(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]).unwrap();
        let mut obj = MapObject::new(ObjectId(0), 1, shape);

        library.get(id).unwrap().apply_to(&mut obj);
        assert_eq!(obj.material, Some(id));
        assert_eq!(obj.unit_cost, 2.50);
        assert_eq!(obj.color, Color::srgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_removing_applied_material_leaves_object_intact() {
        let (mut library, id) = library_with_fence_wire();
        let shape = Shape::polyline(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]).unwrap();
        let mut obj = MapObject::new(ObjectId(0), 1, shape);
        library.get(id).unwrap().apply_to(&mut obj);

        library.remove(id);
        assert_eq!(obj.unit_cost, 2.50);
        assert_eq!(obj.material, Some(id));
        assert!(library.get(id).is_none());
    }

    #[test]
    fn test_material_serialization_roundtrip() {
        let material = Material {
            id: MaterialId(3),
            name: "T-Post".to_string(),
            kind: MaterialKind::Item,
            unit_cost: 8.99,
            color: Color::srgb(0.3, 0.3, 0.3),
        };
        let json = serde_json::to_string(&material).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, material.id);
        assert_eq!(back.name, material.name);
        assert_eq!(back.kind, material.kind);
    }
}
