//! Drawable map object types and the messages announcing their lifecycle.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::map::materials::MaterialId;
use crate::theme;

/// Session-unique object identifier.
///
/// Ids are never reused and increase in creation order. Hit testing walks
/// objects newest-id first so later objects win overlapping clicks, and the
/// renderer draws in id order so later objects sit on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Monotonic [`ObjectId`] allocator.
#[derive(Resource, Default)]
pub struct ObjectIds {
    next: u64,
}

impl ObjectIds {
    pub fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        id
    }
}

/// Geometry variants an object can carry.
///
/// Slope stores `[start, end]` with the arrow pointing start to end
/// (downhill). Polyline and polygon vertex minimums are enforced by the
/// checked constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Point(Vec2),
    Slope([Vec2; 2]),
    Polyline(Vec<Vec2>),
    Polygon(Vec<Vec2>),
}

impl Shape {
    /// Open path with at least 2 vertices, or `None`.
    pub fn polyline(points: Vec<Vec2>) -> Option<Self> {
        (points.len() >= 2).then_some(Shape::Polyline(points))
    }

    /// Closed region with at least 3 vertices, or `None`.
    pub fn polygon(points: Vec<Vec2>) -> Option<Self> {
        (points.len() >= 3).then_some(Shape::Polygon(points))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point(_) => ShapeKind::Point,
            Shape::Slope(_) => ShapeKind::Slope,
            Shape::Polyline(_) => ShapeKind::Polyline,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// All vertices, regardless of variant.
    pub fn points(&self) -> &[Vec2] {
        match self {
            Shape::Point(p) => std::slice::from_ref(p),
            Shape::Slope(points) => points,
            Shape::Polyline(points) | Shape::Polygon(points) => points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    Slope,
    Polyline,
    Polygon,
}

impl ShapeKind {
    /// Short label shown in the object list.
    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Point => "Point",
            ShapeKind::Slope => "Slope",
            ShapeKind::Polyline => "Fence",
            ShapeKind::Polygon => "Zone",
        }
    }

    /// Default name for the nth object of this kind (1-based).
    pub fn default_name(&self, ordinal: usize) -> String {
        match self {
            ShapeKind::Point => format!("Point {ordinal}"),
            ShapeKind::Slope => "Slope Vector".to_string(),
            ShapeKind::Polyline => format!("Fence {ordinal}"),
            ShapeKind::Polygon => format!("Zone {ordinal}"),
        }
    }

    fn default_color(&self) -> Color {
        match self {
            ShapeKind::Point => theme::POINT_DEFAULT,
            ShapeKind::Slope => theme::SLOPE_COLOR,
            ShapeKind::Polyline => theme::FENCE_DEFAULT,
            ShapeKind::Polygon => theme::ZONE_DEFAULT,
        }
    }

    fn default_opacity(&self) -> f32 {
        match self {
            ShapeKind::Polygon => theme::DEFAULT_ZONE_OPACITY,
            _ => 1.0,
        }
    }
}

/// A drawn object on the map.
///
/// Measurements and costs derived from the shape live in the sibling
/// `ObjectMetrics` component, never here.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct MapObject {
    pub id: ObjectId,
    pub name: String,
    pub shape: Shape,
    pub color: Color,
    /// Fill opacity, only meaningful for zones
    pub opacity: f32,
    pub visible: bool,
    pub material: Option<MaterialId>,
    /// Dollars per acre, per foot, or per item depending on the shape kind
    pub unit_cost: f32,
}

impl MapObject {
    /// New object with the kind's default name, color, and opacity.
    pub fn new(id: ObjectId, ordinal: usize, shape: Shape) -> Self {
        let kind = shape.kind();
        Self {
            id,
            name: kind.default_name(ordinal),
            shape,
            color: kind.default_color(),
            opacity: kind.default_opacity(),
            visible: true,
            material: None,
            unit_cost: 0.0,
        }
    }

    /// Unlink the material preset and zero the unit cost.
    pub fn clear_material(&mut self) {
        self.material = None;
        self.unit_cost = 0.0;
    }
}

#[derive(Component)]
pub struct Selected;

/// Announces a freshly spawned object so the app layer can select it and
/// return to the select tool.
#[derive(Message)]
pub struct ObjectCreated {
    pub entity: Entity,
    pub id: ObjectId,
}

/// Announces a selection change, `None` for cleared.
#[derive(Message)]
pub struct SelectionChanged {
    pub id: Option<ObjectId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ObjectIds tests
    #[test]
    fn test_object_ids_are_monotonic() {
        let mut ids = ObjectIds::default();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_object_ids_never_reuse() {
        let mut ids = ObjectIds::default();
        let mut seen = Vec::new();
        for _ in 0..100 {
            let id = ids.allocate();
            assert!(!seen.contains(&id));
            seen.push(id);
        }
    }

    // Shape constructor tests
    #[test]
    fn test_polyline_requires_two_points() {
        assert!(Shape::polyline(vec![]).is_none());
        assert!(Shape::polyline(vec![Vec2::ZERO]).is_none());
        assert!(Shape::polyline(vec![Vec2::ZERO, Vec2::X]).is_some());
    }

    #[test]
    fn test_polygon_requires_three_points() {
        assert!(Shape::polygon(vec![Vec2::ZERO, Vec2::X]).is_none());
        assert!(Shape::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).is_some());
    }

    #[test]
    fn test_points_accessor() {
        let point = Shape::Point(Vec2::new(1.0, 2.0));
        assert_eq!(point.points(), &[Vec2::new(1.0, 2.0)]);

        let slope = Shape::Slope([Vec2::ZERO, Vec2::new(5.0, 5.0)]);
        assert_eq!(slope.points().len(), 2);

        let polygon = Shape::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap();
        assert_eq!(polygon.points().len(), 3);
    }

    #[test]
    fn test_shape_kinds() {
        assert_eq!(Shape::Point(Vec2::ZERO).kind(), ShapeKind::Point);
        assert_eq!(Shape::Slope([Vec2::ZERO, Vec2::X]).kind(), ShapeKind::Slope);
        assert_eq!(
            Shape::polyline(vec![Vec2::ZERO, Vec2::X]).unwrap().kind(),
            ShapeKind::Polyline
        );
        assert_eq!(
            Shape::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap().kind(),
            ShapeKind::Polygon
        );
    }

    // Naming tests
    #[test]
    fn test_default_names_are_sequential() {
        assert_eq!(ShapeKind::Polygon.default_name(1), "Zone 1");
        assert_eq!(ShapeKind::Polygon.default_name(3), "Zone 3");
        assert_eq!(ShapeKind::Polyline.default_name(2), "Fence 2");
        assert_eq!(ShapeKind::Point.default_name(7), "Point 7");
    }

    #[test]
    fn test_slope_name_has_no_ordinal() {
        assert_eq!(ShapeKind::Slope.default_name(1), "Slope Vector");
        assert_eq!(ShapeKind::Slope.default_name(9), "Slope Vector");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ShapeKind::Polygon.label(), "Zone");
        assert_eq!(ShapeKind::Polyline.label(), "Fence");
        assert_eq!(ShapeKind::Slope.label(), "Slope");
        assert_eq!(ShapeKind::Point.label(), "Point");
    }

    // MapObject defaults tests
    #[test]
    fn test_new_zone_defaults() {
        let shape = Shape::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap();
        let obj = MapObject::new(ObjectId(0), 1, shape);
        assert_eq!(obj.name, "Zone 1");
        assert_eq!(obj.color, theme::ZONE_DEFAULT);
        assert_eq!(obj.opacity, theme::DEFAULT_ZONE_OPACITY);
        assert!(obj.visible);
        assert!(obj.material.is_none());
        assert_eq!(obj.unit_cost, 0.0);
    }

    #[test]
    fn test_new_fence_is_fully_opaque() {
        let shape = Shape::polyline(vec![Vec2::ZERO, Vec2::X]).unwrap();
        let obj = MapObject::new(ObjectId(1), 1, shape);
        assert_eq!(obj.color, theme::FENCE_DEFAULT);
        assert_eq!(obj.opacity, 1.0);
    }

    #[test]
    fn test_new_slope_is_blue() {
        let obj = MapObject::new(ObjectId(2), 1, Shape::Slope([Vec2::ZERO, Vec2::X]));
        assert_eq!(obj.color, theme::SLOPE_COLOR);
    }

    // Serialization tests
    #[test]
    fn test_shape_serialization_roundtrip() {
        let shapes = [
            Shape::Point(Vec2::new(1.5, -2.5)),
            Shape::Slope([Vec2::ZERO, Vec2::new(10.0, 10.0)]),
            Shape::polyline(vec![Vec2::ZERO, Vec2::X, Vec2::new(5.0, 5.0)]).unwrap(),
            Shape::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).unwrap(),
        ];
        for shape in shapes {
            let json = serde_json::to_string(&shape).unwrap();
            let back: Shape = serde_json::from_str(&json).unwrap();
            assert_eq!(shape, back);
        }
    }

    #[test]
    fn test_map_object_serialization_roundtrip() {
        let obj = MapObject::new(
            ObjectId(42),
            3,
            Shape::polygon(vec![Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(0.0, 100.0)]).unwrap(),
        );
        let json = serde_json::to_string(&obj).unwrap();
        let back: MapObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, obj.id);
        assert_eq!(back.name, obj.name);
        assert_eq!(back.shape, obj.shape);
        assert_eq!(back.visible, obj.visible);
    }
}
