//! Geometric primitives shared by hit testing, vertex snapping, and
//! measurement derivation. Everything here is pure and operates on world-space
//! coordinates.

use bevy::prelude::*;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Total length of an open polyline (sum of consecutive segment lengths).
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Unsigned area of a simple polygon via the shoelace formula.
///
/// The ring is closed implicitly (last vertex connects back to the first).
/// Fewer than 3 vertices yields 0.
pub fn polygon_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sum += points[i].x * points[j].y;
        sum -= points[j].x * points[i].y;
    }
    sum.abs() / 2.0
}

/// Even-odd ray cast along +x. Boundary points are not guaranteed either way.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if ((pi.y > point.y) != (pj.y > point.y))
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from a point to a line segment (projection clamped to the segment).
pub fn point_to_segment_distance(point: Vec2, seg_start: Vec2, seg_end: Vec2) -> f32 {
    let line_vec = seg_end - seg_start;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return point.distance(seg_start);
    }

    let t = ((point - seg_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    point.distance(seg_start + line_vec * t)
}

/// Check if a point is within a given distance of any segment of a polyline.
pub fn point_near_polyline(point: Vec2, points: &[Vec2], threshold: f32) -> bool {
    points
        .windows(2)
        .any(|w| point_to_segment_distance(point, w[0], w[1]) <= threshold)
}

/// Nearest candidate strictly closer than `threshold`, or `None`.
///
/// Ties keep the earliest candidate, so snapping is stable under reordering of
/// equally-distant vertices.
pub fn find_nearest_point(candidates: &[Vec2], target: Vec2, threshold: f32) -> Option<Vec2> {
    let mut nearest = None;
    let mut best = threshold;

    for &candidate in candidates {
        let d = distance(candidate, target);
        if d < best {
            best = d;
            nearest = Some(candidate);
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_100() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ]
    }

    // distance / polyline_length tests
    #[test]
    fn test_distance_345_triangle() {
        let d = distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_polyline_length_two_segments() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(3.0, 14.0)];
        assert!((polyline_length(&points) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_polyline_length_single_point_is_zero() {
        assert_eq!(polyline_length(&[Vec2::new(5.0, 5.0)]), 0.0);
    }

    #[test]
    fn test_polyline_length_empty_is_zero() {
        assert_eq!(polyline_length(&[]), 0.0);
    }

    // polygon_area tests
    #[test]
    fn test_polygon_area_square() {
        assert!((polygon_area(&square_100()) - 10000.0).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_area_triangle() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        assert!((polygon_area(&points) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_polygon_area_under_two_points_is_zero() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Vec2::ZERO]), 0.0);
        assert_eq!(polygon_area(&[Vec2::ZERO, Vec2::new(10.0, 0.0)]), 0.0);
    }

    #[test]
    fn test_polygon_area_vertex_rotation_invariant() {
        // Starting the ring at a different vertex must not change the area
        let base = square_100();
        let area = polygon_area(&base);
        for shift in 1..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert!((polygon_area(&rotated) - area).abs() < 1e-3);
        }
    }

    #[test]
    fn test_polygon_area_reversal_invariant() {
        // Winding direction must not matter (area is unsigned)
        let mut reversed = square_100();
        reversed.reverse();
        assert!((polygon_area(&reversed) - 10000.0).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_area_regular_ngon_approaches_circle() {
        // A 64-gon inscribed in a circle of radius 100 is within 1% of pi*r^2
        let r = 100.0f32;
        let n = 64;
        let points: Vec<Vec2> = (0..n)
            .map(|i| {
                let angle = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec2::new(r * angle.cos(), r * angle.sin())
            })
            .collect();
        let expected = std::f32::consts::PI * r * r;
        let area = polygon_area(&points);
        assert!((area - expected).abs() / expected < 0.01);
    }

    // point_in_polygon tests
    #[test]
    fn test_point_in_polygon_inside() {
        assert!(point_in_polygon(Vec2::new(50.0, 50.0), &square_100()));
    }

    #[test]
    fn test_point_in_polygon_outside_bbox_is_false() {
        let polygon = square_100();
        let outside = [
            Vec2::new(-10.0, 50.0),
            Vec2::new(110.0, 50.0),
            Vec2::new(50.0, -10.0),
            Vec2::new(50.0, 110.0),
            Vec2::new(-500.0, -500.0),
        ];
        for p in outside {
            assert!(!point_in_polygon(p, &polygon), "{p:?} should be outside");
        }
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // L-shape: the notch at the top right is outside
        let polygon = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(50.0, 50.0),
            Vec2::new(50.0, 100.0),
            Vec2::new(0.0, 100.0),
        ];
        assert!(point_in_polygon(Vec2::new(25.0, 75.0), &polygon));
        assert!(point_in_polygon(Vec2::new(75.0, 25.0), &polygon));
        assert!(!point_in_polygon(Vec2::new(75.0, 75.0), &polygon));
    }

    #[test]
    fn test_point_in_polygon_degenerate_is_false() {
        assert!(!point_in_polygon(Vec2::ZERO, &[]));
        assert!(!point_in_polygon(Vec2::ZERO, &[Vec2::ZERO, Vec2::new(10.0, 0.0)]));
    }

    // point_to_segment_distance tests
    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_distance(
            Vec2::new(5.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoint() {
        // Projection falls past the end, so the answer is the endpoint distance
        let d = point_to_segment_distance(
            Vec2::new(14.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_distance_degenerate_segment() {
        let p = Vec2::new(3.0, 4.0);
        let d = point_to_segment_distance(p, Vec2::ZERO, Vec2::ZERO);
        assert!((d - 5.0).abs() < 1e-6);
    }

    // point_near_polyline tests
    #[test]
    fn test_point_near_polyline_within_threshold() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)];
        assert!(point_near_polyline(Vec2::new(50.0, 5.0), &points, 10.0));
        assert!(point_near_polyline(Vec2::new(95.0, 50.0), &points, 10.0));
    }

    #[test]
    fn test_point_near_polyline_beyond_threshold() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)];
        assert!(!point_near_polyline(Vec2::new(50.0, 15.0), &points, 10.0));
    }

    #[test]
    fn test_point_near_polyline_single_point_never_matches() {
        // One vertex has no segments
        assert!(!point_near_polyline(Vec2::ZERO, &[Vec2::ZERO], 10.0));
    }

    // find_nearest_point tests
    #[test]
    fn test_find_nearest_picks_closest_within_threshold() {
        let candidates = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let result = find_nearest_point(&candidates, Vec2::new(1.0, 0.0), 5.0);
        assert_eq!(result, Some(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn test_find_nearest_none_outside_threshold() {
        let candidates = [Vec2::new(100.0, 100.0)];
        assert_eq!(find_nearest_point(&candidates, Vec2::ZERO, 5.0), None);
    }

    #[test]
    fn test_find_nearest_threshold_is_exclusive() {
        let candidates = [Vec2::new(5.0, 0.0)];
        assert_eq!(find_nearest_point(&candidates, Vec2::ZERO, 5.0), None);
        assert!(find_nearest_point(&candidates, Vec2::ZERO, 5.01).is_some());
    }

    #[test]
    fn test_find_nearest_empty_candidates() {
        assert_eq!(find_nearest_point(&[], Vec2::ZERO, 50.0), None);
    }

    #[test]
    fn test_find_nearest_tie_keeps_first() {
        let candidates = [Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0)];
        let result = find_nearest_point(&candidates, Vec2::ZERO, 10.0);
        assert_eq!(result, Some(Vec2::new(-3.0, 0.0)));
    }

    #[test]
    fn test_find_nearest_returns_candidate_verbatim() {
        // The returned point is the candidate itself, bit-for-bit
        let candidate = Vec2::new(12.345_678, -0.000_123);
        let result = find_nearest_point(&[candidate], Vec2::new(12.0, 0.0), 5.0);
        assert_eq!(result, Some(candidate));
        let got = result.unwrap();
        assert_eq!(got.x.to_bits(), candidate.x.to_bits());
        assert_eq!(got.y.to_bits(), candidate.y.to_bits());
    }
}
