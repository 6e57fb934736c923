//! Circle vs axis-aligned rectangle overlap

use glam::Vec2;

/// Point of the rectangle `[min, min + size]` nearest to `point`
pub fn closest_point_on_rect(point: Vec2, min: Vec2, size: Vec2) -> Vec2 {
    let max = min + size.max(Vec2::ZERO);
    point.clamp(min, max)
}

/// Whether a circle overlaps a rectangle
///
/// Strict: a circle exactly touching an edge does not count.
pub fn circle_rect_overlap(center: Vec2, radius: f32, min: Vec2, size: Vec2) -> bool {
    let closest = closest_point_on_rect(center, min, size);
    center.distance_squared(closest) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Vec2 = Vec2::new(100.0, 400.0);
    const SIZE: Vec2 = Vec2::new(35.0, 45.0);

    #[test]
    fn test_center_inside() {
        assert!(circle_rect_overlap(Vec2::new(110.0, 420.0), 1.0, MIN, SIZE));
    }

    #[test]
    fn test_center_on_corner() {
        assert!(circle_rect_overlap(MIN, 12.0, MIN, SIZE));
    }

    #[test]
    fn test_far_away() {
        assert!(!circle_rect_overlap(Vec2::new(300.0, 100.0), 15.0, MIN, SIZE));
    }

    #[test]
    fn test_touching_edge_is_not_overlap() {
        // 12 units left of the left edge
        assert!(!circle_rect_overlap(Vec2::new(88.0, 420.0), 12.0, MIN, SIZE));
        assert!(circle_rect_overlap(Vec2::new(88.5, 420.0), 12.0, MIN, SIZE));
    }

    #[test]
    fn test_diagonal_near_corner() {
        // 3-4-5 triangle off the top-left corner
        let center = MIN - Vec2::new(3.0, 4.0);
        assert!(!circle_rect_overlap(center, 5.0, MIN, SIZE));
        assert!(circle_rect_overlap(center, 5.1, MIN, SIZE));
    }
}
