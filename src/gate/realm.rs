//! Flanking regions of the counting bar.

use nalgebra::{Point2, Vector2};

/// One flanking region of the bar.
///
/// A realm is a four-vertex convex quadrilateral hugging one side of the
/// bar segment, stored in ring order: offset-start, offset-end, end, start.
/// The two realms of a gate share the bar segment as a common edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Realm {
    /// Vertices in ring order (offset-start, offset-end, end, start).
    pub vertices: [Point2<f32>; 4],
}

impl Realm {
    /// Build the realm on one side of the segment `start -> end`.
    ///
    /// `offset` is the side vector (signed multiple of the bar normal);
    /// the realm spans from the offset copy of the segment back to the
    /// segment itself.
    #[inline]
    pub fn flanking(start: Point2<f32>, end: Point2<f32>, offset: Vector2<f32>) -> Self {
        Self {
            vertices: [start + offset, end + offset, end, start],
        }
    }

    /// Boundary-inclusive point-in-quadrilateral test.
    ///
    /// A point exactly on an edge or vertex counts as inside. Both realms
    /// of a gate use this same convention, so a point resting on the
    /// shared bar edge is inside both.
    pub fn contains(&self, point: Point2<f32>) -> bool {
        let mut has_pos = false;
        let mut has_neg = false;
        for i in 0..4 {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % 4];
            let cross = (b.x - a.x) * (point.y - a.y) - (b.y - a.y) * (point.x - a.x);
            if cross > 0.0 {
                has_pos = true;
            } else if cross < 0.0 {
                has_neg = true;
            }
        }
        // Inside iff every edge cross product shares a sign; zeros are on
        // the boundary and never disqualify.
        !(has_pos && has_neg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Realm {
        // Unit-offset realm over a horizontal segment (0,10)-(10,10),
        // offset upward: vertices (0,5), (10,5), (10,10), (0,10).
        Realm::flanking(
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Vector2::new(0.0, -5.0),
        )
    }

    #[test]
    fn test_contains_interior() {
        assert!(square().contains(Point2::new(5.0, 7.5)));
    }

    #[test]
    fn test_contains_outside() {
        assert!(!square().contains(Point2::new(5.0, 12.0)));
        assert!(!square().contains(Point2::new(-1.0, 7.5)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // On the segment edge itself.
        assert!(square().contains(Point2::new(5.0, 10.0)));
        // On a vertex.
        assert!(square().contains(Point2::new(0.0, 5.0)));
        // On the offset edge.
        assert!(square().contains(Point2::new(3.0, 5.0)));
    }

    #[test]
    fn test_shared_edge_inside_both_realms() {
        let start = Point2::new(0.0, 10.0);
        let end = Point2::new(10.0, 10.0);
        let up = Realm::flanking(start, end, Vector2::new(0.0, -5.0));
        let down = Realm::flanking(start, end, Vector2::new(0.0, 5.0));
        let on_bar = Point2::new(4.0, 10.0);
        assert!(up.contains(on_bar));
        assert!(down.contains(on_bar));
    }

    #[test]
    fn test_skewed_parallelogram() {
        // Diagonal bar, normal offset; the realm is a true parallelogram.
        let realm = Realm::flanking(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Vector2::new(-2.0, 2.0),
        );
        assert!(realm.contains(Point2::new(4.0, 6.0)));
        assert!(!realm.contains(Point2::new(6.0, 4.0)));
    }
}
