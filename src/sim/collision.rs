//! Axis-aligned collision detection
//!
//! Every box is computed from the entity's own position and size, so the
//! resolver never depends on what the renderer drew.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Bounded;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Check whether two entities overlap
pub fn has_collision<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    a.aabb().overlaps(&b.aabb())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Box2(Vec2, Vec2);

    impl Bounded for Box2 {
        fn pos(&self) -> Vec2 {
            self.0
        }
        fn size(&self) -> Vec2 {
            self.1
        }
    }

    #[test]
    fn test_overlap() {
        let a = Box2(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Box2(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(has_collision(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Box2(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Box2(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Box2(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!has_collision(&a, &right));
        assert!(!has_collision(&a, &below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Box2(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Box2(Vec2::new(5.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!has_collision(&a, &b));
    }

    #[test]
    fn test_containment() {
        let outer = Box2(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Box2(Vec2::new(40.0, 40.0), Vec2::new(6.0, 10.0));
        assert!(has_collision(&outer, &inner));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Box2(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Box2(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(has_collision(&a, &b), has_collision(&b, &a));
        }
    }
}
