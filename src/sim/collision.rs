//! Collision detection for rectangular sprites
//!
//! Every entity on the playfield is an axis-aligned box anchored at its
//! top-left corner, so a single overlap test covers bullets, enemies and
//! the player ship.

use glam::Vec2;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: pos,
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test; boxes that only share an edge do not collide
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        let bullet = Aabb::new(Vec2::new(100.0, 100.0), 5.0, 15.0);
        let enemy = Aabb::new(Vec2::new(90.0, 95.0), 40.0, 30.0);
        assert!(bullet.intersects(&enemy));
        assert!(enemy.intersects(&bullet));
    }

    #[test]
    fn test_overlap_miss() {
        let bullet = Aabb::new(Vec2::new(0.0, 0.0), 5.0, 15.0);
        let enemy = Aabb::new(Vec2::new(200.0, 200.0), 40.0, 30.0);
        assert!(!bullet.intersects(&enemy));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Bullet's right edge exactly on the enemy's left edge
        let bullet = Aabb::new(Vec2::new(35.0, 10.0), 5.0, 15.0);
        let enemy = Aabb::new(Vec2::new(40.0, 10.0), 40.0, 30.0);
        assert!(!bullet.intersects(&enemy));

        // Stacked vertically, sharing the horizontal edge
        let below = Aabb::new(Vec2::new(40.0, 40.0), 40.0, 30.0);
        assert!(!enemy.intersects(&below));
    }

    #[test]
    fn test_contained_box() {
        let outer = Aabb::new(Vec2::ZERO, 100.0, 100.0);
        let inner = Aabb::new(Vec2::new(10.0, 10.0), 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_center() {
        let b = Aabb::new(Vec2::new(10.0, 20.0), 40.0, 30.0);
        assert_eq!(b.center(), Vec2::new(30.0, 35.0));
        assert_eq!(b.max(), Vec2::new(50.0, 50.0));
    }
}
