use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a showroom catalog item (e.g. `"lounge"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Index of a node in a scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A half-line used for pick queries. The direction is always unit length
/// or zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Distance along `ray` to the first front-face intersection (slab
    /// method). A ray starting inside the box only meets back faces, so it
    /// reports no hit.
    pub fn ray_distance(&self, ray: &Ray) -> Option<f32> {
        let dir = ray.direction;
        if dir == Vec3::ZERO {
            return None;
        }
        let inv = Vec3::new(
            if dir.x.abs() > 1e-6 { 1.0 / dir.x } else { f32::MAX },
            if dir.y.abs() > 1e-6 { 1.0 / dir.y } else { f32::MAX },
            if dir.z.abs() > 1e-6 { 1.0 / dir.z } else { f32::MAX },
        );

        let t1 = (self.min - ray.origin) * inv;
        let t2 = (self.max - ray.origin) * inv;
        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        if tmin < 0.0 || tmin > tmax {
            return None;
        }
        Some(tmin)
    }
}

/// Convert a `0xRRGGBB` colour into normalised RGBA.
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_box_in_front() {
        let b = Aabb::from_center_size(Vec3::new(0.0, 1.0, -5.0), Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        let t = b.ray_distance(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_box_behind() {
        let b = Aabb::from_center_size(Vec3::new(0.0, 1.0, 5.0), Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(b.ray_distance(&ray).is_none());
    }

    #[test]
    fn ray_from_inside_never_hits() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        for dir in [Vec3::X, Vec3::NEG_Z, Vec3::new(0.3, -0.4, 0.8)] {
            assert!(b.ray_distance(&Ray::new(Vec3::ZERO, dir)).is_none());
        }
    }

    #[test]
    fn ray_starting_on_face_hits_at_zero() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        assert_eq!(b.ray_distance(&ray), Some(0.0));
    }

    #[test]
    fn zero_direction_never_hits() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(2.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        assert!(b.ray_distance(&ray).is_none());
    }

    #[test]
    fn union_and_center() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::ZERO);
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);
        assert_eq!(u.center(), Vec3::ZERO);
        assert_eq!(u.size(), Vec3::splat(2.0));
    }

    #[test]
    fn hex_colour_conversion() {
        let c = hex_to_rgba(0xff8000);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn item_id_display() {
        assert_eq!(ItemId::new("lounge").to_string(), "lounge");
    }
}
