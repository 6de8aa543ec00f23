use crate::catalog::{Catalog, CatalogEntry};
use showroom_common::{CameraPose, ItemId, NodeId, Ray};

/// Nearest intersection reported by a [`SpatialQuery`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
}

/// Spatial capability supplied by the rendering collaborator.
pub trait SpatialQuery {
    /// Nearest hit along `ray` among the registered pickable set and their
    /// descendants.
    fn nearest_pickable(&self, ray: &Ray) -> Option<Hit>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Catalog back-reference carried directly by `node`.
    fn item_ref(&self, node: NodeId) -> Option<&ItemId>;
}

/// Result of a successful pick. Lives for one click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'c> {
    pub entry: &'c CatalogEntry,
    pub node: NodeId,
    pub distance: f32,
}

/// Screen-centre picker. The pointer is hidden and centred while captured,
/// so the pick ray is simply the camera's forward axis.
#[derive(Debug, Clone, Copy)]
pub struct HotspotPicker {
    max_distance: f32,
}

/// Deepest composition the ancestor walk will follow.
const MAX_DEPTH: usize = 64;

impl Default for HotspotPicker {
    fn default() -> Self {
        Self {
            max_distance: f32::INFINITY,
        }
    }
}

impl HotspotPicker {
    pub fn with_max_distance(max_distance: f32) -> Self {
        Self { max_distance }
    }

    pub fn ray(pose: &CameraPose) -> Ray {
        Ray::new(pose.position, pose.forward())
    }

    pub fn pick<'c>(
        &self,
        pose: &CameraPose,
        scene: &dyn SpatialQuery,
        catalog: &'c Catalog,
    ) -> Option<Selection<'c>> {
        let hit = scene.nearest_pickable(&Self::ray(pose))?;
        if hit.distance > self.max_distance {
            return None;
        }
        let id = Self::owning_item(scene, hit.node)?;
        match catalog.get(id) {
            Some(entry) => {
                tracing::debug!(item = %entry.id, distance = hit.distance, "picked");
                Some(Selection {
                    entry,
                    node: hit.node,
                    distance: hit.distance,
                })
            }
            None => {
                tracing::warn!(item = %id, "pick hit an item missing from the catalog");
                None
            }
        }
    }

    /// First item reference on `node` or one of its ancestors.
    fn owning_item(scene: &dyn SpatialQuery, node: NodeId) -> Option<&ItemId> {
        let mut current = Some(node);
        for _ in 0..MAX_DEPTH {
            let n = current?;
            if let Some(id) = scene.item_ref(n) {
                return Some(id);
            }
            current = scene.parent(n);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use showroom_common::Aabb;
    use std::collections::BTreeMap;

    /// Flat list of boxes; only `pickable` ones answer queries.
    #[derive(Default)]
    struct BoxScene {
        boxes: Vec<(Aabb, Option<NodeId>, bool)>,
        refs: BTreeMap<NodeId, ItemId>,
    }

    impl BoxScene {
        fn add(
            &mut self,
            bounds: Aabb,
            item: Option<&str>,
            parent: Option<NodeId>,
            pickable: bool,
        ) -> NodeId {
            let id = NodeId(self.boxes.len() as u32);
            if let Some(item) = item {
                self.refs.insert(id, ItemId::new(item));
            }
            self.boxes.push((bounds, parent, pickable));
            id
        }
    }

    impl SpatialQuery for BoxScene {
        fn nearest_pickable(&self, ray: &Ray) -> Option<Hit> {
            self.boxes
                .iter()
                .enumerate()
                .filter(|(_, b)| b.2)
                .filter_map(|(i, b)| {
                    b.0.ray_distance(ray).map(|distance| Hit {
                        node: NodeId(i as u32),
                        distance,
                    })
                })
                .min_by(|a, b| a.distance.total_cmp(&b.distance))
        }

        fn parent(&self, node: NodeId) -> Option<NodeId> {
            self.boxes.get(node.0 as usize).and_then(|b| b.1)
        }

        fn item_ref(&self, node: NodeId) -> Option<&ItemId> {
            self.refs.get(&node)
        }
    }

    fn cube_at(z: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(0.0, 1.7, z), Vec3::ONE)
    }

    fn pose() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 1.7, 5.0), 0.0, 0.0)
    }

    #[test]
    fn empty_scene_selects_nothing() {
        let scene = BoxScene::default();
        let catalog = Catalog::showroom();
        assert!(HotspotPicker::default().pick(&pose(), &scene, &catalog).is_none());
    }

    #[test]
    fn single_interactable_is_selected() {
        let mut scene = BoxScene::default();
        scene.add(cube_at(0.0), Some("bar"), None, true);
        scene.add(cube_at(-5.0), None, None, true);
        let catalog = Catalog::showroom();
        let sel = HotspotPicker::default().pick(&pose(), &scene, &catalog).unwrap();
        assert_eq!(sel.entry.id.as_str(), "bar");
        assert!((sel.distance - 4.5).abs() < 1e-4);
    }

    #[test]
    fn unregistered_geometry_in_front_is_ignored() {
        let mut scene = BoxScene::default();
        scene.add(cube_at(2.0), None, None, false);
        scene.add(cube_at(0.0), Some("lamp"), None, true);
        let catalog = Catalog::showroom();
        let sel = HotspotPicker::default().pick(&pose(), &scene, &catalog).unwrap();
        assert_eq!(sel.entry.id.as_str(), "lamp");
    }

    #[test]
    fn child_mesh_resolves_through_parent() {
        let mut scene = BoxScene::default();
        let group = scene.add(Aabb::new(Vec3::ZERO, Vec3::ZERO), Some("dining"), None, false);
        let leg = scene.add(cube_at(0.0), None, Some(group), true);
        let catalog = Catalog::showroom();
        let sel = HotspotPicker::default().pick(&pose(), &scene, &catalog).unwrap();
        assert_eq!(sel.entry.id.as_str(), "dining");
        assert_eq!(sel.node, leg);
    }

    #[test]
    fn nearest_hit_without_reference_selects_nothing() {
        let mut scene = BoxScene::default();
        scene.add(cube_at(2.0), None, None, true);
        scene.add(cube_at(0.0), Some("bar"), None, true);
        let catalog = Catalog::showroom();
        assert!(HotspotPicker::default().pick(&pose(), &scene, &catalog).is_none());
    }

    #[test]
    fn unknown_item_selects_nothing() {
        let mut scene = BoxScene::default();
        scene.add(cube_at(0.0), Some("piano"), None, true);
        let catalog = Catalog::showroom();
        assert!(HotspotPicker::default().pick(&pose(), &scene, &catalog).is_none());
    }

    #[test]
    fn max_distance_limits_reach() {
        let mut scene = BoxScene::default();
        scene.add(cube_at(0.0), Some("bar"), None, true);
        let catalog = Catalog::showroom();
        assert!(
            HotspotPicker::with_max_distance(2.0)
                .pick(&pose(), &scene, &catalog)
                .is_none()
        );
    }
}
