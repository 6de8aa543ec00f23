use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use showroom_assets::MaterialLibrary;
use showroom_common::ItemId;
use showroom_render::{NodeKind, SceneGraph};

/// Tint applied to the boxes of the selected item.
const HIGHLIGHT: [f32; 3] = [1.0, 0.72, 0.2];
const HIGHLIGHT_MIX: f32 = 0.35;

/// Per-box GPU instance: model matrix columns, colour, and
/// `(roughness, metalness, emissive, _)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
    pub color: [f32; 4],
    pub surface: [f32; 4],
}

/// One instance per box in `scene`, capped at `max`.
///
/// Shell surfaces take their colour and finish from `materials`, so
/// descriptors that finish loading show up on the next frame.
pub fn build_instances(
    scene: &SceneGraph,
    materials: &MaterialLibrary,
    selected: Option<&ItemId>,
    max: usize,
) -> Vec<InstanceData> {
    let mut out = Vec::with_capacity(scene.len().min(max));
    for (id, node, bounds) in scene.solids() {
        if out.len() >= max {
            tracing::warn!(max, "instance budget exhausted, scene truncated");
            break;
        }
        let model = Mat4::from_translation(bounds.center()) * Mat4::from_scale(bounds.size());
        let cols = model.to_cols_array_2d();

        let (mut color, roughness, metalness) = match node.surface {
            Some(surface) => {
                let m = materials.material(surface);
                (m.base_color, m.roughness, m.metalness)
            }
            None => (node.color, 0.5, 0.1),
        };
        let emissive = match node.kind {
            NodeKind::Marker => 1.0,
            _ => 0.0,
        };
        if selected.is_some() && scene.owning_item(id) == selected && node.kind != NodeKind::Marker {
            for (c, h) in color.iter_mut().zip(HIGHLIGHT) {
                *c += (h - *c) * HIGHLIGHT_MIX;
            }
        }

        out.push(InstanceData {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color,
            surface: [roughness, metalness, emissive, 0.0],
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use showroom_assets::Surface;
    use showroom_common::Aabb;

    fn scene() -> SceneGraph {
        let mut g = SceneGraph::new();
        g.add_surface("floor", Aabb::new(Vec3::new(-1.0, -0.1, -1.0), Vec3::new(1.0, 0.0, 1.0)), Surface::Floor);
        let group = g.add_group(None, "table", Some(ItemId::new("coffee")));
        g.add_box(Some(group), "top", Aabb::from_center_size(Vec3::new(0.0, 0.4, 0.0), Vec3::new(2.0, 0.1, 1.0)), [0.0, 0.0, 0.0, 1.0]);
        g.add_marker(ItemId::new("coffee"), Aabb::from_center_size(Vec3::Y, Vec3::splat(0.16)), [1.0, 0.6, 0.0, 1.0]);
        g
    }

    #[test]
    fn one_instance_per_box() {
        let instances = build_instances(&scene(), &MaterialLibrary::builtin(), None, 100);
        assert_eq!(instances.len(), 3);
        // Model matrix scales a unit cube to the box and moves it to its centre.
        let top = &instances[1];
        assert_eq!(top.model_0[0], 2.0);
        assert_eq!(top.model_3, [0.0, 0.4, 0.0, 1.0]);
        assert_eq!(instances[2].surface[2], 1.0);
    }

    #[test]
    fn surfaces_use_library_material() {
        let instances = build_instances(&scene(), &MaterialLibrary::builtin(), None, 100);
        let floor = Surface::Floor.builtin();
        assert_eq!(instances[0].color, floor.base_color);
        assert_eq!(instances[0].surface[0], floor.roughness);
    }

    #[test]
    fn selection_tints_item_boxes_only() {
        let id = ItemId::new("coffee");
        let plain = build_instances(&scene(), &MaterialLibrary::builtin(), None, 100);
        let lit = build_instances(&scene(), &MaterialLibrary::builtin(), Some(&id), 100);
        assert_eq!(plain[0], lit[0]);
        assert_ne!(plain[1].color, lit[1].color);
        assert_eq!(plain[2], lit[2]);
    }

    #[test]
    fn budget_caps_output() {
        assert_eq!(build_instances(&scene(), &MaterialLibrary::builtin(), None, 2).len(), 2);
    }
}
