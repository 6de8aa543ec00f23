//! Procedural set dressing: turns the catalog into box furniture inside a
//! furnished room shell.
//!
//! Only furniture groups and their hotspot markers are registered as
//! pickable. The shell, plants, platforms, rugs and lights are decoration.

use crate::scene::SceneGraph;
use glam::Vec3;
use showroom_assets::Surface;
use showroom_common::{Aabb, NodeId, hex_to_rgba};
use showroom_picking::{Catalog, CatalogEntry, FurnitureKind};

pub const ROOM_WIDTH: f32 = 28.0;
pub const ROOM_DEPTH: f32 = 20.0;
pub const WALL_HEIGHT: f32 = 7.5;

const MARKER_SIZE: f32 = 0.16;
const MARKER_LIFT: f32 = 0.6;
const MARKER_COLOR: u32 = 0xf59e0b;

const FRAME_BLACK: u32 = 0x1f2023;
const LIGHT_OAK: u32 = 0xe2d4c0;
const DEFAULT_LOUNGE: u32 = 0xcfc9c1;
const DEFAULT_PIECE: u32 = 0xbba78c;
const DEFAULT_PIECE_SIZE: [f32; 2] = [0.25, 0.4];

/// Build the full showroom for `catalog`.
pub fn build_showroom(catalog: &Catalog) -> SceneGraph {
    let mut scene = SceneGraph::new();
    add_architecture(&mut scene);
    for x in [-7.0, 0.0, 7.0] {
        add_plant(&mut scene, x, -7.0, 1.0);
    }
    for x in [-10.0, 10.0] {
        add_plant(&mut scene, x, 7.0, 1.2);
    }
    add_platform(&mut scene, -6.0, -2.5, 5.0, 2.5, 0.25);
    add_platform(&mut scene, 6.0, 0.0, 5.0, 2.5, 0.25);
    add_platform(&mut scene, 0.0, 4.0, 6.5, 2.2, 0.32);
    add_rug(&mut scene, -6.0, -2.5, 5.0, 3.0);
    add_rug(&mut scene, 6.0, 0.0, 5.0, 3.0);
    for z in [-4.0, 0.0, 4.0] {
        add_pendant(&mut scene, -2.0, 5.2, z);
        add_pendant(&mut scene, 2.5, 5.2, z);
    }
    add_track(&mut scene, 0.0, -1.0, 10.0);
    add_track(&mut scene, 0.0, 2.5, 10.0);

    for entry in catalog.iter() {
        add_item(&mut scene, entry);
    }
    tracing::debug!(
        nodes = scene.len(),
        pickable = scene.pickable().len(),
        "showroom dressed"
    );
    scene
}

/// Build one catalog entry, register it as pickable and give it a marker.
pub fn add_item(scene: &mut SceneGraph, entry: &CatalogEntry) -> NodeId {
    let group = scene.add_group(None, &entry.name, Some(entry.id.clone()));
    let mut part = Parts {
        scene: &mut *scene,
        group,
        origin: entry.position,
    };
    match entry.kind {
        FurnitureKind::Lounge => lounge(&mut part, entry.color.unwrap_or(DEFAULT_LOUNGE)),
        FurnitureKind::CoffeeTable => coffee_table(&mut part),
        FurnitureKind::Dining => dining_set(&mut part),
        FurnitureKind::Bar => bar_counter(&mut part),
        FurnitureKind::DisplayPiece => display_piece(
            &mut part,
            entry.color.unwrap_or(DEFAULT_PIECE),
            entry.size.unwrap_or(DEFAULT_PIECE_SIZE),
        ),
    }
    scene.register_pickable(group);

    if let Some(bounds) = scene.subtree_bounds(group) {
        let size = bounds.size();
        let center = bounds.center() + Vec3::Y * size.y * MARKER_LIFT;
        scene.add_marker(
            entry.id.clone(),
            Aabb::from_center_size(center, Vec3::splat(MARKER_SIZE)),
            hex_to_rgba(MARKER_COLOR),
        );
    }
    group
}

/// Boxes placed relative to a furniture group's origin.
struct Parts<'a> {
    scene: &'a mut SceneGraph,
    group: NodeId,
    origin: Vec3,
}

impl Parts<'_> {
    fn add(&mut self, label: &str, center: [f32; 3], size: [f32; 3], color: u32) {
        let bounds = Aabb::from_center_size(self.origin + Vec3::from(center), Vec3::from(size));
        self.scene
            .add_box(Some(self.group), label, bounds, hex_to_rgba(color));
    }
}

fn lounge(p: &mut Parts, color: u32) {
    p.add("seat", [0.0, 0.35, 0.0], [1.2, 0.7, 0.9], color);
    p.add("seat", [1.2, 0.35, 0.0], [1.2, 0.7, 0.9], color);
    p.add("chaise", [0.6, 0.35, -0.9], [2.4, 0.7, 0.9], color);
    p.add("back", [0.6, 0.8, -0.9], [2.4, 0.6, 0.18], color);
}

fn coffee_table(p: &mut Parts) {
    p.add("top", [0.0, 0.4, 0.0], [1.4, 0.08, 0.8], LIGHT_OAK);
    for (x, z) in [(-0.6, -0.3), (0.6, -0.3), (-0.6, 0.3), (0.6, 0.3)] {
        p.add("leg", [x, 0.2, z], [0.12, 0.4, 0.12], FRAME_BLACK);
    }
}

fn dining_set(p: &mut Parts) {
    p.add("top", [0.0, 0.78, 0.0], [2.2, 0.08, 1.0], LIGHT_OAK);
    for (x, z) in [(-1.0, -0.4), (1.0, -0.4), (-1.0, 0.4), (1.0, 0.4)] {
        p.add("leg", [x, 0.4, z], [0.12, 0.8, 0.12], FRAME_BLACK);
    }
    for i in 0..4 {
        let cx = if i < 2 { -0.9 } else { 0.9 };
        // Even chairs face the table from the far side, so their backs flip.
        let (cz, back_z) = if i % 2 == 0 { (-0.7, 0.2) } else { (0.7, -0.2) };
        p.add("chair seat", [cx, 0.35, cz], [0.45, 0.06, 0.45], 0xf4eee5);
        p.add("chair back", [cx, 0.55, cz + back_z], [0.45, 0.4, 0.05], 0xf4eee5);
        for (lx, lz) in [(-0.18, -0.18), (0.18, -0.18), (-0.18, 0.18), (0.18, 0.18)] {
            p.add("chair leg", [cx + lx, 0.175, cz + lz], [0.04, 0.35, 0.04], FRAME_BLACK);
        }
    }
}

fn bar_counter(p: &mut Parts) {
    p.add("counter", [0.0, 0.5, 0.0], [3.8, 1.0, 0.8], 0xf1e6d8);
    p.add("plinth", [0.0, 0.06, 0.0], [3.9, 0.12, 0.82], FRAME_BLACK);
    for i in [-1.0, 0.0, 1.0] {
        let x = i * 1.2;
        p.add("stool seat", [x, 0.7, 0.9], [0.44, 0.08, 0.44], 0xd3cbc1);
        p.add("stool leg", [x, 0.35, 0.9], [0.16, 0.7, 0.16], FRAME_BLACK);
        p.add("stool base", [x, 0.025, 0.9], [0.48, 0.05, 0.48], FRAME_BLACK);
    }
}

/// Capsule of `radius` and straight `length`, approximated by its bounds
/// centred on the entry position.
fn display_piece(p: &mut Parts, color: u32, [radius, length]: [f32; 2]) {
    let d = radius * 2.0;
    p.add("piece", [0.0, 0.0, 0.0], [d, length + d, d], color);
}

fn add_architecture(scene: &mut SceneGraph) {
    let half_w = ROOM_WIDTH / 2.0;
    let half_d = ROOM_DEPTH / 2.0;
    let wall_y = WALL_HEIGHT / 2.0;
    let t = 0.1;

    scene.add_surface(
        "floor",
        Aabb::from_center_size(Vec3::new(0.0, -0.01, 0.0), Vec3::new(ROOM_WIDTH, 0.02, ROOM_DEPTH)),
        Surface::Floor,
    );
    for (label, z) in [("back wall", -half_d - t / 2.0), ("front wall", half_d + t / 2.0)] {
        scene.add_surface(
            label,
            Aabb::from_center_size(Vec3::new(0.0, wall_y, z), Vec3::new(ROOM_WIDTH, WALL_HEIGHT, t)),
            Surface::Wall,
        );
    }
    for (label, x) in [("left wall", -half_w - t / 2.0), ("right wall", half_w + t / 2.0)] {
        scene.add_surface(
            label,
            Aabb::from_center_size(Vec3::new(x, wall_y, 0.0), Vec3::new(t, WALL_HEIGHT, ROOM_DEPTH)),
            Surface::Wall,
        );
    }
    scene.add_surface(
        "brick wall",
        Aabb::from_center_size(Vec3::new(0.0, 2.5, -half_d + 0.02), Vec3::new(10.0, 5.0, 0.04)),
        Surface::Brick,
    );
    for z in [-2.0, 2.0] {
        scene.add_box(
            None,
            "beam",
            Aabb::from_center_size(Vec3::new(0.0, 6.0, z), Vec3::new(ROOM_WIDTH, 0.18, 0.6)),
            hex_to_rgba(0x4f545c),
        );
    }
    let mut x = -13.0;
    while x <= 13.0 {
        scene.add_surface(
            "slat",
            Aabb::from_center_size(Vec3::new(x, 1.2, -9.8), Vec3::new(0.12, 2.4, 0.22)),
            Surface::Wood,
        );
        x += 1.5;
    }
    let glass = [0.85, 0.92, 1.0, 1.0];
    for i in -1..=1 {
        let z = i as f32 * 4.0;
        for wx in [-13.0, 13.0] {
            scene.add_box(
                None,
                "window",
                Aabb::from_center_size(Vec3::new(wx, 3.3, z), Vec3::new(0.02, 4.8, 6.0)),
                glass,
            );
        }
    }
}

fn add_plant(scene: &mut SceneGraph, x: f32, z: f32, scale: f32) {
    let group = scene.add_group(None, "plant", None);
    scene.add_box(
        Some(group),
        "pot",
        Aabb::from_center_size(Vec3::new(x, 0.25 * scale, z), Vec3::new(0.9, 0.5, 0.9) * scale),
        hex_to_rgba(0x3a3c42),
    );
    scene.add_box(
        Some(group),
        "leaves",
        Aabb::from_center_size(Vec3::new(x, 1.3 * scale, z), Vec3::new(1.2, 1.6, 1.2) * scale),
        hex_to_rgba(0x3f7d4e),
    );
}

fn add_platform(scene: &mut SceneGraph, x: f32, z: f32, w: f32, d: f32, h: f32) {
    scene.add_box(
        None,
        "platform",
        Aabb::from_center_size(Vec3::new(x, h / 2.0, z), Vec3::new(w, h, d)),
        hex_to_rgba(0xd7c3a0),
    );
}

fn add_rug(scene: &mut SceneGraph, x: f32, z: f32, w: f32, d: f32) {
    scene.add_surface(
        "rug",
        Aabb::from_center_size(Vec3::new(x, 0.015, z), Vec3::new(w, 0.01, d)),
        Surface::Rug,
    );
}

fn add_pendant(scene: &mut SceneGraph, x: f32, y: f32, z: f32) {
    let group = scene.add_group(None, "pendant", None);
    scene.add_box(
        Some(group),
        "cord",
        Aabb::from_center_size(Vec3::new(x, y - 0.2, z), Vec3::new(0.1, 0.4, 0.1)),
        hex_to_rgba(0x1c1d20),
    );
    scene.add_box(
        Some(group),
        "shade",
        Aabb::from_center_size(Vec3::new(x, y - 0.3, z), Vec3::new(0.7, 0.3, 0.7)),
        hex_to_rgba(0x2a2b2f),
    );
}

fn add_track(scene: &mut SceneGraph, x: f32, z: f32, len: f32) {
    scene.add_box(
        None,
        "track",
        Aabb::from_center_size(Vec3::new(x, 5.4, z), Vec3::new(len, 0.05, 0.05)),
        hex_to_rgba(0x1c1d20),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;
    use showroom_common::{CameraPose, ItemId, Ray};
    use showroom_picking::{HotspotPicker, SpatialQuery};

    #[test]
    fn every_entry_gets_a_pickable_group_and_marker() {
        let catalog = Catalog::showroom();
        let scene = build_showroom(&catalog);
        assert_eq!(scene.pickable().len(), catalog.len() * 2);
        for entry in catalog.iter() {
            let markers = scene
                .nodes()
                .filter(|(_, n)| n.kind == NodeKind::Marker && n.item.as_ref() == Some(&entry.id))
                .count();
            assert_eq!(markers, 1, "{}", entry.id);
        }
    }

    #[test]
    fn marker_floats_above_the_group() {
        let mut scene = SceneGraph::new();
        let catalog = Catalog::showroom();
        let bar = catalog.get(&ItemId::new("bar")).unwrap();
        let group = add_item(&mut scene, bar);
        let bounds = scene.subtree_bounds(group).unwrap();
        let (_, marker) = scene
            .nodes()
            .find(|(_, n)| n.kind == NodeKind::Marker)
            .unwrap();
        let expected = bounds.center().y + bounds.size().y * MARKER_LIFT;
        let center = marker.bounds.unwrap().center();
        assert!((center.y - expected).abs() < 1e-5);
        assert!((center.x - bounds.center().x).abs() < 1e-5);
    }

    #[test]
    fn decoration_is_not_pickable() {
        let scene = build_showroom(&Catalog::empty());
        assert!(scene.pickable().is_empty());
        assert!(scene.solids().count() > 20);
        let ray = Ray::new(Vec3::new(0.0, 1.7, 9.0), Vec3::NEG_Z);
        assert!(scene.nearest_pickable(&ray).is_none());
    }

    #[test]
    fn looking_at_the_bar_from_the_start_selects_it() {
        let catalog = Catalog::showroom();
        let scene = build_showroom(&catalog);
        // From the default pose, tilt down toward the counter at z = 4.
        let pose = CameraPose::new(Vec3::new(0.0, 1.7, 9.0), 0.0, -0.2);
        let selection = HotspotPicker::default()
            .pick(&pose, &scene, &catalog)
            .unwrap();
        assert_eq!(selection.entry.id.as_str(), "bar");
    }

    #[test]
    fn shell_surfaces_are_tagged() {
        let scene = build_showroom(&Catalog::empty());
        let tagged = |s: Surface| scene.nodes().filter(|(_, n)| n.surface == Some(s)).count();
        assert_eq!(tagged(Surface::Floor), 1);
        assert_eq!(tagged(Surface::Wall), 4);
        assert_eq!(tagged(Surface::Brick), 1);
        assert_eq!(tagged(Surface::Rug), 2);
        assert_eq!(tagged(Surface::Wood), 18);
    }
}
