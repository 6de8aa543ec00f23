use crate::scene::{NodeKind, SceneGraph};
use showroom_common::{CameraPose, ItemId};
use std::fmt::Write;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView {
    pub pose: CameraPose,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Item whose boxes are drawn highlighted.
    pub selected: Option<ItemId>,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            pose: CameraPose::default(),
            fov_degrees: 70.0,
            selected: None,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and a view and produces output. It never
/// mutates the scene; scene truth belongs to the dressing step.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> Self::Output;
}

/// Text dump of the scene, for the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list decoration, not just catalog items.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneGraph, view: &RenderView) -> String {
        let mut out = String::new();
        let p = view.pose.position;
        let f = view.pose.forward();
        let _ = writeln!(out, "=== Showroom ({} nodes, {} pickable) ===", scene.len(), scene.pickable().len());
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) fwd=({:.2}, {:.2}, {:.2}) fov={:.0}",
            p.x, p.y, p.z, f.x, f.y, f.z, view.fov_degrees
        );
        for (id, node) in scene.nodes() {
            let item = scene.owning_item(id);
            if item.is_none() && !self.verbose {
                continue;
            }
            let tag = match node.kind {
                NodeKind::Group => "group",
                NodeKind::Solid => "box",
                NodeKind::Marker => "marker",
            };
            let mark = if item.is_some() && item == view.selected.as_ref() { '*' } else { ' ' };
            let _ = write!(out, "{mark} [{:>3}] {tag:<6} {}", id.0, node.label);
            if let Some(b) = node.bounds {
                let c = b.center();
                let _ = write!(out, " at ({:.2}, {:.2}, {:.2})", c.x, c.y, c.z);
            }
            if let Some(item) = item {
                let _ = write!(out, " -> {item}");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dressing::build_showroom;
    use showroom_picking::Catalog;

    #[test]
    fn empty_scene() {
        let out = DebugTextRenderer::new().render(&SceneGraph::new(), &RenderView::default());
        assert!(out.contains("0 nodes"));
        assert!(out.contains("pos=(0.00, 1.70, 9.00)"));
    }

    #[test]
    fn lists_items_and_marks_selection() {
        let scene = build_showroom(&Catalog::showroom());
        let view = RenderView {
            selected: Some(ItemId::new("bar")),
            ..RenderView::default()
        };
        let out = DebugTextRenderer::new().render(&scene, &view);
        assert!(out.contains("-> lounge2"));
        assert!(out.lines().any(|l| l.starts_with('*') && l.ends_with("-> bar")));
        assert!(!out.contains("window"));
        assert!(out.lines().all(|l| !l.starts_with('*') || l.ends_with("-> bar")));
    }

    #[test]
    fn verbose_includes_decoration() {
        let scene = build_showroom(&Catalog::empty());
        let out = DebugTextRenderer { verbose: true }.render(&scene, &RenderView::default());
        assert!(out.contains("window"));
    }
}
