use egui::{Align2, Color32, Context, Pos2, Stroke, Vec2};
use showroom_kernel::Session;
use showroom_render::{MinimapLayout, minimap};

const MAP_SIZE: Vec2 = Vec2::new(196.0, 140.0);
const MAP_BG: Color32 = Color32::from_rgb(0x0b, 0x12, 0x20);
const MAP_BORDER: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
const ITEM_DOT: Color32 = Color32::from_rgb(0xf5, 0x9e, 0x0b);
const PLAYER_DOT: Color32 = Color32::from_rgb(0x38, 0xbd, 0xf8);

/// Buttons pressed this frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct UiActions {
    pub enter: bool,
    pub close_panel: bool,
}

/// Draw the HUD for one frame.
pub fn draw(ctx: &Context, session: &Session) -> UiActions {
    let mut actions = UiActions::default();

    if session.show_enter_affordance() {
        egui::Area::new(egui::Id::new("enter"))
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Showroom");
                        if ui.button("Enter").clicked() {
                            actions.enter = true;
                        }
                    });
                });
            });
    } else {
        let center = ctx.screen_rect().center();
        ctx.layer_painter(egui::LayerId::background())
            .circle_filled(center, 2.5, Color32::from_white_alpha(200));
    }

    egui::Area::new(egui::Id::new("hint"))
        .anchor(Align2::CENTER_BOTTOM, [0.0, -16.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(session.hint().text());
            });
        });

    if let Some(panel) = session.panel() {
        egui::Window::new(panel.title.as_str())
            .id(egui::Id::new("info_panel"))
            .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.set_max_width(280.0);
                ui.label(panel.body.as_str());
                ui.separator();
                if ui.button("Close (Q)").clicked() {
                    actions.close_panel = true;
                }
            });
    }

    egui::Area::new(egui::Id::new("minimap"))
        .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| draw_minimap(ui, session));

    actions
}

fn draw_minimap(ui: &mut egui::Ui, session: &Session) {
    let (response, painter) = ui.allocate_painter(MAP_SIZE, egui::Sense::hover());
    let rect = response.rect;
    let layout = MinimapLayout::new(rect.width(), rect.height());
    let frame = layout.frame(session.catalog(), session.pose());
    let at = |p: glam::Vec2| Pos2::new(rect.left() + p.x, rect.top() + p.y);

    painter.rect_filled(rect, 4.0, MAP_BG);
    painter.add(egui::Shape::closed_line(
        vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
        Stroke::new(1.0, MAP_BORDER),
    ));
    for item in &frame.items {
        painter.circle_filled(at(*item), minimap::ITEM_RADIUS, ITEM_DOT);
    }
    let player = at(frame.player);
    painter.circle_filled(player, minimap::PLAYER_RADIUS, PLAYER_DOT);
    painter.line_segment(
        [player, at(frame.heading_end)],
        Stroke::new(2.0, PLAYER_DOT),
    );
}
