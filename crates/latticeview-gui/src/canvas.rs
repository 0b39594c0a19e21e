use eframe::egui;
use latticeview_core::{LinkIndex, NodeIndex};
use latticeview_graph::color::{LINK_BASE, LINK_MARKED, NODE_STROKE, Rgb};
use latticeview_graph::{LatticeSession, PointerEvent};

const LABEL_FONT_SIZE: f32 = 14.0;
const NODE_OUTLINE_WIDTH: f32 = 1.5;

fn color32(color: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// Drawing surface of one lattice.
///
/// Translates pointer input into [`PointerEvent`]s for the session's state
/// machine, steps the simulation, and redraws links, nodes, and labels from
/// the current simulation and highlight state every frame.
#[derive(Default)]
pub struct LatticeCanvas {
    hovered: Option<NodeIndex>,
}

impl LatticeCanvas {
    pub fn show(&mut self, ui: &mut egui::Ui, session: &mut LatticeSession) {
        let desired = egui::vec2(
            session.viewport_width,
            session.lattice.viewport_height().max(100.0),
        );
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::WHITE);

        let font = egui::FontId::proportional(LABEL_FONT_SIZE);
        let label_widths = self.collision_label_widths(ui, session, &font);

        self.handle_input(ui, session, rect, &response);

        if session.tick(&label_widths) {
            ui.ctx().request_repaint();
        }

        self.draw_links(&painter, session, rect);
        self.draw_nodes(&painter, session, rect, &font);
    }

    /// Per-node width feeding the collision radius: the widest label that is
    /// both collapsed and globally visible, zero otherwise.
    fn collision_label_widths(
        &self,
        ui: &egui::Ui,
        session: &LatticeSession,
        font: &egui::FontId,
    ) -> Vec<f32> {
        let settings = &session.settings;
        if !settings.collision_detection || !settings.collapse_labels {
            return vec![0.0; session.lattice.nodes.len()];
        }

        ui.fonts_mut(|fonts| {
            session
                .lattice
                .nodes
                .iter()
                .map(|node| {
                    let mut width = 0.0f32;
                    if settings.show_top_labels {
                        let galley = fonts.layout_no_wrap(
                            node.top_label(true),
                            font.clone(),
                            egui::Color32::BLACK,
                        );
                        width = width.max(galley.size().x);
                    }
                    if settings.show_bottom_labels {
                        let galley = fonts.layout_no_wrap(
                            node.bottom_label(true),
                            font.clone(),
                            egui::Color32::BLACK,
                        );
                        width = width.max(galley.size().x);
                    }
                    width
                })
                .collect()
        })
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        session: &mut LatticeSession,
        rect: egui::Rect,
        response: &egui::Response,
    ) {
        let pointer_local = response
            .hover_pos()
            .or_else(|| response.interact_pointer_pos())
            .map(|pos| pos - rect.min.to_vec2());
        self.hovered = pointer_local.and_then(|pos| session.node_at(pos.x, pos.y));

        if response.double_clicked() {
            if let Some(node) = self.hovered {
                session.pointer_event(PointerEvent::NodeDoublePressed(node));
                return;
            }
        }

        let (pressed, moved, released) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_down() && input.pointer.delta() != egui::Vec2::ZERO,
                input.pointer.primary_released(),
            )
        });

        if pressed && response.hovered() {
            match self.hovered {
                Some(node) => session.pointer_event(PointerEvent::NodePressed(node)),
                None => session.pointer_event(PointerEvent::BackgroundPressed),
            }
        }
        if moved {
            session.pointer_event(PointerEvent::Moved);
            if session.dragging_node().is_some() {
                if let Some(pos) = pointer_local {
                    session.drag_to(pos.x, pos.y);
                }
            }
        }
        if released {
            session.pointer_event(PointerEvent::Released);
        }
    }

    fn draw_links(&self, painter: &egui::Painter, session: &LatticeSession, rect: egui::Rect) {
        let origin = rect.min.to_vec2();
        for (index, link) in session.lattice.links.iter().enumerate() {
            let link_index = LinkIndex(index);
            let source = &session.lattice.nodes[link.source];
            let target = &session.lattice.nodes[link.target];

            let color = if session.highlight.is_link_marked(link_index) {
                color32(LINK_MARKED)
            } else {
                color32(LINK_BASE)
            };
            let stroke =
                egui::Stroke::new(session.highlight.link_stroke_width(link_index), color);
            painter.line_segment(
                [
                    egui::pos2(source.x, source.initial_y) + origin,
                    egui::pos2(target.x, target.initial_y) + origin,
                ],
                stroke,
            );
        }
    }

    fn draw_nodes(
        &self,
        painter: &egui::Painter,
        session: &LatticeSession,
        rect: egui::Rect,
        font: &egui::FontId,
    ) {
        let origin = rect.min.to_vec2();
        let settings = &session.settings;
        let text_color = egui::Color32::from_gray(0x33);

        for (index, node) in session.lattice.nodes.iter().enumerate() {
            let node_index = NodeIndex(index);
            let center = egui::pos2(node.x, node.initial_y) + origin;

            painter.circle(
                center,
                session.highlight.node_radius(node_index, settings),
                color32(session.node_fill(node_index)),
                egui::Stroke::new(NODE_OUTLINE_WIDTH, color32(NODE_STROKE)),
            );

            // Hover peeks at a label only while its global toggle is off.
            let peek = self.hovered == Some(node_index);
            if settings.show_top_labels || peek {
                painter.text(
                    center + egui::vec2(0.0, settings.text_top_offset),
                    egui::Align2::CENTER_CENTER,
                    node.top_label(settings.collapse_labels),
                    font.clone(),
                    text_color,
                );
            }
            if settings.show_bottom_labels || peek {
                painter.text(
                    center + egui::vec2(0.0, settings.text_bottom_offset),
                    egui::Align2::CENTER_CENTER,
                    node.bottom_label(settings.collapse_labels),
                    font.clone(),
                    text_color,
                );
            }
        }
    }
}
