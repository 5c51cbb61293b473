use std::collections::HashSet;

use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::ViewModel;
use super::render_utils::{
    blend_color, category_color, draw_background, edge_stroke_width, node_screen_radius,
    world_to_screen,
};

const SELECTION_COLOR: Color32 = Color32::from_rgb(0xd9, 0x77, 0x06);
const MATCH_COLOR: Color32 = Color32::from_rgb(0x67, 0xc4, 0xff);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        if self.sim.is_playing() {
            self.sim.step(frame_delta_seconds, self.speed_percent / 100.0);
        }
        if self.sim.is_playing() || response.dragged() {
            ui.ctx().request_repaint();
        }

        let world_center = self.sim.bounds().center();
        let screen_positions = self
            .sim
            .nodes()
            .iter()
            .map(|node| world_to_screen(rect, self.pan, self.zoom, world_center, node.pos))
            .collect::<Vec<_>>();
        let screen_radii = self
            .sim
            .nodes()
            .iter()
            .map(|node| node_screen_radius(node.value, self.zoom))
            .collect::<Vec<_>>();

        let hovered = Self::hovered_node(ui, &screen_positions, &screen_radii);
        self.handle_node_drag(rect, &response, hovered);

        if self.dragged.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        } else if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        self.draw_world_outline(&painter, rect);

        for edge in self.sim.edges() {
            let start = screen_positions[edge.source];
            let end = screen_positions[edge.target];
            painter.line_segment(
                [start, end],
                Stroke::new(
                    edge_stroke_width(edge.weight, self.zoom),
                    Color32::from_rgba_unmultiplied(110, 110, 110, 150),
                ),
            );
        }

        let matches = self.search_matches();
        let match_filter_active = matches.as_ref().is_some_and(|found| !found.is_empty());
        let hovered_index = hovered.map(|(index, _distance)| index);

        for (index, node) in self.sim.nodes().iter().enumerate() {
            let position = screen_positions[index];
            let radius = screen_radii[index];

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered_index == Some(index);
            let is_match = matches
                .as_ref()
                .is_some_and(|found| found.contains(&index));

            let base_color = category_color(&node.category);
            let color = if is_match {
                blend_color(base_color, MATCH_COLOR, 0.55)
            } else if match_filter_active {
                blend_color(base_color, Color32::from_rgb(250, 250, 248), 0.6)
            } else {
                base_color
            };

            painter.circle_filled(position, radius, color);
            let (ring_width, ring_color) = if is_selected {
                (3.0, SELECTION_COLOR)
            } else if is_hovered {
                (2.5, Color32::from_rgb(0x71, 0x71, 0x71))
            } else {
                (2.0, Color32::from_rgb(250, 250, 248))
            };
            painter.circle_stroke(position, radius, Stroke::new(ring_width, ring_color));

            if node.is_pinned() {
                painter.circle_stroke(
                    position,
                    radius + 4.0,
                    Stroke::new(1.5, Color32::from_rgba_unmultiplied(0x2c, 0x2c, 0x2c, 160)),
                );
            }

            if is_selected || is_hovered || node.is_pinned() {
                painter.text(
                    position - vec2(0.0, radius + 6.0),
                    Align2::CENTER_BOTTOM,
                    &node.label,
                    FontId::proportional(12.0),
                    Color32::from_gray(40),
                );
            }
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            let clicked = hovered_index
                .and_then(|index| self.sim.nodes().get(index))
                .map(|node| node.id.clone());
            self.selected = clicked;
        }
    }

    fn draw_world_outline(&self, painter: &egui::Painter, rect: egui::Rect) {
        let bounds = self.sim.bounds();
        let world_center = bounds.center();
        let to_screen =
            |world| world_to_screen(rect, self.pan, self.zoom, world_center, world);

        let top_left = to_screen(bounds.min);
        let top_right = to_screen(vec2(bounds.max.x, bounds.min.y));
        let bottom_right = to_screen(bounds.max);
        let bottom_left = to_screen(vec2(bounds.min.x, bounds.max.y));

        let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 60, 60, 60));
        painter.line_segment([top_left, top_right], stroke);
        painter.line_segment([top_right, bottom_right], stroke);
        painter.line_segment([bottom_right, bottom_left], stroke);
        painter.line_segment([bottom_left, top_left], stroke);
    }

    pub(in crate::app) fn search_matches(&self) -> Option<HashSet<usize>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .sim
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.label, query)
                    .or_else(|| fuzzy_match_score(&matcher, &node.id, query))
                    .map(|_score| index)
            })
            .collect();
        Some(matches)
    }

    pub(in crate::app) fn best_search_match(&self) -> Option<String> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        self.sim
            .nodes()
            .iter()
            .filter_map(|node| {
                let score = fuzzy_match_score(&matcher, &node.label, query)
                    .or_else(|| fuzzy_match_score(&matcher, &node.id, query))?;
                Some((score, node.id.clone()))
            })
            .max_by_key(|(score, _id)| *score)
            .map(|(_score, id)| id)
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
