use eframe::egui::{self, Pos2, Rect, Ui};

use super::ViewModel;
use super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_center = self.sim.bounds().center();
        let world_before = screen_to_world(rect, self.pan, self.zoom, world_center, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 6.0);
        self.pan = pointer - rect.center() - ((world_before - world_center) * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    pub(in crate::app) fn hovered_node(
        ui: &Ui,
        screen_positions: &[Pos2],
        screen_radii: &[f32],
    ) -> Option<(usize, f32)> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        screen_positions
            .iter()
            .enumerate()
            .filter_map(|(index, position)| {
                let distance = position.distance(pointer);
                // minimum grab radius in screen pixels
                if distance <= screen_radii[index].max(6.0) {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Primary-drag pins the grabbed node to the pointer; releasing hands
    /// it back to the simulation.
    pub(in crate::app) fn handle_node_drag(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<(usize, f32)>,
    ) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some((index, _distance)) = hovered
            && let Some(node) = self.sim.nodes().get(index)
        {
            self.dragged = Some(node.id.clone());
        }

        let Some(dragged_id) = self.dragged.clone() else {
            return;
        };

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let world_center = self.sim.bounds().center();
            let world = screen_to_world(rect, self.pan, self.zoom, world_center, pointer);
            self.sim.pin(&dragged_id, world);
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.sim.unpin(&dragged_id);
            self.dragged = None;
        }
    }
}
