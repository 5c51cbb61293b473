use eframe::egui::{self, Key, RichText, Ui};

use super::ViewModel;
use super::render_utils::category_color;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Simulation Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            let play_label = if self.sim.is_playing() { "Pause" } else { "Play" };
            if ui
                .button(play_label)
                .on_hover_text("Start or stop the layout simulation.")
                .clicked()
            {
                let playing = self.sim.is_playing();
                self.sim.set_playing(!playing);
            }

            if ui
                .button("Reset")
                .on_hover_text("Scatter all nodes around the center and clear pins.")
                .clicked()
            {
                self.seed = self.seed.wrapping_add(1);
                self.sim.reset(self.seed);
                self.selected = None;
                self.dragged = None;
            }
        });

        ui.add_space(6.0);
        ui.add(
            egui::Slider::new(&mut self.speed_percent, 1.0..=100.0)
                .text("Speed %")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Scales the strength of every simulation force.");

        ui.separator();

        ui.label("Search concepts");
        let search_response = ui
            .text_edit_singleline(&mut self.search)
            .on_hover_text("Fuzzy-highlight nodes by label; press Enter to select the best match.");
        if search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
            self.selected = self.best_search_match();
        }

        ui.separator();
        self.draw_selected_details(ui);

        ui.separator();
        self.draw_category_legend(ui);

        ui.add_space(8.0);
        ui.collapsing("Help", |ui| {
            ui.label("Click a node to select it and view details.");
            ui.label("Drag a node with the left button to pin it in place.");
            ui.label("Scroll to zoom, drag with the right button to pan.");
        });
    }

    fn draw_selected_details(&mut self, ui: &mut Ui) {
        let details = self
            .selected
            .as_deref()
            .and_then(|id| self.sim.node(id))
            .map(|node| {
                (
                    node.label.clone(),
                    node.category.clone(),
                    node.value,
                    node.is_pinned(),
                )
            });

        let Some((label, category, value, pinned)) = details else {
            ui.label(RichText::new("No concept selected.").weak());
            return;
        };

        ui.heading("Selected Concept");
        egui::Grid::new("selected_details").num_columns(2).show(ui, |ui| {
            ui.label("Label");
            ui.label(label);
            ui.end_row();

            ui.label("Category");
            ui.label(category);
            ui.end_row();

            ui.label("Importance");
            ui.label(format!("{value:.0}"));
            ui.end_row();

            if pinned {
                ui.label("Pinned");
                ui.label("yes");
                ui.end_row();
            }
        });

        if ui.button("Deselect").clicked() {
            self.selected = None;
        }
    }

    fn draw_category_legend(&self, ui: &mut Ui) {
        ui.heading("Categories");
        for category in &self.categories {
            ui.horizontal(|ui| {
                ui.label(RichText::new("\u{25cf}").color(category_color(category)));
                ui.label(category);
            });
        }
    }
}
