use eframe::egui::{self, Align, Context, Layout, Vec2, vec2};

use crate::data::GraphData;
use crate::sim::{Bounds, SimConfig, Simulation};

mod controls;
mod interaction;
mod render_utils;
mod view;

// World region the layout lives in; the view pans and zooms over it.
const WORLD_SIZE: Vec2 = vec2(800.0, 500.0);

pub struct ForceMapApp {
    model: ViewModel,
}

struct ViewModel {
    sim: Simulation,
    seed: u64,
    speed_percent: f32,
    search: String,
    selected: Option<String>,
    dragged: Option<String>,
    pan: Vec2,
    zoom: f32,
    categories: Vec<String>,
}

impl ForceMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data: GraphData, seed: u64) -> Self {
        Self {
            model: ViewModel::new(data, seed),
        }
    }
}

impl eframe::App for ForceMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}

impl ViewModel {
    fn new(data: GraphData, seed: u64) -> Self {
        let bounds = Bounds::new(Vec2::ZERO, WORLD_SIZE);
        let categories = data.categories();

        Self {
            sim: Simulation::new(&data, bounds, SimConfig::default(), seed),
            seed,
            speed_percent: 30.0,
            search: String::new(),
            selected: None,
            dragged: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            categories,
        }
    }

    fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("forcemap");
                    ui.separator();
                    ui.label(format!("nodes: {}", self.sim.nodes().len()));
                    ui.label(format!("edges: {}", self.sim.edges().len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(if self.sim.is_playing() {
                            "playing"
                        } else {
                            "paused"
                        });
                    });
                });
            });

        egui::SidePanel::right("controls")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }
}
