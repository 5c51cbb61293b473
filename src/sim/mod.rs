//! Force-directed layout engine.
//!
//! The engine owns its node and edge tables between construction and
//! [`Simulation::reset`] and exposes no internal clock: the host calls
//! [`Simulation::step`] on its own schedule, nominally once per frame.
//! Every step sums repulsion, edge springs, centering gravity, and overlap
//! separation per node, integrates damped velocities, and clamps positions
//! into the configured bounds. Steps consume no randomness, so identical
//! state and inputs always produce identical layouts.

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::data::GraphData;
use crate::util::stable_pair;

mod forces;

/// Axis-aligned world-space region the layout is confined to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: vec2(a.x.min(b.x), a.y.min(b.y)),
            max: vec2(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    fn inset(&self, margin: f32) -> Self {
        let center = self.center();
        let half = (((self.max - self.min) * 0.5) - vec2(margin, margin)).max(Vec2::ZERO);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    fn clamp_point(&self, point: Vec2) -> Vec2 {
        vec2(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Tunable force constants. The defaults settle a few dozen nodes into a
/// readable layout inside an 800x500 world.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    pub repulsion_strength: f32,
    pub repulsion_cutoff: f32,
    pub rest_length: f32,
    pub spring_strength: f32,
    pub center_pull: f32,
    pub velocity_damping: f32,
    /// Maps the host's 0..1 intensity onto force scale.
    pub alpha_scale: f32,
    pub collision_strength: f32,
    pub collision_padding: f32,
    /// Positions are clamped this far inside the bounds.
    pub boundary_margin: f32,
    /// Maximum distance from center for scattered starting positions.
    pub scatter_radius: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            repulsion_strength: 1000.0,
            repulsion_cutoff: 200.0,
            rest_length: 100.0,
            spring_strength: 0.1,
            center_pull: 0.001,
            velocity_damping: 0.9,
            alpha_scale: 0.1,
            collision_strength: 0.5,
            collision_padding: 5.0,
            boundary_margin: 30.0,
            scatter_radius: 50.0,
        }
    }
}

/// A simulated node. `pin` holds the authoritative position while the node
/// is being dragged; a pinned node ignores all forces but still repels and
/// attracts its neighbors.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub category: String,
    pub value: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub pin: Option<Vec2>,
}

impl Node {
    /// Collision radius; grows with the square root of the node value.
    pub fn radius(&self) -> f32 {
        self.value.max(0.0).sqrt()
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// An edge resolved to node indices, with its spring weight in (0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f32,
}

pub struct Simulation {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
    bounds: Bounds,
    config: SimConfig,
    playing: bool,
    forces: Vec<Vec2>,
}

impl Simulation {
    /// Build a simulation from a dataset. Nodes with explicit coordinates
    /// start there; the rest are scattered deterministically around the
    /// bounds center using `seed`. Edges that reference unknown ids, edges
    /// with non-positive weights, and self edges are skipped with a
    /// warning; weights above 1 are clamped.
    pub fn new(data: &GraphData, bounds: Bounds, config: SimConfig, seed: u64) -> Self {
        let center = bounds.center();
        let mut nodes = Vec::with_capacity(data.nodes.len());
        let mut index_by_id = HashMap::with_capacity(data.nodes.len());

        for spec in &data.nodes {
            if index_by_id.contains_key(&spec.id) {
                log::warn!("duplicate node id {:?} ignored", spec.id);
                continue;
            }

            let pos = match (spec.x, spec.y) {
                (Some(x), Some(y)) => vec2(x, y),
                _ => scatter_position(center, config.scatter_radius, seed, &spec.id),
            };

            index_by_id.insert(spec.id.clone(), nodes.len());
            nodes.push(Node {
                id: spec.id.clone(),
                label: spec.label.clone(),
                category: spec.category.clone(),
                value: spec.value.max(0.0),
                pos,
                vel: Vec2::ZERO,
                pin: None,
            });
        }

        let mut edges = Vec::with_capacity(data.edges.len());
        for spec in &data.edges {
            let (Some(&source), Some(&target)) =
                (index_by_id.get(&spec.source), index_by_id.get(&spec.target))
            else {
                log::warn!(
                    "edge {} -> {} references an unknown node, skipping",
                    spec.source,
                    spec.target
                );
                continue;
            };

            if source == target {
                log::warn!("self edge on {} skipped", spec.source);
                continue;
            }

            if !spec.weight.is_finite() || spec.weight <= 0.0 {
                log::warn!(
                    "edge {} -> {} has invalid weight {}, skipping",
                    spec.source,
                    spec.target,
                    spec.weight
                );
                continue;
            }

            edges.push(Edge {
                source,
                target,
                weight: spec.weight.min(1.0),
            });
        }

        Self {
            nodes,
            edges,
            index_by_id,
            bounds,
            config,
            playing: true,
            forces: Vec::new(),
        }
    }

    /// Advance the simulation by one tick and return the updated nodes.
    ///
    /// `intensity` in 0..1 scales all forces; `dt` is the elapsed frame
    /// time, normalized against 60 Hz so the layout speed is independent
    /// of the host's frame rate. Calling `step` while paused still
    /// advances; pausing only tells the host to stop calling.
    pub fn step(&mut self, dt: f32, intensity: f32) -> &[Node] {
        let node_count = self.nodes.len();
        if node_count == 0 {
            return &self.nodes;
        }

        let alpha = intensity.clamp(0.0, 1.0) * self.config.alpha_scale;
        let time_scale = (dt * 60.0).clamp(0.25, 3.0);

        self.forces.resize(node_count, Vec2::ZERO);
        self.forces.fill(Vec2::ZERO);

        forces::accumulate_pair_forces(&self.nodes, &self.config, &mut self.forces);
        forces::accumulate_springs(&self.nodes, &self.edges, &self.config, &mut self.forces);

        let center = self.bounds.center();
        for (node, force) in self.nodes.iter().zip(self.forces.iter_mut()) {
            *force += (center - node.pos) * self.config.center_pull;
        }

        let damping = self.config.velocity_damping.powf(time_scale);
        let clamp_region = self.bounds.inset(self.config.boundary_margin);
        for (node, force) in self.nodes.iter_mut().zip(self.forces.iter()) {
            if let Some(pin) = node.pin {
                node.pos = pin;
                node.vel = Vec2::ZERO;
                continue;
            }

            node.vel = (node.vel + (*force * alpha * time_scale)) * damping;
            node.pos += node.vel * time_scale;
            node.pos = clamp_region.clamp_point(node.pos);

            debug_assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
            debug_assert!(node.vel.x.is_finite() && node.vel.y.is_finite());
        }

        &self.nodes
    }

    /// Fix a node at `pos` until [`Simulation::unpin`]. The position takes
    /// effect immediately; unknown ids are ignored.
    pub fn pin(&mut self, id: &str, pos: Vec2) {
        if let Some(&index) = self.index_by_id.get(id) {
            let node = &mut self.nodes[index];
            node.pin = Some(pos);
            node.pos = pos;
            node.vel = Vec2::ZERO;
        }
    }

    pub fn unpin(&mut self, id: &str) {
        if let Some(&index) = self.index_by_id.get(id) {
            self.nodes[index].pin = None;
        }
    }

    /// Scatter every node around the bounds center, zero velocities, and
    /// clear all pins.
    pub fn reset(&mut self, seed: u64) {
        let center = self.bounds.center();
        for node in &mut self.nodes {
            node.pos = scatter_position(center, self.config.scatter_radius, seed, &node.id);
            node.vel = Vec2::ZERO;
            node.pin = None;
        }
    }

    /// Replace the confinement region, e.g. after a viewport resize.
    /// Positions are re-clamped on the next step.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Advisory flag for the host's animation driver; `step` itself does
    /// not consult it.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index(id).map(|index| &self.nodes[index])
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

fn scatter_position(center: Vec2, radius: f32, seed: u64, id: &str) -> Vec2 {
    let (a, r) = stable_pair(seed, id);
    let angle = a * std::f32::consts::PI;
    let distance = ((r * 0.5) + 0.5) * radius;
    center + vec2(angle.cos(), angle.sin()) * distance
}
