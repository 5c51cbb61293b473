use eframe::egui::{Vec2, vec2};

use forcemap::data::{EdgeSpec, GraphData, NodeSpec};
use forcemap::sim::{Bounds, SimConfig, Simulation};

fn node_at(id: &str, value: f32, x: f32, y: f32) -> NodeSpec {
    NodeSpec {
        id: id.to_owned(),
        label: id.to_owned(),
        category: "core".to_owned(),
        value,
        x: Some(x),
        y: Some(y),
    }
}

fn edge(source: &str, target: &str, weight: f32) -> EdgeSpec {
    EdgeSpec {
        source: source.to_owned(),
        target: target.to_owned(),
        weight,
    }
}

fn world() -> Bounds {
    Bounds::new(Vec2::ZERO, vec2(800.0, 500.0))
}

fn positions(sim: &Simulation) -> Vec<Vec2> {
    sim.nodes().iter().map(|node| node.pos).collect()
}

fn node_distance(sim: &Simulation, a: &str, b: &str) -> f32 {
    let a = sim.node(a).expect("node a").pos;
    let b = sim.node(b).expect("node b").pos;
    (a - b).length()
}

#[test]
fn identical_runs_produce_identical_layouts() {
    let data = GraphData::concept_demo();
    let mut first = Simulation::new(&data, world(), SimConfig::default(), 7);
    let mut second = Simulation::new(&data, world(), SimConfig::default(), 7);

    for step in 0..300 {
        // Vary the intensity over time the way a user dragging the speed
        // slider would; both runs must still agree exactly.
        let intensity = 0.1 + ((step % 9) as f32 * 0.1);
        first.step(1.0 / 60.0, intensity);
        second.step(1.0 / 60.0, intensity);
    }

    for (a, b) in positions(&first).iter().zip(positions(&second)) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }
}

#[test]
fn every_node_stays_inside_the_bounds() {
    let bounds = world();
    let data = GraphData::concept_demo();
    let mut sim = Simulation::new(&data, bounds, SimConfig::default(), 3);

    for _ in 0..400 {
        sim.step(1.0 / 60.0, 1.0);
        for node in sim.nodes() {
            assert!(
                bounds.contains(node.pos),
                "{} escaped to {:?}",
                node.id,
                node.pos
            );
        }
    }
}

#[test]
fn pinned_node_is_authoritative_through_steps() {
    let data = GraphData::concept_demo();
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);

    let target = vec2(640.0, 120.0);
    sim.pin("ai", target);
    for _ in 0..250 {
        sim.step(1.0 / 60.0, 0.8);
        let node = sim.node("ai").expect("node exists");
        assert_eq!(node.pos, target);
        assert_eq!(node.vel, Vec2::ZERO);
    }
}

#[test]
fn dangling_edges_do_not_disturb_other_nodes() {
    let nodes = vec![
        node_at("a", 50.0, 300.0, 250.0),
        node_at("b", 50.0, 500.0, 250.0),
    ];
    let clean = GraphData {
        nodes: nodes.clone(),
        edges: vec![edge("a", "b", 0.8)],
    };
    let dirty = GraphData {
        nodes,
        edges: vec![
            edge("a", "b", 0.8),
            edge("a", "nowhere", 0.9),
            edge("nowhere", "b", 0.9),
        ],
    };

    let mut clean_sim = Simulation::new(&clean, world(), SimConfig::default(), 0);
    let mut dirty_sim = Simulation::new(&dirty, world(), SimConfig::default(), 0);

    for _ in 0..200 {
        clean_sim.step(1.0 / 60.0, 0.5);
        dirty_sim.step(1.0 / 60.0, 0.5);
    }

    assert_eq!(positions(&clean_sim), positions(&dirty_sim));
}

#[test]
fn coincident_nodes_never_go_non_finite() {
    let data = GraphData {
        nodes: vec![
            node_at("a", 80.0, 400.0, 250.0),
            node_at("b", 80.0, 400.0, 250.0),
            node_at("c", 40.0, 400.0, 250.0),
        ],
        edges: vec![edge("a", "b", 1.0)],
    };
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);

    for _ in 0..500 {
        sim.step(1.0 / 60.0, 1.0);
        for node in sim.nodes() {
            assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
            assert!(node.vel.x.is_finite() && node.vel.y.is_finite());
        }
    }

    // The overlapping pair must actually separate.
    assert!(node_distance(&sim, "a", "b") > 1.0);
}

#[test]
fn two_node_spring_settles_near_its_rest_length() {
    let data = GraphData {
        nodes: vec![
            node_at("a", 50.0, 250.0, 250.0),
            node_at("b", 50.0, 550.0, 250.0),
        ],
        edges: vec![edge("a", "b", 0.8)],
    };
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);

    for _ in 0..500 {
        sim.step(1.0 / 60.0, 0.3);
    }

    let rest_length = sim.config().rest_length;
    let distance = node_distance(&sim, "a", "b");
    let tolerance = rest_length * 0.05;
    assert!(
        (distance - rest_length).abs() <= tolerance,
        "settled at {distance}, expected within {tolerance} of {rest_length}"
    );
}

#[test]
fn connected_nodes_move_toward_each_other() {
    let data = GraphData {
        nodes: vec![
            node_at("a", 50.0, 250.0, 250.0),
            node_at("b", 50.0, 550.0, 250.0),
        ],
        edges: vec![edge("a", "b", 0.8)],
    };
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);
    assert_eq!(node_distance(&sim, "a", "b"), 300.0);

    for _ in 0..200 {
        sim.step(1.0 / 60.0, 0.3);
    }

    let distance = node_distance(&sim, "a", "b");
    assert!(distance > 0.0);
    assert!(distance < 300.0);
}

#[test]
fn reset_scatters_everything_near_the_center() {
    let config = SimConfig::default();
    let data = GraphData::concept_demo();
    let mut sim = Simulation::new(&data, world(), config, 0);

    sim.pin("bias", vec2(700.0, 400.0));
    for _ in 0..150 {
        sim.step(1.0 / 60.0, 1.0);
    }

    sim.reset(99);

    let center = world().center();
    for node in sim.nodes() {
        assert!((node.pos - center).length() <= config.scatter_radius + 0.001);
        assert_eq!(node.vel, Vec2::ZERO);
        assert!(!node.is_pinned());
    }
}

#[test]
fn reset_layouts_differ_by_seed_but_repeat_by_seed() {
    let data = GraphData::concept_demo();
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);

    sim.reset(1);
    let first = positions(&sim);
    sim.reset(2);
    let second = positions(&sim);
    sim.reset(1);
    let repeat = positions(&sim);

    assert_ne!(first, second);
    assert_eq!(first, repeat);
}

#[test]
fn demo_dataset_drives_a_full_simulation() {
    let data = GraphData::concept_demo();
    let mut sim = Simulation::new(&data, world(), SimConfig::default(), 0);
    assert_eq!(sim.nodes().len(), 10);
    assert_eq!(sim.edges().len(), 10);

    for _ in 0..300 {
        sim.step(1.0 / 60.0, 0.5);
    }

    // Connected pairs should sit well below the repulsion cutoff while
    // every pair keeps a sensible separation.
    let rationality = sim.node("rationality").expect("node").pos;
    let bayes = sim.node("bayes").expect("node").pos;
    assert!((rationality - bayes).length() < 200.0);

    for (i, a) in sim.nodes().iter().enumerate() {
        for b in sim.nodes().iter().skip(i + 1) {
            assert!((a.pos - b.pos).length() > 1.0);
        }
    }
}
