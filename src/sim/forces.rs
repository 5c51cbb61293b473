use eframe::egui::{Vec2, vec2};

use super::{Edge, Node, SimConfig};

// Distances below this are treated as coincident; force magnitudes are
// evaluated no closer than this to keep every division finite.
const MIN_DISTANCE: f32 = 1.0;

// Deterministic fallback direction for a coincident pair.
fn pair_direction(i: usize, j: usize) -> Vec2 {
    let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

/// Pairwise repulsion and overlap separation, accumulated in one pass.
///
/// Repulsion falls off as `strength / d^2` and is cut off beyond
/// `repulsion_cutoff`. Overlap separation kicks in when two nodes are
/// closer than the sum of their collision radii plus padding; it is a
/// linear push strong enough to keep large nodes from covering small ones.
pub(super) fn accumulate_pair_forces(nodes: &[Node], config: &SimConfig, forces: &mut [Vec2]) {
    let cutoff_sq = config.repulsion_cutoff * config.repulsion_cutoff;

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let delta = nodes[i].pos - nodes[j].pos;
            let distance_sq = delta.length_sq();
            let min_distance =
                nodes[i].radius() + nodes[j].radius() + (config.collision_padding * 2.0);

            if distance_sq >= cutoff_sq && distance_sq >= min_distance * min_distance {
                continue;
            }

            let distance = distance_sq.sqrt();
            let direction = if distance > MIN_DISTANCE {
                delta / distance
            } else {
                pair_direction(i, j)
            };

            if distance_sq < cutoff_sq {
                let repulsion =
                    config.repulsion_strength / distance_sq.max(MIN_DISTANCE * MIN_DISTANCE);
                forces[i] += direction * repulsion;
                forces[j] -= direction * repulsion;
            }

            if distance < min_distance && config.collision_strength > 0.0 {
                let overlap_push = (min_distance - distance) * config.collision_strength;
                forces[i] += direction * overlap_push;
                forces[j] -= direction * overlap_push;
            }
        }
    }
}

/// Spring force along each edge toward its rest length, scaled by the edge
/// weight. Coincident endpoints contribute nothing this step.
pub(super) fn accumulate_springs(
    nodes: &[Node],
    edges: &[Edge],
    config: &SimConfig,
    forces: &mut [Vec2],
) {
    for edge in edges {
        if edge.source >= nodes.len() || edge.target >= nodes.len() {
            continue;
        }

        let delta = nodes[edge.target].pos - nodes[edge.source].pos;
        let distance = delta.length();
        if distance <= f32::EPSILON {
            continue;
        }

        let direction = delta / distance;
        let stretch = (distance - config.rest_length) * config.spring_strength * edge.weight;

        forces[edge.source] += direction * stretch;
        forces[edge.target] -= direction * stretch;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Vec2, vec2};

    use super::super::{Edge, Node, SimConfig};
    use super::{accumulate_pair_forces, accumulate_springs};

    fn node(id: &str, value: f32, pos: Vec2) -> Node {
        Node {
            id: id.to_owned(),
            label: id.to_owned(),
            category: "core".to_owned(),
            value,
            pos,
            vel: Vec2::ZERO,
            pin: None,
        }
    }

    #[test]
    fn repulsion_is_symmetric_and_pushes_apart() {
        let nodes = [
            node("a", 50.0, vec2(0.0, 0.0)),
            node("b", 50.0, vec2(100.0, 0.0)),
        ];
        let mut forces = vec![Vec2::ZERO; 2];
        accumulate_pair_forces(&nodes, &SimConfig::default(), &mut forces);

        assert!(forces[0].x < 0.0);
        assert!(forces[1].x > 0.0);
        assert_eq!(forces[0], -forces[1]);
    }

    #[test]
    fn repulsion_stops_at_the_cutoff() {
        let config = SimConfig::default();
        let nodes = [
            node("a", 4.0, vec2(0.0, 0.0)),
            node("b", 4.0, vec2(config.repulsion_cutoff + 1.0, 0.0)),
        ];
        let mut forces = vec![Vec2::ZERO; 2];
        accumulate_pair_forces(&nodes, &config, &mut forces);

        assert_eq!(forces[0], Vec2::ZERO);
        assert_eq!(forces[1], Vec2::ZERO);
    }

    #[test]
    fn coincident_nodes_get_a_finite_push() {
        let nodes = [
            node("a", 50.0, vec2(120.0, 80.0)),
            node("b", 50.0, vec2(120.0, 80.0)),
        ];
        let mut forces = vec![Vec2::ZERO; 2];
        accumulate_pair_forces(&nodes, &SimConfig::default(), &mut forces);

        for force in &forces {
            assert!(force.x.is_finite() && force.y.is_finite());
        }
        assert!(forces[0].length() > 0.0);
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let config = SimConfig::default();
        let nodes = [
            node("a", 50.0, vec2(0.0, 0.0)),
            node("b", 50.0, vec2(config.rest_length * 3.0, 0.0)),
        ];
        let edges = [Edge {
            source: 0,
            target: 1,
            weight: 1.0,
        }];
        let mut forces = vec![Vec2::ZERO; 2];
        accumulate_springs(&nodes, &edges, &config, &mut forces);

        assert!(forces[0].x > 0.0);
        assert!(forces[1].x < 0.0);
    }

    #[test]
    fn compressed_spring_pushes_endpoints_apart() {
        let config = SimConfig::default();
        let nodes = [
            node("a", 50.0, vec2(0.0, 0.0)),
            node("b", 50.0, vec2(config.rest_length * 0.25, 0.0)),
        ];
        let edges = [Edge {
            source: 0,
            target: 1,
            weight: 0.5,
        }];
        let mut forces = vec![Vec2::ZERO; 2];
        accumulate_springs(&nodes, &edges, &config, &mut forces);

        assert!(forces[0].x < 0.0);
        assert!(forces[1].x > 0.0);
    }

    #[test]
    fn out_of_range_edge_indices_are_ignored() {
        let nodes = [node("a", 50.0, vec2(0.0, 0.0))];
        let edges = [Edge {
            source: 0,
            target: 9,
            weight: 1.0,
        }];
        let mut forces = vec![Vec2::ZERO; 1];
        accumulate_springs(&nodes, &edges, &SimConfig::default(), &mut forces);

        assert_eq!(forces[0], Vec2::ZERO);
    }
}
