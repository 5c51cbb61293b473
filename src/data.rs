use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// A node as described by a dataset. `value` drives the rendered size and
/// the collision radius; `x`/`y` give an explicit starting position, nodes
/// without one are scattered around the layout center instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub category: String,
    pub value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
}

/// A weighted relation between two nodes, rendered as a line and acting as
/// a spring constraint. Weight is expected in (0, 1].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    pub weight: f32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphData {
    /// Read and validate a JSON dataset from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read graph dataset {}", path.display()))?;
        let data: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse graph dataset {}", path.display()))?;
        data.validate()
            .with_context(|| format!("invalid graph dataset {}", path.display()))?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            bail!("dataset contains no nodes");
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if node.id.is_empty() {
                bail!("dataset contains a node with an empty id");
            }
            if !seen.insert(node.id.as_str()) {
                bail!("duplicate node id {:?}", node.id);
            }
            if !node.value.is_finite() || node.value <= 0.0 {
                bail!("node {:?} has invalid value {}", node.id, node.value);
            }
        }

        Ok(())
    }

    /// Distinct categories in first-seen order, for the legend.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for node in &self.nodes {
            if !categories.iter().any(|existing| existing == &node.category) {
                categories.push(node.category.clone());
            }
        }
        categories
    }

    /// Built-in demo graph: a small map of rationality concepts.
    pub fn concept_demo() -> Self {
        fn node(id: &str, label: &str, category: &str, value: f32, x: f32, y: f32) -> NodeSpec {
            NodeSpec {
                id: id.to_owned(),
                label: label.to_owned(),
                category: category.to_owned(),
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

        Self {
            nodes: vec![
                node("rationality", "Rationality", "core", 100.0, 400.0, 200.0),
                node("bayes", "Bayesian Thinking", "core", 90.0, 300.0, 150.0),
                node("bias", "Cognitive Bias", "psychology", 85.0, 500.0, 150.0),
                node("ai", "Artificial Intelligence", "technology", 95.0, 350.0, 300.0),
                node("alignment", "AI Alignment", "technology", 80.0, 450.0, 350.0),
                node("epistemology", "Epistemology", "philosophy", 75.0, 250.0, 250.0),
                node("decision", "Decision Theory", "core", 70.0, 400.0, 100.0),
                node("game", "Game Theory", "mathematics", 65.0, 550.0, 250.0),
                node("prediction", "Prediction", "core", 60.0, 200.0, 200.0),
                node("evidence", "Evidence", "core", 80.0, 300.0, 300.0),
            ],
            edges: vec![
                edge("rationality", "bayes", 0.9),
                edge("rationality", "bias", 0.8),
                edge("rationality", "decision", 0.7),
                edge("bayes", "evidence", 0.8),
                edge("bayes", "prediction", 0.7),
                edge("ai", "alignment", 0.9),
                edge("ai", "rationality", 0.6),
                edge("decision", "game", 0.8),
                edge("epistemology", "evidence", 0.7),
                edge("bias", "decision", 0.5),
            ],
        }
    }
}
