//! Pipeline resolver - validates step dependencies and lays steps out by depth
//!
//! Steps are grouped into levels: a step with no valid dependencies sits at
//! level 0, every other step one level past its deepest dependency. Invalid
//! references (self, dangling) and cycle back-edges never abort resolution;
//! they are dropped and reported as [`Diagnostic`]s.

use super::workflow::Step;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use thiserror::Error;

/// Spacing of the generated layout, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between two consecutive levels
    pub horizontal_spacing: f64,
    /// Distance between two steps of the same level
    pub vertical_spacing: f64,
    /// Vertical centre line of every level
    pub baseline: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 350.0,
            vertical_spacing: 150.0,
            baseline: 200.0,
        }
    }
}

/// Non-fatal problem found while resolving a step list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("step '{step}' depends on itself")]
    SelfReference { step: String },

    #[error("dependency '{dependency}' not found (referenced by '{step}')")]
    DanglingReference { step: String, dependency: String },

    #[error("cycle detected involving '{step}'")]
    Cycle { step: String },

    #[error("duplicate step name '{step}'")]
    DuplicateName { step: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A positioned step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub name: String,
    pub level: usize,
    pub index_in_level: usize,
    pub position: Position,
}

/// A valid `dependency -> dependent` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Resolved pipeline: nodes ordered by level, then by step-list order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PipelineLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineLayout {
    /// True when the workflow has no steps configured
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get node by step name (first match)
    pub fn node(&self, name: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn level_of(&self, name: &str) -> Option<usize> {
        self.node(name).map(|n| n.level)
    }

    /// Nodes grouped per level; index `i` holds level `i`
    pub fn levels(&self) -> Vec<Vec<&LayoutNode>> {
        let depth = self.nodes.iter().map(|n| n.level + 1).max().unwrap_or(0);
        let mut levels: Vec<Vec<&LayoutNode>> = vec![Vec::new(); depth];
        for node in &self.nodes {
            levels[node.level].push(node);
        }
        levels
    }

    /// Step names ordered by level, then by position within the level.
    /// For an acyclic graph every dependency precedes its dependents.
    pub fn execution_order(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Incoming valid dependencies of a step
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.target == name)
            .map(|e| e.source.as_str())
            .collect()
    }
}

/// Resolve a step list into a leveled, positioned layout
pub fn resolve(steps: &[Step], config: &LayoutConfig) -> PipelineLayout {
    if steps.is_empty() {
        return PipelineLayout::default();
    }

    let mut resolver = Resolver::new(steps);
    let levels: Vec<usize> = (0..steps.len()).map(|idx| resolver.level(idx)).collect();

    let nodes = place_nodes(steps, &levels, config);
    let edges = resolver.edges();

    PipelineLayout {
        nodes,
        edges,
        diagnostics: resolver.diagnostics,
    }
}

/// Arena of steps indexed by position, with a global level memo
struct Resolver<'a> {
    steps: &'a [Step],
    valid_deps: Vec<Vec<usize>>,
    levels: Vec<Option<usize>>,
    on_stack: Vec<bool>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    fn new(steps: &'a [Step]) -> Self {
        let mut resolver = Self {
            steps,
            valid_deps: Vec::with_capacity(steps.len()),
            levels: vec![None; steps.len()],
            on_stack: vec![false; steps.len()],
            diagnostics: Vec::new(),
        };

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(steps.len());
        for (idx, step) in steps.iter().enumerate() {
            if index.contains_key(step.name.as_str()) {
                resolver.report(Diagnostic::DuplicateName {
                    step: step.name.clone(),
                });
            } else {
                index.insert(step.name.as_str(), idx);
            }
        }

        for step in steps {
            let mut valid: Vec<usize> = Vec::with_capacity(step.depends.len());
            for dep in &step.depends {
                if *dep == step.name {
                    resolver.report(Diagnostic::SelfReference {
                        step: step.name.clone(),
                    });
                    continue;
                }
                match index.get(dep.as_str()) {
                    Some(&dep_idx) => {
                        if !valid.contains(&dep_idx) {
                            valid.push(dep_idx);
                        }
                    }
                    None => resolver.report(Diagnostic::DanglingReference {
                        step: step.name.clone(),
                        dependency: dep.clone(),
                    }),
                }
            }
            resolver.valid_deps.push(valid);
        }

        resolver
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Depth-first over an explicit work stack. A dependency already on the
    /// stack is a cycle back-edge and contributes no level.
    fn level(&mut self, root: usize) -> usize {
        if let Some(level) = self.levels[root] {
            return level;
        }

        let mut stack = vec![Frame::new(root)];
        self.on_stack[root] = true;
        let mut level = 0;

        while let Some(frame) = stack.last_mut() {
            let idx = frame.idx;
            if let Some(&dep) = self.valid_deps[idx].get(frame.cursor) {
                frame.cursor += 1;
                if let Some(dep_level) = self.levels[dep] {
                    frame.absorb(dep_level);
                } else if self.on_stack[dep] {
                    self.report(Diagnostic::Cycle {
                        step: self.steps[dep].name.clone(),
                    });
                } else {
                    self.on_stack[dep] = true;
                    stack.push(Frame::new(dep));
                }
                continue;
            }

            level = frame.deepest.map_or(0, |d| d + 1);
            self.on_stack[idx] = false;
            self.levels[idx] = Some(level);
            stack.pop();
            if let Some(parent) = stack.last_mut() {
                parent.absorb(level);
            }
        }

        level
    }

    fn edges(&self) -> Vec<LayoutEdge> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut edges = Vec::new();

        for (idx, step) in self.steps.iter().enumerate() {
            for &dep_idx in &self.valid_deps[idx] {
                let source = self.steps[dep_idx].name.as_str();
                let target = step.name.as_str();
                if seen.insert((source, target)) {
                    edges.push(LayoutEdge {
                        id: format!("{}-{}", source, target),
                        source: source.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        edges
    }
}

/// A step being resolved: next dependency to visit and deepest level so far
struct Frame {
    idx: usize,
    cursor: usize,
    deepest: Option<usize>,
}

impl Frame {
    fn new(idx: usize) -> Self {
        Self {
            idx,
            cursor: 0,
            deepest: None,
        }
    }

    fn absorb(&mut self, dep_level: usize) {
        self.deepest = Some(self.deepest.map_or(dep_level, |d| d.max(dep_level)));
    }
}

fn place_nodes(steps: &[Step], levels: &[usize], config: &LayoutConfig) -> Vec<LayoutNode> {
    let mut by_level: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &level) in levels.iter().enumerate() {
        by_level.entry(level).or_default().push(idx);
    }

    let mut nodes = Vec::with_capacity(steps.len());
    for (&level, members) in &by_level {
        let centre = (members.len() as f64 - 1.0) / 2.0;
        for (index_in_level, &idx) in members.iter().enumerate() {
            let offset = (index_in_level as f64 - centre) * config.vertical_spacing;
            nodes.push(LayoutNode {
                name: steps[idx].name.clone(),
                level,
                index_in_level,
                position: Position {
                    x: level as f64 * config.horizontal_spacing,
                    y: config.baseline + offset,
                },
            });
        }
    }

    nodes
}
