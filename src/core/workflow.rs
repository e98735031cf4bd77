//! Workflow model - parses workflows/<id>/conf.yaml

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Run state of a workflow, stored as the `stts` boolean in conf.yaml
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Running,
    Paused,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// A named, schedulable pipeline of steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Directory name under the workflows root; not part of conf.yaml
    #[serde(skip)]
    pub id: String,
    pub name: String,
    /// Six-field cron expression (sec min hou dom mon dow)
    #[serde(default)]
    pub expr: String,
    #[serde(default)]
    pub stts: bool,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub steps: Vec<Step>,
}

/// One pipeline task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default)]
    pub script: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub depends: Vec<String>,
    #[serde(default)]
    pub timeout: u64,
    #[serde(default)]
    pub attempts: u32,
}

/// `depends: ~` and a missing key both mean "no dependencies"
fn nullable_vec<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Step {
    /// Step with a script and dependency list, default execution parameters
    pub fn new(name: impl Into<String>, depends: &[&str]) -> Self {
        let name = name.into();
        Self {
            script: format!("{}.sh", name),
            name,
            depends: depends.iter().map(|d| d.to_string()).collect(),
            timeout: 0,
            attempts: 0,
        }
    }
}

impl Workflow {
    /// Parse a conf.yaml document
    pub fn from_yaml(id: impl Into<String>, content: &str) -> Result<Self> {
        let mut workflow: Workflow = serde_yaml::from_str(content)?;
        workflow.id = id.into();
        Ok(workflow)
    }

    pub fn status(&self) -> WorkflowStatus {
        if self.stts {
            WorkflowStatus::Running
        } else {
            WorkflowStatus::Paused
        }
    }

    /// Get step by name (first match)
    pub fn get_step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}
