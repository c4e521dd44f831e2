use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub queues: Vec<QueueConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    pub name: String,
    pub capacity: usize,
    #[serde(default)]
    pub init: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Push { queue: String, value: i64 },
    Emplace { queue: String, value: i64 },
    Pop { queue: String },
    Front { queue: String },
    Back { queue: String },
    Clear { queue: String },
    Swap { queue: String, other: String },
    Copy { queue: String, other: String },
    Move { queue: String, other: String },
    Compare { queue: String, other: String },
    Expect { queue: String, items: Vec<i64> },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::Push { .. } => "push",
            Step::Emplace { .. } => "emplace",
            Step::Pop { .. } => "pop",
            Step::Front { .. } => "front",
            Step::Back { .. } => "back",
            Step::Clear { .. } => "clear",
            Step::Swap { .. } => "swap",
            Step::Copy { .. } => "copy",
            Step::Move { .. } => "move",
            Step::Compare { .. } => "compare",
            Step::Expect { .. } => "expect",
        }
    }
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self, anyhow::Error> {
        let scenario: Scenario =
            serde_yaml::from_str(content).context("failed to parse scenario")?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("invalid scenario {}", path.display()))
    }
}

mod test {

    #[test]
    fn test_parse_scenario() {
        use super::{QueueConfig, Scenario, Step};

        let yaml = r#"
queues:
  - name: a
    capacity: 3
    init: [1, 2]
  - name: b
    capacity: 3
steps:
  - { op: push, queue: a, value: 3 }
  - { op: pop, queue: a }
  - { op: swap, queue: a, other: b }
  - { op: expect, queue: b, items: [2, 3] }
"#;

        let scenario = Scenario::from_yaml(yaml).unwrap();

        assert_eq!(
            scenario.queues,
            vec![
                QueueConfig {
                    name: "a".to_string(),
                    capacity: 3,
                    init: vec![1, 2],
                },
                QueueConfig {
                    name: "b".to_string(),
                    capacity: 3,
                    init: vec![],
                },
            ]
        );
        assert_eq!(
            scenario.steps,
            vec![
                Step::Push {
                    queue: "a".to_string(),
                    value: 3
                },
                Step::Pop {
                    queue: "a".to_string()
                },
                Step::Swap {
                    queue: "a".to_string(),
                    other: "b".to_string()
                },
                Step::Expect {
                    queue: "b".to_string(),
                    items: vec![2, 3]
                },
            ]
        );
        assert_eq!(scenario.steps[2].op(), "swap");
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        use super::Scenario;

        let yaml = r#"
queues:
  - { name: a, capacity: 1 }
steps:
  - { op: peek, queue: a }
"#;

        assert!(Scenario::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_bundled_scenario_parses() {
        use super::Scenario;

        let scenario = Scenario::from_yaml(include_str!("../scenarios/wraparound.yaml")).unwrap();
        assert_eq!(scenario.queues.len(), 2);
        assert!(!scenario.steps.is_empty());
    }
}
