//! Fixed task plan for a user query

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTask {
    pub task: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub query: String,
    pub tasks: Vec<PlannedTask>,
}

const TASKS: [(&str, &str); 5] = [
    ("load_data", "Load and summarize dataset"),
    (
        "generate_insights",
        "Create hypotheses explaining metric changes",
    ),
    (
        "validate_insights",
        "Evaluate hypotheses using quantitative checks",
    ),
    (
        "generate_creatives",
        "Suggest new creative directions for low-CTR campaigns",
    ),
    ("compile_report", "Write final marketing insights report"),
];

/// The task sequence does not depend on the query text.
pub fn plan(query: &str) -> Plan {
    Plan {
        query: query.to_string(),
        tasks: TASKS
            .iter()
            .map(|&(task, description)| PlannedTask { task, description })
            .collect(),
    }
}
