use serde::Serialize;

/// What happened to one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Created, started if needed, and `exported` apps/bins exported.
    Created { exported: usize },
    AlreadyExists,
    Removed,
    /// Dry run: the command lines that would have been run.
    Planned { commands: Vec<String> },
    Failed { reason: String },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::AlreadyExists => "exists",
            Self::Removed => "removed",
            Self::Planned { .. } => "planned",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub outcome: Outcome,
}

/// Per-container results of one assembler run, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssembleReport {
    pub entries: Vec<ReportEntry>,
}

impl AssembleReport {
    pub fn push(&mut self, name: &str, outcome: Outcome) {
        self.entries.push(ReportEntry {
            name: name.to_owned(),
            outcome,
        });
    }

    pub fn get(&self, name: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.outcome)
    }

    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
