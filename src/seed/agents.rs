// src/seed/agents.rs

/// A demo agent: a name plus an ordered list of capability tags.
///
/// Descriptors are only literal input to the on-chain mint call; nothing is
/// persisted on this side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDescriptor {
    pub name: String,
    pub capabilities: Vec<String>,
}

impl AgentDescriptor {
    pub fn new(name: impl Into<String>, capabilities: &[&str]) -> Self {
        Self {
            name: name.into(),
            capabilities: capabilities.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The built-in demo roster, minted in exactly this order.
pub fn demo_roster() -> Vec<AgentDescriptor> {
    vec![
        AgentDescriptor::new(
            "TranslatorBot",
            &["translation", "language-detection", "summarization"],
        ),
        AgentDescriptor::new("DataAnalyst", &["data-analysis", "charting", "sql"]),
        AgentDescriptor::new(
            "CreativeAI",
            &["image-prompting", "storytelling", "copywriting"],
        ),
        AgentDescriptor::new("CodeMaster", &["code-generation", "code-review", "debugging"]),
        AgentDescriptor::new(
            "ResearchBot",
            &["web-research", "citation", "fact-checking"],
        ),
    ]
}
