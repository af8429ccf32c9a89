//! The compiled story document.

use std::collections::BTreeMap;

use serde::Serialize;
use story_lines::{LineTable, Lines};

/// The persisted result of compiling one story.
///
/// ```json
/// {"tree": {"1": {...}}, "entrypoint": "1", "services": ["alpine"], "functions": {"greet": "3"}}
/// ```
#[derive(Debug, Serialize)]
pub struct CompiledStory {
    pub tree: LineTable,
    /// First line, absent for an empty story.
    pub entrypoint: Option<String>,
    /// External services, sorted.
    pub services: Vec<String>,
    /// Function name → header line.
    pub functions: BTreeMap<String, String>,
}

impl CompiledStory {
    pub(crate) fn from_lines(lines: Lines<'_>) -> Self {
        let entrypoint = lines.entrypoint().map(|ln| ln.to_string());
        let services = lines.get_services();
        let functions = lines
            .functions()
            .iter()
            .map(|(name, ln)| (name.clone(), ln.to_string()))
            .collect();
        CompiledStory {
            tree: lines.into_table(),
            entrypoint,
            services,
            functions,
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
