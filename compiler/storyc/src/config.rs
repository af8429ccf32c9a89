//! Compiler configuration.

use story_canon::CanonOptions;
use story_types::{FunctionTable, Signature};

/// Options for one compilation.
#[derive(Clone, Debug, Default)]
pub struct CompilerConfig {
    /// Accept `'single quoted'` strings.
    pub allow_single_quotes: bool,
    /// Mutations whose calls are checked against their signature.
    pub mutations: Vec<Signature>,
}

impl CompilerConfig {
    pub fn new() -> Self {
        CompilerConfig::default()
    }

    #[must_use]
    pub fn allow_single_quotes(mut self, allow: bool) -> Self {
        self.allow_single_quotes = allow;
        self
    }

    /// Register a mutation signature.
    #[must_use]
    pub fn mutation(mut self, signature: Signature) -> Self {
        self.mutations.push(signature);
        self
    }

    pub(crate) fn canon_options(&self) -> CanonOptions {
        CanonOptions {
            allow_single_quotes: self.allow_single_quotes,
        }
    }

    /// A fresh table holding the registered mutations.
    pub(crate) fn function_table(&self) -> FunctionTable {
        let mut table = FunctionTable::new();
        for signature in &self.mutations {
            table.insert_mutation(signature.clone());
        }
        table
    }
}
