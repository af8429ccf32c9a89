//! Registry of callable signatures.

use rustc_hash::FxHashMap;
use story_diagnostic::{ErrorItem, ErrorType, StoryError, StoryResult};

use crate::Signature;

/// Declared functions and registered mutations, looked up by name.
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<String, Signature>,
    mutations: FxHashMap<String, Signature>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable::default()
    }

    /// Register a story function. Functions cannot be redeclared.
    pub fn insert_function(
        &mut self,
        signature: Signature,
        item: impl Into<ErrorItem>,
    ) -> StoryResult<()> {
        if self.functions.contains_key(signature.name()) {
            return Err(StoryError::new(ErrorType::FunctionRedeclared, item)
                .with_arg("name", signature.name()));
        }
        tracing::debug!(signature = %signature.pretty(), "registered function");
        self.functions
            .insert(signature.name().to_owned(), signature);
        Ok(())
    }

    /// Register a mutation, replacing any previous one of the same name.
    pub fn insert_mutation(&mut self, signature: Signature) {
        tracing::debug!(signature = %signature.pretty(), "registered mutation");
        self.mutations
            .insert(signature.name().to_owned(), signature);
    }

    pub fn function(&self, name: &str) -> Option<&Signature> {
        self.functions.get(name)
    }

    pub fn mutation(&self, name: &str) -> Option<&Signature> {
        self.mutations.get(name)
    }
}

#[cfg(test)]
mod tests;
