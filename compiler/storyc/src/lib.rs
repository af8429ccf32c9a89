//! The story compiler driver.
//!
//! Takes the raw parse tree of a story, normalizes it, compiles its
//! statements into a line table and returns the [`CompiledStory`] document.
//!
//! ```text
//! raw tree ─► story_canon ─► statement compiler ─► CompiledStory
//!                               │        │
//!                          story_lower  story_types
//!                               └─► story_lines
//! ```

mod compile;
mod config;
mod output;
mod story;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

use story_canon::Normalizer;
use story_diagnostic::CompileError;
use story_ir::Node;
use thiserror::Error;

use compile::StatementCompiler;
pub use config::CompilerConfig;
pub use output::CompiledStory;
pub use story::Story;

/// Compile a raw parse tree.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(
    tree: Node,
    story: &Story,
    config: &CompilerConfig,
) -> Result<CompiledStory, CompileError> {
    let tree = Normalizer::new(config.canon_options()).normalize(tree)?;
    let compiled = StatementCompiler::new(story, config.function_table()).compile(&tree)?;
    tracing::debug!(
        lines = compiled.tree.len(),
        services = compiled.services.len(),
        "compiled story"
    );
    Ok(compiled)
}

/// A failure of the command-line driver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid parse tree: {0}")]
    Tree(#[from] serde_json::Error),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Compile the JSON parse tree at `tree_path` for the story at `story_path`.
pub fn compile_files(
    tree_path: &Path,
    story_path: &Path,
    config: &CompilerConfig,
) -> Result<CompiledStory, DriverError> {
    let tree = std::fs::read_to_string(tree_path).map_err(|source| DriverError::Io {
        path: tree_path.to_path_buf(),
        source,
    })?;
    let story = Story::from_file(story_path).map_err(|source| DriverError::Io {
        path: story_path.to_path_buf(),
        source,
    })?;
    let tree: Node = serde_json::from_str(&tree)?;
    Ok(compile(tree, &story, config)?)
}

static TRACING_INIT: Once = Once::new();

/// Install the log subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=story_canon=trace`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
