//! nagconf - Nagios object configuration loader and template resolver
//!
//! This library parses Nagios object definitions, classifies them by kind,
//! resolves template inheritance (`use`, `name`, additive `+` values), and
//! writes the result back out as object definitions.
//!
//! # Example
//!
//! ```rust
//! use nagconf::{render, EmitConfig};
//!
//! let source = "
//! define host {
//!     name            base
//!     check_period    24x7
//!     register        0
//! }
//! define host {
//!     host_name       web01
//!     use             base
//! }
//! ";
//!
//! let out = render(source, &EmitConfig::new().full()).unwrap();
//! assert_eq!(out.matches("24x7").count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod renderer;
pub mod store;
pub mod template;

pub use config::{ConfigError, RunConfig};
pub use error::ParseError;
pub use model::{ObjectKind, ObjectRecord, PropertySlot, Provenance};
pub use parser::{parse, Document};
pub use renderer::{render_history, render_object, render_objects, EmitConfig, EmitMode};
pub use store::{ObjectStore, StoreStats};
pub use template::InheritanceDiagnostic;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One file failed to parse; `report` holds the rendered diagnostics
    #[error("{file}: {count} parse error(s)\n{report}", count = .errors.len())]
    Parse {
        file: String,
        errors: Vec<ParseError>,
        report: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
}

/// A configuration file's name and contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Read every file in `dir` with the given extension, sorted by path
pub fn load_sources(dir: &Path, extension: &str) -> Result<Vec<SourceFile>, RunError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| RunError::Io { path, source }
    };

    let mut paths = Vec::new();
    let mut entries = 0;
    for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        entries += 1;
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    tracing::debug!(dir = %dir.display(), entries, matching = paths.len(), "scanned config directory");

    let mut sources = Vec::with_capacity(paths.len());
    let mut lines = 0;
    for path in paths {
        let text = std::fs::read_to_string(&path).map_err(io_err(&path))?;
        lines += text.lines().count();
        sources.push(SourceFile::new(path.display().to_string(), text));
    }
    tracing::debug!(files = sources.len(), lines, "read raw config");
    Ok(sources)
}

/// Parse, classify and resolve a set of sources
pub fn process(sources: &[SourceFile]) -> Result<ObjectStore, RunError> {
    let mut documents = Vec::with_capacity(sources.len());
    for source in sources {
        let doc = parse(&source.text).map_err(|errors| {
            let report = errors
                .iter()
                .map(|e| e.format(&source.text, &source.name))
                .collect::<Vec<_>>()
                .join("\n");
            RunError::Parse {
                file: source.name.clone(),
                errors,
                report,
            }
        })?;
        tracing::debug!(file = %source.name, blocks = doc.blocks.len(), "parsed");
        documents.push(doc);
    }

    let mut store = ObjectStore::from_documents(&documents);
    store.run();
    Ok(store)
}

/// [`process`] a single in-memory source
pub fn process_str(source: &str) -> Result<ObjectStore, RunError> {
    process(&[SourceFile::new("<input>", source)])
}

/// Resolve a single source and render its objects
pub fn render(source: &str, config: &EmitConfig) -> Result<String, RunError> {
    let store = process_str(source)?;
    Ok(render_objects(store.objects(), config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_str_resolves() {
        let store = process_str(
            "define contact {\n  name base\n  email ops@example.com\n}\n\
             define contact {\n  contact_name alice\n  use base\n}\n",
        )
        .unwrap();
        assert_eq!(store.objects()[1].value("email"), "ops@example.com");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = process(&[SourceFile::new("broken.cfg", "define host {\n host_name x\n")])
            .unwrap_err();
        match &err {
            RunError::Parse { file, errors, report } => {
                assert_eq!(file, "broken.cfg");
                assert!(!errors.is_empty());
                assert!(report.contains("broken.cfg"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("broken.cfg: "));
    }

    #[test]
    fn test_render_minimal_drops_inherited() {
        let out = render(
            "define host {\n  name base\n  alias Base\n}\ndefine host {\n  host_name web01\n  use base\n}\n",
            &EmitConfig::default(),
        )
        .unwrap();
        assert_eq!(out.matches("alias").count(), 1);
    }

    #[test]
    fn test_load_sources_missing_dir() {
        let err = load_sources(Path::new("/definitely/not/here"), "cfg").unwrap_err();
        assert!(matches!(err, RunError::Io { .. }));
        assert!(err.to_string().starts_with("I/O error on /definitely/not/here: "));
    }

    #[test]
    fn test_io_error_message_fits_writes() {
        let path = PathBuf::from("/definitely/not/here/out.cfg");
        let err = RunError::Io {
            source: std::fs::write(&path, "x").unwrap_err(),
            path,
        };
        let message = err.to_string();
        assert!(message.starts_with("I/O error on /definitely/not/here/out.cfg: "));
        assert!(!message.contains("read"));
    }
}
