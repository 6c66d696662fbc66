//! Filesystem-backed schema, example and tool-description catalogs.

use super::layout::KernelLayout;
use super::process::run_driver;
use async_trait::async_trait;
use qforge_application::{CatalogError, ExampleSource, SchemaStore, ToolCatalog};
use qforge_domain::{ArtifactExample, ToolFunction, render_tool_functions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Prints the `<kind>_tools_description` dict of a description module as JSON.
const DESCRIPTION_DRIVER: &str = r#"
import importlib.util, json, sys
spec = importlib.util.spec_from_file_location("_qforge_description", sys.argv[1])
module = importlib.util.module_from_spec(spec)
spec.loader.exec_module(module)
print(json.dumps(getattr(module, sys.argv[2])))
"#;

fn invalid_kind(kind: &str) -> CatalogError {
    CatalogError::Invalid {
        path: kind.to_string(),
        message: "kind must be a plain name".to_string(),
    }
}

fn io_error(path: &Path, e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Reads `<kind>/<kind>_schema.txt`.
pub struct FsSchemaStore {
    layout: KernelLayout,
}

impl FsSchemaStore {
    pub fn new(layout: KernelLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl SchemaStore for FsSchemaStore {
    async fn lookup(&self, kind: &str) -> String {
        let Some(path) = self.layout.schema(kind) else {
            warn!("Ignoring schema lookup for invalid kind {:?}", kind);
            return String::new();
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(schema) => schema,
            Err(e) => {
                debug!("No schema for {} at {}: {}", kind, path.display(), e);
                String::new()
            }
        }
    }
}

/// Reads example circuits named `*_n<size>.qasm`.
pub struct FsExampleSource {
    layout: KernelLayout,
}

impl FsExampleSource {
    pub fn new(layout: KernelLayout) -> Self {
        Self { layout }
    }

    fn matching_files(&self, kind: &str, size: u32) -> Result<Vec<PathBuf>, CatalogError> {
        let dir = self.layout.examples_dir(kind).ok_or_else(|| invalid_kind(kind))?;
        let pattern = format!(
            "{}/*_n{}.qasm",
            glob::Pattern::escape(&dir.to_string_lossy()),
            size
        );
        let paths = glob::glob(&pattern).map_err(|e| CatalogError::Invalid {
            path: pattern.clone(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable example entry: {}", e);
                    None
                }
            })
            .filter(|path| example_size(path) == Some(size))
            .collect();
        files.sort();
        Ok(files)
    }
}

/// Size encoded in an example's file name.
pub fn example_size(path: &Path) -> Option<u32> {
    let stem = path.file_name()?.to_str()?.strip_suffix(".qasm")?;
    let (_, digits) = stem.rsplit_once("_n")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[async_trait]
impl ExampleSource for FsExampleSource {
    async fn examples(&self, kind: &str, shots: u32) -> Result<Vec<ArtifactExample>, CatalogError> {
        let mut examples = Vec::new();
        for size in 2..2 + shots {
            for path in self.matching_files(kind, size)? {
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| io_error(&path, e))?;
                examples.push(ArtifactExample::new(size, content));
            }
        }

        if examples.is_empty() {
            return Err(CatalogError::NotFound {
                what: "examples",
                kind: kind.to_string(),
            });
        }
        debug!("Loaded {} examples for {}", examples.len(), kind);
        Ok(examples)
    }
}

#[derive(Debug, Deserialize)]
struct ToolLibraryDescription {
    #[serde(default)]
    functions: Vec<ToolFunction>,
}

/// Reads tool library descriptions.
///
/// A `.json` description is preferred; otherwise the `.py` module is
/// evaluated with the interpreter and its description dict is read back.
pub struct FsToolCatalog {
    layout: KernelLayout,
    interpreter: String,
}

impl FsToolCatalog {
    pub fn new(layout: KernelLayout, interpreter: impl Into<String>) -> Self {
        Self {
            layout,
            interpreter: interpreter.into(),
        }
    }

    async fn load_raw(&self, kind: &str) -> Result<(PathBuf, String), CatalogError> {
        let json_path = self
            .layout
            .tool_description_json(kind)
            .ok_or_else(|| invalid_kind(kind))?;
        if json_path.exists() {
            let raw = tokio::fs::read_to_string(&json_path)
                .await
                .map_err(|e| io_error(&json_path, e))?;
            return Ok((json_path, raw));
        }

        let module_path = self
            .layout
            .tool_description_module(kind)
            .ok_or_else(|| invalid_kind(kind))?;
        if !module_path.exists() {
            return Err(CatalogError::NotFound {
                what: "tool description",
                kind: kind.to_string(),
            });
        }

        let variable = format!("{}_tools_description", kind);
        let output = run_driver(
            &self.interpreter,
            DESCRIPTION_DRIVER,
            &[module_path.as_path()],
            &[variable.as_str()],
            "",
        )
        .await
        .map_err(|e| io_error(&module_path, e))?;
        if !output.success() {
            return Err(CatalogError::Invalid {
                path: module_path.display().to_string(),
                message: output.error_tail(),
            });
        }
        Ok((module_path, output.stdout))
    }
}

/// Parse a tool description document into its functions.
pub fn parse_tool_description(path: &Path, raw: &str) -> Result<Vec<ToolFunction>, CatalogError> {
    let description: ToolLibraryDescription =
        serde_json::from_str(raw.trim()).map_err(|e| CatalogError::Invalid {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    Ok(description.functions)
}

#[async_trait]
impl ToolCatalog for FsToolCatalog {
    async fn describe(&self, kind: &str) -> Result<String, CatalogError> {
        let (path, raw) = self.load_raw(kind).await?;
        let functions = parse_tool_description(&path, &raw)?;
        if functions.is_empty() {
            return Err(CatalogError::NotFound {
                what: "tool functions",
                kind: kind.to_string(),
            });
        }
        Ok(render_tool_functions(&functions))
    }
}
