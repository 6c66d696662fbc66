//! Runs generated scripts against a kind's tool library.
//!
//! The library's public names are placed in the script's globals and the
//! script runs as `__main__`; whatever it prints is the result.

use super::layout::KernelLayout;
use super::process::run_driver;
use async_trait::async_trait;
use qforge_application::{ScriptError, ScriptRunner};
use tracing::debug;

/// Exit status the driver uses for a script that does not compile.
const SYNTAX_ERROR_STATUS: i32 = 3;

const SCRIPT_DRIVER: &str = r#"
import importlib.util, os, sys
path = sys.argv[1]
sys.path.insert(0, os.path.dirname(os.path.abspath(path)))
spec = importlib.util.spec_from_file_location("_qforge_tools", path)
module = importlib.util.module_from_spec(spec)
sys.modules["_qforge_tools"] = module
spec.loader.exec_module(module)
env = {name: getattr(module, name) for name in dir(module) if not name.startswith("_")}
env["__name__"] = "__main__"
source = sys.stdin.read()
try:
    code = compile(source, "<generated>", "exec")
except SyntaxError as e:
    sys.stderr.write("%s (line %s, offset %s)" % (e.msg, e.lineno, e.offset))
    sys.exit(3)
exec(code, env)
"#;

pub struct CommandScriptRunner {
    layout: KernelLayout,
    interpreter: String,
}

impl CommandScriptRunner {
    pub fn new(layout: KernelLayout, interpreter: impl Into<String>) -> Self {
        Self {
            layout,
            interpreter: interpreter.into(),
        }
    }
}

#[async_trait]
impl ScriptRunner for CommandScriptRunner {
    async fn run(&self, kind: &str, script: &str) -> Result<String, ScriptError> {
        let library = self
            .layout
            .tool_library(kind)
            .filter(|path| path.is_file())
            .ok_or_else(|| ScriptError::ToolsNotFound(kind.to_string()))?;

        let output = run_driver(
            &self.interpreter,
            SCRIPT_DRIVER,
            &[library.as_path()],
            &[],
            script,
        )
        .await
        .map_err(|e| ScriptError::Spawn(e.to_string()))?;

        debug!(
            "Script for {} exited with {:?} ({} bytes of output)",
            kind,
            output.code,
            output.stdout.len()
        );
        match output.code {
            Some(0) => Ok(output.stdout),
            Some(SYNTAX_ERROR_STATUS) => Err(ScriptError::Syntax(output.error_tail())),
            _ => Err(ScriptError::Failed(output.error_tail())),
        }
    }
}
