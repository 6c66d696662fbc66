//! On-disk layout of the kernel tree.
//!
//! ```text
//! <root>/<kind>/universal_test.py                        verifier harness
//! <root>/<kind>/<kind>_schema.txt                         schema for plan enrichment
//! <root>/<kind>/qasm_circuit/*_n<size>.qasm               guided examples
//! <root>/kernel_tools/<kind>_tools.py                     tool library
//! <root>/tools_descriptions/<kind>_tools_description.json tool descriptions
//! <root>/tools_descriptions/<kind>_tools_description.py   (module form)
//! ```
//!
//! Kinds come from oracle output, so every lookup accepts only a plain name
//! (ASCII letters, digits, `_` and `-`) and returns `None` otherwise.

use std::path::PathBuf;

/// Whether `kind` can be used as a single path component under the root.
pub fn is_plain_kind(kind: &str) -> bool {
    !kind.is_empty()
        && kind
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelLayout {
    root: PathBuf,
}

impl KernelLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn kind_dir(&self, kind: &str) -> Option<PathBuf> {
        is_plain_kind(kind).then(|| self.root.join(kind))
    }

    fn shared_file(&self, dir: &str, kind: &str, suffix: &str) -> Option<PathBuf> {
        is_plain_kind(kind).then(|| self.root.join(dir).join(format!("{}{}", kind, suffix)))
    }

    pub fn harness(&self, kind: &str) -> Option<PathBuf> {
        Some(self.kind_dir(kind)?.join("universal_test.py"))
    }

    pub fn schema(&self, kind: &str) -> Option<PathBuf> {
        Some(self.kind_dir(kind)?.join(format!("{}_schema.txt", kind)))
    }

    pub fn examples_dir(&self, kind: &str) -> Option<PathBuf> {
        Some(self.kind_dir(kind)?.join("qasm_circuit"))
    }

    pub fn tool_library(&self, kind: &str) -> Option<PathBuf> {
        self.shared_file("kernel_tools", kind, "_tools.py")
    }

    pub fn tool_description_json(&self, kind: &str) -> Option<PathBuf> {
        self.shared_file("tools_descriptions", kind, "_tools_description.json")
    }

    pub fn tool_description_module(&self, kind: &str) -> Option<PathBuf> {
        self.shared_file("tools_descriptions", kind, "_tools_description.py")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let layout = KernelLayout::new("/k");
        assert_eq!(layout.harness("ghz"), Some(PathBuf::from("/k/ghz/universal_test.py")));
        assert_eq!(layout.schema("bv"), Some(PathBuf::from("/k/bv/bv_schema.txt")));
        assert_eq!(
            layout.tool_library("adder"),
            Some(PathBuf::from("/k/kernel_tools/adder_tools.py"))
        );
        assert_eq!(
            layout.tool_description_json("pe"),
            Some(PathBuf::from("/k/tools_descriptions/pe_tools_description.json"))
        );
        assert_eq!(
            layout.examples_dir("w_state"),
            Some(PathBuf::from("/k/w_state/qasm_circuit"))
        );
    }

    #[test]
    fn test_kinds_cannot_leave_root() {
        let layout = KernelLayout::new("/srv/kernels");
        for kind in ["/tmp/evil", "../../tmp/evil", "..", ".", "", "ghz/../bv", "a b", "ghz\\x"] {
            assert_eq!(layout.harness(kind), None, "{kind:?}");
            assert_eq!(layout.schema(kind), None, "{kind:?}");
            assert_eq!(layout.examples_dir(kind), None, "{kind:?}");
            assert_eq!(layout.tool_library(kind), None, "{kind:?}");
            assert_eq!(layout.tool_description_json(kind), None, "{kind:?}");
            assert_eq!(layout.tool_description_module(kind), None, "{kind:?}");
        }
    }

    #[test]
    fn test_is_plain_kind() {
        assert!(is_plain_kind("ghz"));
        assert!(is_plain_kind("w_state"));
        assert!(is_plain_kind("qft-2"));
        assert!(!is_plain_kind("../ghz"));
        assert!(!is_plain_kind("ghz.py"));
    }
}
