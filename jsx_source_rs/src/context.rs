//! Per-file processing context shared by every pass run on that file.

use crate::location::resolve_display_name;

/// One-shot flag: set when the annotation pass first traverses a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassGuard {
    visited: bool,
}

impl PassGuard {
    pub fn is_set(&self) -> bool {
        self.visited
    }

    pub(crate) fn set(&mut self) {
        self.visited = true;
    }
}

/// State for one file in one pipeline run. Create a fresh context per file;
/// reuse it for every registration of the pass on that file.
#[derive(Debug, Clone, Default)]
pub struct FileContext {
    filename: Option<String>,
    source_root: Option<String>,
    guard: PassGuard,
}

impl FileContext {
    pub fn new(filename: Option<impl Into<String>>, source_root: Option<impl Into<String>>) -> Self {
        Self {
            filename: filename.map(Into::into),
            source_root: source_root.map(Into::into),
            guard: PassGuard::default(),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn source_root(&self) -> Option<&str> {
        self.source_root.as_deref()
    }

    pub fn display_name(&self) -> String {
        resolve_display_name(self.filename(), self.source_root())
    }

    pub fn guard(&self) -> PassGuard {
        self.guard
    }

    pub(crate) fn guard_mut(&mut self) -> &mut PassGuard {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_unset_guard() {
        let ctx = FileContext::new(Some("test.tsx"), None::<String>);
        assert!(!ctx.guard().is_set());
        assert_eq!(ctx.display_name(), "test.tsx");
    }

    #[test]
    fn guard_stays_set() {
        let mut ctx = FileContext::default();
        ctx.guard_mut().set();
        ctx.guard_mut().set();
        assert!(ctx.guard().is_set());
        assert_eq!(ctx.display_name(), "unknown");
    }

    #[test]
    fn root_applies_to_display_name() {
        let ctx = FileContext::new(Some("/project/src/App.tsx"), Some("/project/"));
        assert_eq!(ctx.filename(), Some("/project/src/App.tsx"));
        assert_eq!(ctx.source_root(), Some("/project/"));
        assert_eq!(ctx.display_name(), "src/App.tsx");
    }
}
