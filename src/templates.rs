//! Template Roots - Alias to Directory Mapping
//!
//! Lets templates include `@components/button/button.twig` without knowing
//! where the frontend checkout lives.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Registry of template root aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRoots {
    roots: BTreeMap<String, PathBuf>,
}

impl TemplateRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard roots for a CMS installed at `base_path`.
    pub fn defaults(base_path: &Path) -> Self {
        let mut roots = Self::new();
        roots.register("@components", base_path.join("../frontend/src/components"));
        roots.register("@templates", base_path.join("../frontend/src/templates"));
        roots.register("@assets", base_path.join("web/assets"));
        roots
    }

    pub fn register(&mut self, alias: impl Into<String>, path: impl Into<PathBuf>) {
        self.roots.insert(alias.into(), path.into());
    }

    pub fn get(&self, alias: &str) -> Option<&Path> {
        self.roots.get(alias).map(PathBuf::as_path)
    }

    pub fn list(&self) -> Vec<(&str, &Path)> {
        self.roots
            .iter()
            .map(|(alias, path)| (alias.as_str(), path.as_path()))
            .collect()
    }

    /// Resolve `@alias/rest/of/path` against the registered roots.
    pub fn resolve(&self, template: &str) -> Option<PathBuf> {
        if !template.starts_with('@') {
            return None;
        }
        let (alias, rest) = template.split_once('/').unwrap_or((template, ""));
        let root = self.get(alias)?;
        Some(if rest.is_empty() { root.to_path_buf() } else { root.join(rest) })
    }
}
