//! Type registry.
//!
//! The [`TypeRegistry`] is the single source of truth for classification data.
//! It holds three facets per label:
//!
//! - the extensions that map to it
//! - its parent labels, which define the type hierarchy
//! - its magic patterns, kept in a priority-ordered list
//!
//! Detection only needs `&TypeRegistry`. The mutating operations ([`extend`],
//! [`remove`], [`reset`]) take `&mut self`, so no detection call can observe a
//! registry while it is being changed. Hosts normally build and customize one
//! registry during startup and share it read-only afterwards.
//!
//! Labels are compared ignoring ASCII case. The spelling a label was
//! registered with is the one reported back.
//!
//! [`extend`]: TypeRegistry::extend
//! [`remove`]: TypeRegistry::remove
//! [`reset`]: TypeRegistry::reset

pub mod builtin;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::common::error::Result;
use crate::pattern::Pattern;
use crate::pattern::definition::Definition;

/// Snapshot every registry starts from and [`TypeRegistry::reset`] restores.
static BUILTIN: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::from_builtin_tables);

/// A label and its alternative patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    label: String,
    patterns: Vec<Pattern>,
}

impl TypeEntry {
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// Mutable classification tables.
///
/// # Examples
///
/// ```rust
/// use typesniff::TypeRegistry;
/// use typesniff::pattern::Pattern;
///
/// let mut registry = TypeRegistry::new();
/// assert_eq!(registry.lookup_by_extension(".PNG"), Some("image/png"));
///
/// registry.extend(
///     "application/x-acme",
///     Some(&["acme"][..]),
///     Some(&["application/zip"][..]),
///     Some(vec![Pattern::fixed(0, &b"ACME"[..])?]),
/// );
/// assert_eq!(registry.lookup_by_extension("acme"), Some("application/x-acme"));
///
/// registry.remove("application/x-acme");
/// assert_eq!(registry.lookup_by_extension("acme"), None);
/// # Ok::<(), typesniff::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    /// Normalized extension → label
    by_extension: HashMap<String, String>,
    /// Label key → extensions registered for it
    extensions: HashMap<String, Vec<String>>,
    /// Label key → parent labels
    parents: HashMap<String, Vec<String>>,
    /// Pattern entries, highest priority first
    entries: Vec<TypeEntry>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry seeded with the built-in tables.
    pub fn new() -> Self {
        BUILTIN.clone()
    }

    /// Create a registry with no types at all.
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
            extensions: HashMap::new(),
            parents: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn from_builtin_tables() -> Self {
        let mut registry = Self::empty();

        for (ext, label) in builtin::EXTENSIONS.entries() {
            registry.by_extension.insert((*ext).to_string(), (*label).to_string());
            registry
                .extensions
                .entry(label_key(label))
                .or_default()
                .push((*ext).to_string());
        }
        // phf iteration order is arbitrary
        for exts in registry.extensions.values_mut() {
            exts.sort_unstable();
        }

        for (label, parents) in builtin::PARENTS {
            registry
                .parents
                .insert(label_key(label), parents.iter().map(|p| p.to_string()).collect());
        }

        registry.entries = builtin::entries();
        registry
    }

    /// Look up the label registered for a file extension.
    ///
    /// Leading dots are stripped and the comparison ignores ASCII case. There is
    /// no fuzzy matching: `"tar.gz"` is not `"gz"`.
    pub fn lookup_by_extension(&self, ext: &str) -> Option<&str> {
        let ext = normalize_extension(ext)?;
        self.by_extension.get(&ext).map(String::as_str)
    }

    /// Labels with patterns, in the order content detection checks them.
    pub fn labels_in_priority_order(&self) -> impl Iterator<Item = (&str, &[Pattern])> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.patterns.as_slice()))
    }

    /// Pattern entries, in priority order.
    #[inline]
    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    /// Patterns registered for `label`, if any.
    pub fn patterns_for(&self, label: &str) -> Option<&[Pattern]> {
        let key = label_key(label);
        self.entries
            .iter()
            .find(|entry| label_key(&entry.label) == key)
            .map(|entry| entry.patterns.as_slice())
    }

    /// Extensions registered for `label`. Empty when there are none.
    pub fn extensions_for(&self, label: &str) -> &[String] {
        self.extensions
            .get(&label_key(label))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Direct parents of `label`. Empty when there are none.
    pub fn parents_of(&self, label: &str) -> &[String] {
        self.parents
            .get(&label_key(label))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether any facet mentions `label`.
    pub fn contains(&self, label: &str) -> bool {
        let key = label_key(label);
        self.extensions.contains_key(&key)
            || self.parents.contains_key(&key)
            || self.entries.iter().any(|entry| label_key(&entry.label) == key)
            || self.by_extension.values().any(|target| label_key(target) == key)
    }

    /// Number of distinct labels known to the registry.
    pub fn len(&self) -> usize {
        self.extensions
            .keys()
            .cloned()
            .chain(self.parents.keys().cloned())
            .chain(self.entries.iter().map(|entry| label_key(&entry.label)))
            .chain(self.by_extension.values().map(|target| label_key(target)))
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
            && self.extensions.is_empty()
            && self.parents.is_empty()
            && self.entries.is_empty()
    }

    /// Add or replace facets of `label`.
    ///
    /// Each facet given as `Some` replaces what was there before; `None`
    /// leaves that facet alone.
    ///
    /// - **extensions**: the label's whole extension set is replaced. Each
    ///   extension then resolves to `label`, taking it over from any other
    ///   label that claimed it.
    /// - **parents**: the parent set is replaced wholesale.
    /// - **patterns**: the label's entry moves to the front of the priority
    ///   list, so it is checked before every built-in and previously
    ///   registered type.
    ///
    /// An empty label is ignored.
    pub fn extend(
        &mut self,
        label: &str,
        extensions: Option<&[&str]>,
        parents: Option<&[&str]>,
        patterns: Option<Vec<Pattern>>,
    ) {
        let label = label.trim();
        let key = label_key(label);
        if key.is_empty() {
            return;
        }

        if let Some(extensions) = extensions {
            self.drop_extension_targets(&key);

            let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
            for ext in extensions.iter().filter_map(|ext| normalize_extension(ext)) {
                if !normalized.contains(&ext) {
                    self.by_extension.insert(ext.clone(), label.to_string());
                    normalized.push(ext);
                }
            }
            self.extensions.insert(key.clone(), normalized);
        }

        if let Some(parents) = parents {
            let parents = parents
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            self.parents.insert(key.clone(), parents);
        }

        if let Some(patterns) = patterns {
            self.entries.retain(|entry| label_key(&entry.label) != key);
            self.entries.insert(
                0,
                TypeEntry {
                    label: label.to_string(),
                    patterns,
                },
            );
        }

        debug!(label, "extended type registry");
    }

    /// Apply a validated [`Definition`].
    ///
    /// # Errors
    ///
    /// Fails without touching the registry if the definition is invalid.
    pub fn extend_with(&mut self, definition: &Definition) -> Result<()> {
        let patterns = definition.compile_patterns()?;
        let extensions: Option<Vec<&str>> = definition
            .extensions
            .as_ref()
            .map(|exts| exts.iter().map(String::as_str).collect());
        let parents: Option<Vec<&str>> = definition
            .parents
            .as_ref()
            .map(|parents| parents.iter().map(String::as_str).collect());

        self.extend(
            definition.label.trim(),
            extensions.as_deref(),
            parents.as_deref(),
            patterns,
        );
        Ok(())
    }

    /// Apply a YAML list of [`Definition`]s in document order.
    ///
    /// The whole document is parsed and validated first, so a bad entry leaves
    /// the registry unchanged. Returns the number of definitions applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::io::Cursor;
    /// use typesniff::{Detector, TypeRegistry};
    ///
    /// let mut registry = TypeRegistry::new();
    /// let applied = registry.extend_from_yaml(r#"
    /// - label: application/x-acme
    ///   extensions: [acme]
    ///   patterns:
    ///     - text: "ACME"
    /// "#)?;
    /// assert_eq!(applied, 1);
    ///
    /// let detector = Detector::new(&registry);
    /// assert_eq!(detector.detect_bytes(b"ACME\x01"), Some("application/x-acme"));
    /// # Ok::<(), typesniff::Error>(())
    /// ```
    #[cfg(feature = "yaml")]
    pub fn extend_from_yaml(&mut self, yaml: &str) -> Result<usize> {
        let definitions: Vec<Definition> = serde_saphyr::from_str(yaml).map_err(|e| {
            crate::common::error::Error::Config(format!("Failed to parse type definitions: {}", e))
        })?;

        for definition in &definitions {
            definition.compile_patterns()?;
        }
        for definition in &definitions {
            self.extend_with(definition)?;
        }

        debug!(count = definitions.len(), "loaded type definitions");
        Ok(definitions.len())
    }

    /// Remove every facet of `label`.
    ///
    /// Other labels that list `label` as a parent keep that reference, but
    /// the dangling parent never matches in hierarchy queries.
    pub fn remove(&mut self, label: &str) {
        let key = label_key(label);
        if key.is_empty() {
            return;
        }

        self.drop_extension_targets(&key);
        self.extensions.remove(&key);
        self.parents.remove(&key);
        self.entries.retain(|entry| label_key(&entry.label) != key);

        debug!(label, "removed type from registry");
    }

    /// Restore the built-in tables, discarding every customization.
    pub fn reset(&mut self) {
        *self = BUILTIN.clone();
        debug!("reset type registry to built-in tables");
    }

    fn drop_extension_targets(&mut self, key: &str) {
        self.by_extension.retain(|_, target| label_key(target) != key);
    }
}

/// Case-insensitive comparison key for a label.
#[inline]
pub(crate) fn label_key(label: &str) -> String {
    label.trim().to_ascii_lowercase()
}

/// Lowercase an extension and strip leading dots. `None` for empty input.
fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
