//! Type hierarchy queries.
//!
//! The [`TypeResolver`] answers "is this label a kind of that label?" using
//! the registry's parent facet, and reduces several candidate labels to the
//! most specific one.

use std::collections::HashSet;

use smallvec::SmallVec;

use crate::registry::{TypeRegistry, label_key};

/// Hierarchy queries over a borrowed [`TypeRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> TypeResolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Whether `candidate` is `ancestor` or descends from it.
    ///
    /// Labels are compared ignoring ASCII case, so every label is a child of
    /// itself whether or not it is registered. Otherwise the registered
    /// parents of `candidate` are searched depth first. A parent reference to
    /// a label the registry no longer knows is dangling and never matches. A
    /// label reached twice on one path (a cyclic parent registration) ends
    /// that path with `false`. Empty input on either side is never a match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typesniff::{TypeRegistry, TypeResolver};
    ///
    /// let registry = TypeRegistry::new();
    /// let resolver = TypeResolver::new(&registry);
    ///
    /// assert!(resolver.is_child_of("image/svg+xml", "application/xml"));
    /// assert!(resolver.is_child_of("image/svg+xml", "text/plain"));
    /// assert!(!resolver.is_child_of("application/xml", "image/svg+xml"));
    /// ```
    pub fn is_child_of(&self, candidate: &str, ancestor: &str) -> bool {
        let candidate = label_key(candidate);
        let ancestor = label_key(ancestor);
        if candidate.is_empty() || ancestor.is_empty() {
            return false;
        }

        let mut path = HashSet::new();
        self.descends(&candidate, &ancestor, &mut path)
    }

    fn descends(&self, candidate: &str, ancestor: &str, path: &mut HashSet<String>) -> bool {
        if candidate == ancestor {
            return true;
        }
        if !path.insert(candidate.to_string()) {
            return false;
        }

        let found = self
            .registry
            .parents_of(candidate)
            .iter()
            .filter(|parent| self.registry.contains(parent))
            .map(|parent| label_key(parent))
            .any(|parent| self.descends(&parent, ancestor, path));

        path.remove(candidate);
        found
    }

    /// Reduce candidate labels to the most specific one.
    ///
    /// Empty entries and case-insensitive duplicates are dropped, keeping the
    /// first spelling. The rest are folded left to right: a later candidate
    /// replaces the running result only when it is a child of it.
    ///
    /// The fold is order dependent. With unrelated candidates the first one
    /// wins, and a descendant listed *before* its ancestor is kept rather than
    /// replaced. Callers pass signals in precedence order: content first, then
    /// the declared type, then the extension.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typesniff::{TypeRegistry, TypeResolver};
    ///
    /// let registry = TypeRegistry::new();
    /// let resolver = TypeResolver::new(&registry);
    ///
    /// let best = resolver.most_specific([
    ///     Some("application/x-ole-storage"),
    ///     None,
    ///     Some("application/msword"),
    /// ]);
    /// assert_eq!(best, Some("application/msword"));
    /// ```
    pub fn most_specific<'a, I>(&self, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut seen: SmallVec<[String; 4]> = SmallVec::new();
        let mut unique: SmallVec<[&'a str; 4]> = SmallVec::new();

        for candidate in candidates.into_iter().flatten() {
            let key = label_key(candidate);
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            seen.push(key);
            unique.push(candidate);
        }

        let (&first, rest) = unique.split_first()?;
        Some(rest.iter().fold(first, |running, &candidate| {
            if self.is_child_of(candidate, running) {
                candidate
            } else {
                running
            }
        }))
    }
}
