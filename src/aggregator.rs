//! Class aggregation
//!
//! The keyed class map collects the raw classes of every resolved document
//! under the document's canonical URI.

use indexmap::IndexMap;

use crate::models::codegen::Class;

/// Count `(main, inner)` classes.
///
/// `main` is the length of the list, `inner` the recursive total of every
/// nested class below it.
pub fn count_classes(classes: &[Class]) -> (usize, usize) {
    let inner = classes
        .iter()
        .map(|class| {
            let (main, inner) = count_classes(&class.inner);
            main + inner
        })
        .sum();

    (classes.len(), inner)
}

/// Raw classes keyed by document URI, in resolution order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMap {
    classes: IndexMap<String, Vec<Class>>,
}

impl ClassMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the classes of a document.
    ///
    /// Several inline schemas of one WSDL document share its URI, so classes
    /// for an existing key are appended rather than replaced.
    pub fn insert(&mut self, uri: impl Into<String>, classes: Vec<Class>) {
        self.classes.entry(uri.into()).or_default().extend(classes);
    }

    /// Classes of one document
    pub fn get(&self, uri: &str) -> Option<&[Class]> {
        self.classes.get(uri).map(|v| v.as_slice())
    }

    /// Mutable classes of one document
    pub fn get_mut(&mut self, uri: &str) -> Option<&mut Vec<Class>> {
        self.classes.get_mut(uri)
    }

    /// Whether the document has been recorded
    pub fn contains(&self, uri: &str) -> bool {
        self.classes.contains_key(uri)
    }

    /// Document URIs
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.classes.keys()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no document has been recorded
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over documents and their classes
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Class>)> {
        self.classes.iter()
    }

    /// Every class of every document, in resolution order
    pub fn all_classes(&self) -> Vec<Class> {
        self.classes.values().flatten().cloned().collect()
    }

    /// `(main, inner)` counts across all documents
    pub fn count(&self) -> (usize, usize) {
        self.classes
            .values()
            .map(|classes| count_classes(classes))
            .fold((0, 0), |(m, i), (main, inner)| (m + main, i + inner))
    }
}
