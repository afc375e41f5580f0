//! Class analysis
//!
//! Simplifies the aggregated raw classes before they reach a writer. The
//! analyzer may merge or drop classes but never invents new ones.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use crate::models::codegen::{Attr, Class, Tag, UNBOUNDED};
use crate::names::local_part;

/// Structural simplification of an aggregated class list
pub trait Analyzer {
    /// Simplify `classes`; the result never holds more main or inner
    /// classes than the input
    fn process(&self, classes: Vec<Class>) -> Vec<Class>;
}

/// Default analyzer
///
/// - inlines `xs:group` and `xs:attributeGroup` references
/// - drops the auxiliary group classes afterwards
/// - removes duplicate classes by package, namespace and name
/// - merges repeated fields into a single list field
#[derive(Debug, Clone, Default)]
pub struct ClassAnalyzer;

impl ClassAnalyzer {
    /// Create the default analyzer
    pub fn new() -> Self {
        Self
    }
}

type GroupKey = (Tag, Option<String>, String);

fn group_key(class: &Class) -> Option<GroupKey> {
    match class.class_type {
        Tag::Group | Tag::AttributeGroup => Some((
            class.class_type,
            class.namespace.clone(),
            class.name.clone(),
        )),
        _ => None,
    }
}

struct Groups<'a> {
    definitions: IndexMap<GroupKey, &'a Class>,
}

impl<'a> Groups<'a> {
    fn new(classes: &'a [Class]) -> Self {
        let mut definitions = IndexMap::new();
        for class in classes {
            if let Some(key) = group_key(class) {
                definitions.entry(key).or_insert(class);
            }
        }
        Self { definitions }
    }

    /// Definition referenced by `attr`, preferring the referencing namespace
    fn lookup(&self, attr: &Attr, namespace: &Option<String>) -> Option<&'a Class> {
        let name = local_part(&attr.type_name).to_string();
        self.definitions
            .get(&(attr.local_type, namespace.clone(), name.clone()))
            .or_else(|| {
                self.definitions
                    .iter()
                    .find(|((tag, _, n), _)| *tag == attr.local_type && *n == name)
                    .map(|(_, class)| class)
            })
            .copied()
    }

    /// Replace group references by the fields they stand for
    fn expand(&self, attrs: &[Attr], namespace: &Option<String>, seen: &mut Vec<GroupKey>) -> Vec<Attr> {
        let mut out = Vec::with_capacity(attrs.len());

        for attr in attrs {
            if !matches!(attr.local_type, Tag::Group | Tag::AttributeGroup) {
                out.push(attr.clone());
                continue;
            }

            let Some(definition) = self.lookup(attr, namespace) else {
                debug!("Unresolved {} reference: {}", attr.local_type.cname(), attr.type_name);
                continue;
            };

            let key = (
                definition.class_type,
                definition.namespace.clone(),
                definition.name.clone(),
            );
            if seen.contains(&key) {
                debug!("Circular {} reference: {}", attr.local_type.cname(), attr.type_name);
                continue;
            }

            seen.push(key);
            let expanded = self.expand(&definition.attrs, &definition.namespace, seen);
            seen.pop();

            out.extend(expanded.into_iter().map(|mut member| {
                if attr.min_occurs == Some(0) {
                    member.min_occurs = Some(0);
                    member.required = None;
                }
                if attr.is_list() {
                    member.max_occurs = Some(UNBOUNDED);
                }
                member
            }));
        }

        out
    }

    fn flatten(&self, class: &mut Class) {
        let mut seen = Vec::new();
        class.attrs = self.expand(&class.attrs, &class.namespace, &mut seen);
        for inner in &mut class.inner {
            self.flatten(inner);
        }
    }
}

/// Merge repeated fields of the same name, kind and namespace into the
/// first occurrence, which becomes a list
fn merge_repeated(attrs: Vec<Attr>) -> Vec<Attr> {
    let mut merged: IndexMap<(String, Tag, Option<String>), Attr> = IndexMap::new();

    for attr in attrs {
        if attr.is_enumeration() {
            let key = (attr.name.clone(), attr.local_type, attr.default.clone());
            merged.entry(key).or_insert(attr);
            continue;
        }

        let key = (attr.name.clone(), attr.local_type, attr.namespace.clone());
        match merged.get_mut(&key) {
            Some(existing) => {
                existing.max_occurs = Some(UNBOUNDED);
                if attr.min_occurs == Some(0) {
                    existing.min_occurs = Some(0);
                    existing.required = None;
                }
            }
            None => {
                merged.insert(key, attr);
            }
        }
    }

    merged.into_values().collect()
}

fn simplify(class: &mut Class) {
    class.attrs = merge_repeated(std::mem::take(&mut class.attrs));
    for inner in &mut class.inner {
        simplify(inner);
    }
}

impl Analyzer for ClassAnalyzer {
    fn process(&self, classes: Vec<Class>) -> Vec<Class> {
        let groups = Groups::new(&classes);
        let mut flattened = Vec::with_capacity(classes.len());

        for class in classes.iter().filter(|c| group_key(c).is_none()) {
            let mut class = class.clone();
            groups.flatten(&mut class);
            flattened.push(class);
        }

        let mut seen = HashSet::new();
        let mut result = Vec::with_capacity(flattened.len());
        for mut class in flattened {
            let key = (
                class.package.clone(),
                class.namespace.clone(),
                class.name.clone(),
                class.class_type,
            );
            if !seen.insert(key) {
                debug!("Dropping duplicate class {}", class.name);
                continue;
            }
            simplify(&mut class);
            result.push(class);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::count_classes;
    use pretty_assertions::assert_eq;

    fn attr(name: &str, tag: Tag) -> Attr {
        Attr::new(name, "xs:string", tag)
    }

    fn group(name: &str, tag: Tag, attrs: Vec<Attr>) -> Class {
        Class {
            attrs,
            ..Class::new(name, tag, false)
        }
    }

    #[test]
    fn test_inlines_groups_and_drops_them() {
        let mut order = Class::new("Order", Tag::ComplexType, true);
        order.attrs.push(Attr {
            min_occurs: Some(0),
            ..Attr::new("Common", "tns:Common", Tag::Group)
        });
        order.attrs.push(Attr::new("Audit", "Audit", Tag::AttributeGroup));

        let classes = vec![
            order,
            group("Common", Tag::Group, vec![Attr {
                required: Some(true),
                ..attr("id", Tag::Element)
            }]),
            group("Audit", Tag::AttributeGroup, vec![attr("created", Tag::Attribute)]),
        ];

        let result = ClassAnalyzer::new().process(classes);

        assert_eq!(result.len(), 1);
        let names: Vec<_> = result[0].attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["id", "created"]);
        assert_eq!(result[0].attrs[0].min_occurs, Some(0));
        assert_eq!(result[0].attrs[0].required, None);
    }

    #[test]
    fn test_circular_groups_terminate() {
        let mut order = Class::new("Order", Tag::ComplexType, true);
        order.attrs.push(Attr::new("A", "A", Tag::Group));

        let classes = vec![
            order,
            group("A", Tag::Group, vec![attr("a", Tag::Element), Attr::new("B", "B", Tag::Group)]),
            group("B", Tag::Group, vec![attr("b", Tag::Element), Attr::new("A", "A", Tag::Group)]),
        ];

        let result = ClassAnalyzer::new().process(classes);
        let names: Vec<_> = result[0].attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_removes_duplicates() {
        let mut a = Class::new("Address", Tag::ComplexType, true);
        a.package = Some("models".to_string());
        let b = a.clone();
        let mut c = a.clone();
        c.package = Some("models.other".to_string());

        let result = ClassAnalyzer::new().process(vec![a, b, c]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_merges_repeated_fields() {
        let mut class = Class::new("Mixed", Tag::ComplexType, true);
        class.attrs.push(attr("item", Tag::Element));
        class.attrs.push(attr("note", Tag::Element));
        class.attrs.push(Attr {
            min_occurs: Some(0),
            ..attr("item", Tag::Element)
        });
        class.attrs.push(attr("item", Tag::Attribute));

        let result = ClassAnalyzer::new().process(vec![class]);
        let attrs = &result[0].attrs;

        assert_eq!(attrs.len(), 3);
        assert!(attrs[0].is_list());
        assert_eq!(attrs[0].min_occurs, Some(0));
        assert!(!attrs[2].is_list());
    }

    #[test]
    fn test_never_increases_counts() {
        let mut outer = Class::new("Outer", Tag::ComplexType, true);
        outer.inner.push(Class::new("Inner", Tag::ComplexType, false));
        let classes = vec![
            outer.clone(),
            outer,
            group("G", Tag::Group, vec![attr("x", Tag::Element)]),
        ];

        let (main_in, inner_in) = count_classes(&classes);
        let result = ClassAnalyzer::new().process(classes);
        let (main_out, inner_out) = count_classes(&result);

        assert!(main_out <= main_in);
        assert!(inner_out <= inner_in);
        assert_eq!((main_out, inner_out), (1, 1));
    }
}
