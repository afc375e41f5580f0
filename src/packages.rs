//! Package assignment
//!
//! Documents are grouped by shared directory ancestry of their URIs and each
//! group is mapped onto the base package plus the relative directory path
//! of the document, so `file:///a/x/one.xsd` and `file:///a/y/two.xsd` end
//! up in `models.x` and `models.y`.

use indexmap::IndexMap;
use tracing::debug;

use crate::aggregator::ClassMap;
use crate::models::codegen::Class;

/// Group that collects documents of the common schema directory
const COMMON_GROUP: usize = 0;

/// Path segments of a URI, empty segments dropped.
///
/// `file:///a/b.xsd` yields `["file:", "a", "b.xsd"]`.
fn segments(uri: &str) -> Vec<&str> {
    uri.split('/').filter(|s| !s.is_empty()).collect()
}

fn common_prefix<'a>(a: &[&'a str], b: &[&'a str]) -> Vec<&'a str> {
    a.iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| *x)
        .collect()
}

/// Whether two documents share no directory beyond the URI scheme
fn is_unrelated(common: &[&str]) -> bool {
    match common {
        [] => true,
        [scheme] => scheme.ends_with(':'),
        _ => false,
    }
}

fn parent<'a, 'b>(segments: &'b [&'a str]) -> &'b [&'a str] {
    match segments.split_last() {
        Some((_, parent)) => parent,
        None => segments,
    }
}

/// Group sorted document URIs by directory ancestry.
///
/// Documents under `common_dir` always go to group 0. Every other document
/// joins the current group when it shares a real directory with the
/// previous non-common document and opens a new group otherwise.
pub fn group_uris<'a, I>(uris: I, common_dir: Option<&str>) -> IndexMap<usize, Vec<String>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut sorted: Vec<&String> = uris.into_iter().collect();
    sorted.sort();

    let mut groups: IndexMap<usize, Vec<String>> = IndexMap::new();
    let mut index = COMMON_GROUP;
    let mut prev: Option<&String> = None;

    for uri in sorted {
        if common_dir.map_or(false, |dir| uri.starts_with(dir)) {
            groups.entry(COMMON_GROUP).or_default().push(uri.clone());
            continue;
        }

        let new_group = match prev {
            Some(prev) => is_unrelated(&common_prefix(&segments(prev), &segments(uri))),
            None => true,
        };
        if new_group {
            index += 1;
        }

        groups.entry(index).or_default().push(uri.clone());
        prev = Some(uri);
    }

    groups
}

/// Segments of the directory shared by every URI of a group
fn base_dir(uris: &[String]) -> Vec<&str> {
    match uris {
        [single] => parent(&segments(single)).to_vec(),
        _ => {
            let mut iter = uris.iter().map(|uri| segments(uri));
            let first = iter.next().unwrap_or_default();
            iter.fold(first, |acc, next| common_prefix(&acc, &next))
        }
    }
}

/// Dotted package of a document relative to its group's base directory
fn resolve_package(uri: &str, base: &[&str], base_package: &str) -> String {
    let segments = segments(uri);
    let suffix = parent(&segments)
        .strip_prefix(base)
        .map(|rest| rest.join("."))
        .unwrap_or_default();

    if suffix.is_empty() {
        base_package.to_string()
    } else {
        format!("{}.{}", base_package, suffix)
    }
}

/// Set the package of every class, recursively including inner classes
pub fn assign_package(classes: &mut [Class], package: &str) {
    for class in classes {
        class.package = Some(package.to_string());
        assign_package(&mut class.inner, package);
    }
}

/// Resolve and assign the package of every class in the map.
///
/// `common_dir` is the URI prefix of the common schema directory, if any.
pub fn assign_packages(class_map: &mut ClassMap, base_package: &str, common_dir: Option<&str>) {
    let groups = group_uris(class_map.keys(), common_dir);

    for (index, uris) in &groups {
        let base = base_dir(uris);
        for uri in uris {
            let package = resolve_package(uri, &base, base_package);
            debug!("Group {}: {} -> {}", index, uri, package);
            if let Some(classes) = class_map.get_mut(uri) {
                assign_package(classes, &package);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::codegen::Tag;
    use pretty_assertions::assert_eq;

    fn uris(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn packages(map: &ClassMap) -> Vec<(String, Option<String>)> {
        map.iter()
            .map(|(uri, classes)| (uri.clone(), classes[0].package.clone()))
            .collect()
    }

    fn map_of(values: &[&str]) -> ClassMap {
        let mut map = ClassMap::new();
        for uri in values {
            map.insert(*uri, vec![Class::new("T", Tag::ComplexType, true)]);
        }
        map
    }

    #[test]
    fn test_segments() {
        assert_eq!(segments("file:///a/b.xsd"), vec!["file:", "a", "b.xsd"]);
        assert_eq!(
            segments("http://example.com/s/x.xsd"),
            vec!["http:", "example.com", "s", "x.xsd"]
        );
    }

    #[test]
    fn test_group_by_ancestry() {
        let keys = uris(&[
            "http://example.com/b.xsd",
            "file:///a/y/two.xsd",
            "file:///a/x/one.xsd",
            "file:///z/three.xsd",
        ]);

        let groups = group_uris(&keys, None);
        let groups: Vec<_> = groups.into_iter().collect();
        assert_eq!(
            groups,
            vec![
                (1, uris(&["file:///a/x/one.xsd", "file:///a/y/two.xsd"])),
                (2, uris(&["file:///z/three.xsd"])),
                (3, uris(&["http://example.com/b.xsd"])),
            ]
        );
    }

    #[test]
    fn test_common_dir_is_group_zero() {
        let keys = uris(&[
            "file:///a/main.xsd",
            "file:///lib/common/xml.xsd",
            "file:///a/sub/types.xsd",
        ]);

        let groups = group_uris(&keys, Some("file:///lib/common/"));
        assert_eq!(groups[&0], uris(&["file:///lib/common/xml.xsd"]));
        assert_eq!(
            groups[&1],
            uris(&["file:///a/main.xsd", "file:///a/sub/types.xsd"])
        );
    }

    #[test]
    fn test_single_document() {
        let mut map = map_of(&["file:///a/b/c.xsd"]);
        assign_packages(&mut map, "models", None);
        assert_eq!(
            packages(&map),
            vec![("file:///a/b/c.xsd".to_string(), Some("models".to_string()))]
        );
    }

    #[test]
    fn test_shared_root() {
        let mut map = map_of(&["file:///a/x/one.xsd", "file:///a/y/two.xsd"]);
        assign_packages(&mut map, "models", None);
        assert_eq!(
            packages(&map),
            vec![
                ("file:///a/x/one.xsd".to_string(), Some("models.x".to_string())),
                ("file:///a/y/two.xsd".to_string(), Some("models.y".to_string())),
            ]
        );
    }

    #[test]
    fn test_nested_directories() {
        let mut map = map_of(&[
            "file:///a/main.xsd",
            "file:///a/common/types/base.xsd",
        ]);
        assign_packages(&mut map, "api", None);
        assert_eq!(
            packages(&map),
            vec![
                ("file:///a/main.xsd".to_string(), Some("api".to_string())),
                (
                    "file:///a/common/types/base.xsd".to_string(),
                    Some("api.common.types".to_string())
                ),
            ]
        );
    }

    #[test]
    fn test_assign_package_reaches_inner_classes() {
        let mut deep = Class::new("Deep", Tag::ComplexType, false);
        deep.inner.push(Class::new("Deeper", Tag::ComplexType, false));
        let mut outer = Class::new("Outer", Tag::ComplexType, true);
        outer.inner.push(deep);

        let mut classes = vec![outer];
        assign_package(&mut classes, "models.x");

        assert_eq!(classes[0].package.as_deref(), Some("models.x"));
        assert_eq!(classes[0].inner[0].package.as_deref(), Some("models.x"));
        assert_eq!(
            classes[0].inner[0].inner[0].package.as_deref(),
            Some("models.x")
        );
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut map = map_of(&["file:///a/x/one.xsd", "file:///a/y/two.xsd"]);
        assign_packages(&mut map, "models", None);
        let first = map.clone();
        assign_packages(&mut map, "models", None);
        assert_eq!(map, first);
    }
}
