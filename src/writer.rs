//! Code writers
//!
//! A [`CodeWriter`] dispatches to the [`Generator`] registered for an
//! output format. Generators only render; naming and file placement are
//! shared by all formats.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::codegen::{Attr, Class, Package, RestrictionValue, Tag};
use crate::names::{local_part, to_pascal_case, to_snake_case};

/// A rendered output file, relative to the output directory
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Renders designated classes in one output format
pub trait Generator {
    /// File extension of rendered modules
    fn extension(&self) -> &str;

    /// Name used by generated code for a class
    fn class_name(&self, name: &str) -> String {
        to_pascal_case(name)
    }

    /// Name used by generated code for a field
    fn attr_name(&self, name: &str) -> String {
        to_snake_case(name)
    }

    /// Render the classes of one package
    fn render_module(&self, package: &str, imports: &[Package], classes: &[&Class]) -> Result<String>;
}

/// JSON rendering of the class model
#[derive(Debug, Clone, Default)]
pub struct JsonGenerator;

#[derive(Serialize)]
struct JsonModule<'a> {
    package: &'a str,
    imports: &'a [Package],
    classes: Vec<JsonClass<'a>>,
}

#[derive(Serialize)]
struct JsonClass<'a> {
    name: &'a str,
    qname: String,
    #[serde(rename = "type")]
    class_type: Tag,
    is_root: bool,
    is_enumeration: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<&'a str>,
    extensions: &'a [String],
    attrs: Vec<JsonAttr<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    inner: Vec<JsonClass<'a>>,
}

#[derive(Serialize)]
struct JsonAttr<'a> {
    name: &'a str,
    local_name: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    local_type: Tag,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    forward_ref: bool,
    is_list: bool,
    restrictions: IndexMap<&'static str, RestrictionValue>,
}

impl<'a> JsonClass<'a> {
    fn new(class: &'a Class) -> Self {
        let qname = match &class.namespace {
            Some(ns) => format!("{{{}}}{}", ns, class.name),
            None => class.name.clone(),
        };

        Self {
            name: &class.local_name,
            qname,
            class_type: class.class_type,
            is_root: class.is_root,
            is_enumeration: class.is_enumeration(),
            help: class.help.as_deref(),
            extensions: &class.extensions,
            attrs: class.attrs.iter().map(JsonAttr::new).collect(),
            inner: class.inner.iter().map(JsonClass::new).collect(),
        }
    }
}

impl<'a> JsonAttr<'a> {
    fn new(attr: &'a Attr) -> Self {
        Self {
            name: &attr.name,
            local_name: &attr.local_name,
            type_name: attr.type_alias.as_deref().unwrap_or(&attr.type_name),
            local_type: attr.local_type,
            namespace: attr.namespace.as_deref(),
            default: attr.default.as_deref(),
            forward_ref: attr.forward_ref,
            is_list: attr.is_list(),
            restrictions: attr.restrictions(),
        }
    }
}

impl Generator for JsonGenerator {
    fn extension(&self) -> &str {
        "json"
    }

    fn render_module(&self, package: &str, imports: &[Package], classes: &[&Class]) -> Result<String> {
        let module = JsonModule {
            package,
            imports,
            classes: classes.iter().map(|c| JsonClass::new(c)).collect(),
        };
        let mut content = serde_json::to_string_pretty(&module)?;
        content.push('\n');
        Ok(content)
    }
}

/// Format registry and output driver
pub struct CodeWriter {
    generators: IndexMap<String, Box<dyn Generator>>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for CodeWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeWriter")
            .field("formats", &self.generators.keys().collect::<Vec<_>>())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    /// Create a writer with the built-in formats
    pub fn new() -> Self {
        let mut writer = Self {
            generators: IndexMap::new(),
            output_dir: PathBuf::from("."),
        };
        writer.register("json", JsonGenerator);
        writer
    }

    /// Set the directory files are written to
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Register a generator under a format id
    pub fn register(&mut self, format: impl Into<String>, generator: impl Generator + 'static) {
        self.generators.insert(format.into(), Box::new(generator));
    }

    /// Registered format ids
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(|k| k.as_str())
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generator for `format`, or a configuration error
    pub fn generator(&self, format: &str) -> Result<&dyn Generator> {
        self.generators
            .get(format)
            .map(|g| g.as_ref())
            .ok_or_else(|| {
                Error::Config(format!(
                    "Unknown output format '{}', expected one of: {}",
                    format,
                    self.formats().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Assign the names generated code uses.
    ///
    /// Class names are unique per package and field names unique per class;
    /// collisions get a numeric suffix.
    pub fn designate(&self, classes: &mut [Class], format: &str) -> Result<()> {
        let generator = self.generator(format)?;
        let mut taken: HashMap<Option<String>, IndexSet<String>> = HashMap::new();

        for class in classes.iter_mut() {
            let names = taken.entry(class.package.clone()).or_default();
            designate_class(generator, class, names);
        }
        Ok(())
    }

    /// Render every package into files, without touching the disk
    pub fn render(&self, classes: &[Class], format: &str) -> Result<Vec<GeneratedFile>> {
        let generator = self.generator(format)?;
        let modules = group_by_package(classes);
        let index = type_index(classes);

        let mut files = Vec::with_capacity(modules.len());
        for (package, members) in &modules {
            let imports = collect_imports(package, members, &index);
            let content = generator.render_module(package, &imports, members)?;
            let mut path: PathBuf = package.split('.').collect();
            path.set_extension(generator.extension());
            files.push(GeneratedFile { path, content });
        }
        Ok(files)
    }

    /// Write every package under the output directory
    pub fn write(&self, classes: &[Class], format: &str) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for file in self.render(classes, format)? {
            let target = self.output_dir.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.content)?;
            info!("Generating package: {}", file.path.display());
            written.push(target);
        }
        Ok(written)
    }

    /// Print every package to stdout
    pub fn print(&self, classes: &[Class], format: &str) -> Result<()> {
        let stdout = io::stdout();
        self.print_to(&mut stdout.lock(), classes, format)
    }

    /// Print every package to `out`
    pub fn print_to<W: Write>(&self, out: &mut W, classes: &[Class], format: &str) -> Result<()> {
        for file in self.render(classes, format)? {
            out.write_all(file.content.as_bytes())?;
        }
        Ok(())
    }
}

fn unique(name: String, taken: &mut IndexSet<String>) -> String {
    let mut candidate = name.clone();
    let mut counter = 1;
    while taken.contains(&candidate) {
        candidate = format!("{}_{}", name, counter);
        counter += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn designate_class(generator: &dyn Generator, class: &mut Class, taken: &mut IndexSet<String>) {
    class.local_name = unique(generator.class_name(&class.name), taken);

    let mut fields = IndexSet::new();
    for attr in &mut class.attrs {
        let name = if attr.is_enumeration() {
            generator.attr_name(&attr.name).to_uppercase()
        } else {
            generator.attr_name(&attr.name)
        };
        attr.local_name = unique(name, &mut fields);
    }

    let mut inner_names = IndexSet::new();
    for inner in &mut class.inner {
        designate_class(generator, inner, &mut inner_names);
    }
}

fn group_by_package(classes: &[Class]) -> IndexMap<String, Vec<&Class>> {
    let mut modules: IndexMap<String, Vec<&Class>> = IndexMap::new();
    for class in classes {
        let package = class.package.clone().unwrap_or_default();
        modules.entry(package).or_default().push(class);
    }
    modules
}

/// Declared class name to (package, generated name)
fn type_index(classes: &[Class]) -> HashMap<&str, (&str, &str)> {
    let mut index = HashMap::new();
    for class in classes {
        if let Some(package) = class.package.as_deref() {
            index
                .entry(class.name.as_str())
                .or_insert((package, class.local_name.as_str()));
        }
    }
    index
}

fn referenced_types<'a>(class: &'a Class, out: &mut Vec<&'a str>) {
    out.extend(class.extensions.iter().map(|e| local_part(e)));
    out.extend(
        class
            .attrs
            .iter()
            .filter(|a| !a.forward_ref)
            .flat_map(|a| a.type_name.split_whitespace())
            .map(local_part),
    );
    for inner in &class.inner {
        referenced_types(inner, out);
    }
}

fn collect_imports(
    package: &str,
    members: &[&Class],
    index: &HashMap<&str, (&str, &str)>,
) -> Vec<Package> {
    let mut types = Vec::new();
    for class in members {
        referenced_types(class, &mut types);
    }

    let local: IndexSet<&str> = members.iter().map(|c| c.local_name.as_str()).collect();
    let mut imports: IndexSet<Package> = IndexSet::new();

    for name in types {
        let Some((source_package, source)) = index.get(name) else {
            continue;
        };
        if *source_package == package {
            continue;
        }
        imports.insert(Package {
            name: source_package.to_string(),
            source: source.to_string(),
            alias: None,
        });
    }

    let mut sources: HashMap<String, usize> = HashMap::new();
    for import in &imports {
        *sources.entry(import.source.clone()).or_default() += 1;
    }

    imports
        .into_iter()
        .map(|mut import| {
            if sources[&import.source] > 1 || local.contains(import.source.as_str()) {
                let prefix = import.name.rsplit('.').next().unwrap_or(&import.name);
                import.alias = Some(format!("{}{}", to_pascal_case(prefix), import.source));
            }
            import
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn class(name: &str, package: &str) -> Class {
        Class {
            package: Some(package.to_string()),
            ..Class::new(name, Tag::ComplexType, true)
        }
    }

    #[test]
    fn test_unknown_format_is_config_error() {
        let writer = CodeWriter::new();
        let result = writer.designate(&mut [], "cobol");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_designate_names() {
        let mut order = class("purchase-order", "models");
        order.attrs.push(Attr::new("orderDate", "xs:date", Tag::Element));
        order.attrs.push(Attr::new("order_date", "xs:date", Tag::Attribute));
        let mut classes = vec![order, class("PurchaseOrder", "models"), class("PurchaseOrder", "other")];

        CodeWriter::new().designate(&mut classes, "json").unwrap();

        assert_eq!(classes[0].local_name, "PurchaseOrder");
        assert_eq!(classes[1].local_name, "PurchaseOrder_1");
        assert_eq!(classes[2].local_name, "PurchaseOrder");
        assert_eq!(classes[0].attrs[0].local_name, "order_date");
        assert_eq!(classes[0].attrs[1].local_name, "order_date_1");
    }

    #[test]
    fn test_render_one_file_per_package_with_imports() {
        let mut order = class("Order", "models");
        order.attrs.push(Attr::new("shipTo", "tns:Address", Tag::Element));
        let mut classes = vec![order, class("Address", "models.common")];

        let writer = CodeWriter::new();
        writer.designate(&mut classes, "json").unwrap();
        let files = writer.render(&classes, "json").unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("models.json"), PathBuf::from("models/common.json")]
        );

        let module: serde_json::Value = serde_json::from_str(&files[0].content).unwrap();
        assert_eq!(module["package"], "models");
        assert_eq!(module["imports"][0]["name"], "models.common");
        assert_eq!(module["imports"][0]["source"], "Address");
        assert_eq!(module["classes"][0]["attrs"][0]["local_name"], "ship_to");
        assert_eq!(
            module["classes"][0]["attrs"][0]["restrictions"],
            serde_json::json!({})
        );
    }

    #[test]
    fn test_write_creates_package_directories() {
        let dir = TempDir::new().unwrap();
        let writer = CodeWriter::new().with_output_dir(dir.path());
        let classes = vec![class("A", "models.x"), class("B", "models.y")];

        let written = writer.write(&classes, "json").unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.path().join("models/x.json").exists());
        assert!(dir.path().join("models/y.json").exists());
    }

    #[test]
    fn test_print_to_buffer() {
        let mut out = Vec::new();
        CodeWriter::new()
            .print_to(&mut out, &[class("A", "models")], "json")
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"package\": \"models\""));
    }
}
