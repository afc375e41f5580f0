//! Schema transformer
//!
//! Drives a generation run: walks the document graph reachable from the
//! entry points, builds the raw classes of every unique schema document,
//! assigns packages, hands the corpus to the analyzer and finally to the
//! code writer.
//!
//! Schema documents are best effort. A document that cannot be fetched or
//! parsed is logged and contributes no classes. A WSDL root that cannot be
//! read aborts the run.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::aggregator::{count_classes, ClassMap};
use crate::analyzer::{Analyzer, ClassAnalyzer};
use crate::builder::ClassBuilder;
use crate::catalog::XmlCatalog;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::loaders::{Fetcher, Loader};
use crate::locations::{file_name, LocationResolver};
use crate::models::codegen::Class;
use crate::models::wsdl::Definitions;
use crate::models::xsd::Schema;
use crate::packages::assign_packages;
use crate::parser::{DefinitionsParser, SchemaParser};
use crate::writer::CodeWriter;

/// Resolves, compiles and writes one run's worth of documents
pub struct SchemaTransformer {
    config: GeneratorConfig,
    fetcher: Box<dyn Fetcher>,
    resolver: LocationResolver,
    analyzer: Box<dyn Analyzer>,
    writer: CodeWriter,
    class_map: ClassMap,
    processed: HashSet<String>,
    processed_definitions: HashSet<String>,
}

impl std::fmt::Debug for SchemaTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaTransformer")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("writer", &self.writer)
            .field("documents", &self.class_map.len())
            .finish()
    }
}

impl SchemaTransformer {
    /// Create a transformer reading from disk (and the network with the
    /// `remote` feature).
    ///
    /// The configuration is validated here, before anything is fetched.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let writer = CodeWriter::new().with_output_dir(config.output_dir.clone());
        writer.generator(&config.output)?;

        let resolver = match &config.catalog {
            Some(path) => LocationResolver::new().with_catalog(XmlCatalog::from_file(path)?),
            None => LocationResolver::new(),
        };

        let fetcher = Loader::new().with_limits(config.limits.clone());

        Ok(Self {
            config,
            fetcher: Box::new(fetcher),
            resolver,
            analyzer: Box::new(ClassAnalyzer::new()),
            writer,
            class_map: ClassMap::new(),
            processed: HashSet::new(),
            processed_definitions: HashSet::new(),
        })
    }

    /// Read documents through `fetcher`
    pub fn with_fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Box::new(fetcher);
        self
    }

    /// Simplify classes with `analyzer`
    pub fn with_analyzer(mut self, analyzer: impl Analyzer + 'static) -> Self {
        self.analyzer = Box::new(analyzer);
        self
    }

    /// Render classes with `writer`
    pub fn with_writer(mut self, writer: CodeWriter) -> Result<Self> {
        writer.generator(&self.config.output)?;
        self.writer = writer;
        Ok(self)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Classes resolved so far, keyed by document URI
    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }

    /// Generate code for a list of schema documents
    pub fn process_schemas(&mut self, uris: &[String]) -> Result<Vec<Class>> {
        self.resolve_schemas(uris)?;
        self.process_classes()
    }

    /// Generate code for the inline schemas of a WSDL document
    pub fn process_definitions(&mut self, uri: &str) -> Result<Vec<Class>> {
        self.resolve_definitions(uri)?;
        self.process_classes()
    }

    /// Resolve every schema reachable from `uris` into the class map
    pub fn resolve_schemas(&mut self, uris: &[String]) -> Result<()> {
        for uri in uris {
            self.process_schema(uri, None, 0)?;
        }
        Ok(())
    }

    /// Parse a WSDL document with its imports and resolve its inline
    /// schemas into the class map
    pub fn resolve_definitions(&mut self, uri: &str) -> Result<()> {
        self.processed_definitions.clear();
        let definitions = self
            .parse_definitions(uri, None, 0)
            .ok_or_else(|| Error::Generation(format!("Definitions not found {}", uri)))?;

        let schemas = definitions.types.map(|t| t.schemas).unwrap_or_default();
        for schema in schemas {
            self.convert_schema(schema, 1)?;
        }
        Ok(())
    }

    /// Process a schema document once, including everything it references
    pub fn process_schema(&mut self, uri: &str, namespace: Option<&str>, depth: usize) -> Result<()> {
        if self.processed.contains(uri) {
            debug!("Already processed skipping: {}", uri);
            return Ok(());
        }

        // A document reached too deep stays unmarked for shallower paths.
        if let Err(e) = self.config.limits.check_include_depth(depth) {
            warn!("Skipping {}: {}", uri, e);
            return Ok(());
        }
        self.processed.insert(uri.to_string());

        info!("Parsing schema {}", file_name(uri));
        match self.parse_schema(uri, namespace) {
            Some(schema) => self.convert_schema(schema, depth),
            None => Ok(()),
        }
    }

    /// Resolve the documents `schema` references, then record its classes.
    ///
    /// Every referenced document without a target namespace of its own
    /// adopts the referencing schema's, whatever the edge kind.
    pub fn convert_schema(&mut self, schema: Schema, depth: usize) -> Result<()> {
        for reference in schema.included() {
            let Some(location) = reference.location.as_deref() else {
                continue;
            };
            self.process_schema(location, schema.target_namespace.as_deref(), depth + 1)?;
        }

        let location = schema
            .location
            .clone()
            .ok_or_else(|| Error::Generation("Schema location is not set".to_string()))?;
        let classes = self.generate_classes(&schema);
        self.class_map.insert(location, classes);
        Ok(())
    }

    /// Build the raw classes of one schema document
    pub fn generate_classes(&self, schema: &Schema) -> Vec<Class> {
        let location = schema.location.as_deref().unwrap_or_default();
        info!("Compiling schema {}", file_name(location));

        let classes = ClassBuilder::new(schema).build();
        let (main, inner) = count_classes(&classes);
        info!("Builder: {} main and {} inner classes", main, inner);

        classes
    }

    /// Fetch and parse a schema document; failures are logged, not raised
    pub fn parse_schema(&self, uri: &str, namespace: Option<&str>) -> Option<Schema> {
        let input = match self.fetcher.fetch(uri) {
            Ok(input) => input,
            Err(e) => {
                warn!("Schema not found {}: {}", uri, e);
                return None;
            }
        };

        SchemaParser::new(Some(uri.to_string()))
            .with_target_namespace(namespace.map(str::to_string))
            .with_resolver(self.resolver.clone())
            .parse(&input)
            .map_err(|e| warn!("Schema not parsed {}: {}", uri, e))
            .ok()
    }

    /// Fetch and parse a WSDL document, merging its imports into it.
    ///
    /// Documents already merged in this run are skipped, which keeps
    /// cyclic and diamond import graphs finite.
    pub fn parse_definitions(
        &mut self,
        uri: &str,
        namespace: Option<&str>,
        depth: usize,
    ) -> Option<Definitions> {
        if self.processed_definitions.contains(uri) {
            debug!("Already merged definitions skipping: {}", uri);
            return None;
        }

        if let Err(e) = self.config.limits.check_include_depth(depth) {
            warn!("Skipping {}: {}", uri, e);
            return None;
        }
        self.processed_definitions.insert(uri.to_string());

        info!("Parsing definitions {}", file_name(uri));
        let input = match self.fetcher.fetch(uri) {
            Ok(input) => input,
            Err(e) => {
                warn!("Definitions not found {}: {}", uri, e);
                return None;
            }
        };

        let mut definitions = DefinitionsParser::new(Some(uri.to_string()))
            .with_target_namespace(namespace.map(str::to_string))
            .with_resolver(self.resolver.clone())
            .parse(&input)
            .map_err(|e| warn!("Definitions not parsed {}: {}", uri, e))
            .ok()?;

        let imports = std::mem::take(&mut definitions.imports);
        for import in &imports {
            let Some(location) = import.location.as_deref() else {
                continue;
            };

            let target_namespace = definitions.target_namespace.clone();
            if let Some(sub) = self.parse_definitions(location, target_namespace.as_deref(), depth + 1) {
                definitions.merge(sub);
            }
        }
        definitions.imports = imports;

        Some(definitions)
    }

    /// Assign packages, analyze and designate the resolved classes
    pub fn compile(&mut self) -> Result<Vec<Class>> {
        let (main, inner) = self.class_map.count();
        if main == 0 {
            warn!("Analyzer returned zero classes!");
            return Ok(Vec::new());
        }
        info!("Analyzer input: {} main and {} inner classes", main, inner);

        let common_dir = self.config.common_schema_uri()?;
        assign_packages(&mut self.class_map, &self.config.package, common_dir.as_deref());

        let mut classes = self.analyzer.process(self.class_map.all_classes());
        let (main, inner) = count_classes(&classes);
        info!("Analyzer output: {} main and {} inner classes", main, inner);

        self.writer.designate(&mut classes, &self.config.output)?;
        Ok(classes)
    }

    /// Compile the resolved classes and write or print them
    pub fn process_classes(&mut self) -> Result<Vec<Class>> {
        let classes = self.compile()?;
        if classes.is_empty() {
            return Ok(classes);
        }

        if self.config.print {
            self.writer.print(&classes, &self.config.output)?;
        } else {
            let files = self.writer.write(&classes, &self.config.output)?;
            info!("Generated {} files", files.len());
        }

        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::MemoryLoader;
    use crate::limits::Limits;
    use crate::models::codegen::Tag;

    const XS: &str = r#"xmlns:xs="http://www.w3.org/2001/XMLSchema""#;

    fn schema(attrs: &str, body: &str) -> String {
        format!("<xs:schema {} {}>{}</xs:schema>", XS, attrs, body)
    }

    fn transformer(loader: MemoryLoader) -> SchemaTransformer {
        SchemaTransformer::new(GeneratorConfig::new("models"))
            .unwrap()
            .with_fetcher(loader)
    }

    fn names(classes: &[Class]) -> Vec<&str> {
        classes.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_dependencies_are_keyed_first() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///s/main.xsd",
                schema(
                    r#"targetNamespace="urn:main""#,
                    r#"<xs:include schemaLocation="types.xsd"/><xs:element name="root" type="T"/>"#,
                ),
            )
            .with_document(
                "file:///s/types.xsd",
                schema("", r#"<xs:complexType name="T"/>"#),
            );

        let mut t = transformer(loader);
        t.resolve_schemas(&["file:///s/main.xsd".to_string()]).unwrap();

        let keys: Vec<_> = t.class_map().keys().cloned().collect();
        assert_eq!(keys, vec!["file:///s/types.xsd", "file:///s/main.xsd"]);

        let types = t.class_map().get("file:///s/types.xsd").unwrap();
        assert_eq!(types[0].namespace.as_deref(), Some("urn:main"));
    }

    #[test]
    fn test_import_inherits_namespace() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///s/main.xsd",
                schema(
                    r#"targetNamespace="urn:main""#,
                    r#"<xs:import schemaLocation="ext.xsd"/><xs:import namespace="urn:own" schemaLocation="own.xsd"/>"#,
                ),
            )
            .with_document("file:///s/ext.xsd", schema("", r#"<xs:complexType name="E"/>"#))
            .with_document(
                "file:///s/own.xsd",
                schema(r#"targetNamespace="urn:own""#, r#"<xs:complexType name="O"/>"#),
            );

        let mut t = transformer(loader);
        t.resolve_schemas(&["file:///s/main.xsd".to_string()]).unwrap();

        let ext = t.class_map().get("file:///s/ext.xsd").unwrap();
        assert_eq!(ext[0].namespace.as_deref(), Some("urn:main"));
        let own = t.class_map().get("file:///s/own.xsd").unwrap();
        assert_eq!(own[0].namespace.as_deref(), Some("urn:own"));
    }

    #[test]
    fn test_cycles_are_processed_once() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///s/a.xsd",
                schema("", r#"<xs:include schemaLocation="b.xsd"/><xs:complexType name="A"/>"#),
            )
            .with_document(
                "file:///s/b.xsd",
                schema("", r#"<xs:include schemaLocation="a.xsd"/><xs:complexType name="B"/>"#),
            );

        let mut t = transformer(loader);
        let uri = "file:///s/a.xsd".to_string();
        t.resolve_schemas(&[uri.clone(), uri]).unwrap();

        assert_eq!(t.class_map().len(), 2);
        assert_eq!(t.class_map().count(), (2, 0));
    }

    #[test]
    fn test_missing_schema_is_not_fatal() {
        let loader = MemoryLoader::new().with_document(
            "file:///s/a.xsd",
            schema("", r#"<xs:include schemaLocation="gone.xsd"/><xs:complexType name="A"/>"#),
        );

        let mut t = transformer(loader);
        t.resolve_schemas(&["file:///s/a.xsd".to_string(), "file:///s/nope.xsd".to_string()])
            .unwrap();

        assert_eq!(t.class_map().len(), 1);
    }

    #[test]
    fn test_include_depth_limit() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///s/a.xsd",
                schema("", r#"<xs:include schemaLocation="b.xsd"/><xs:complexType name="A"/>"#),
            )
            .with_document(
                "file:///s/b.xsd",
                schema("", r#"<xs:include schemaLocation="c.xsd"/><xs:complexType name="B"/>"#),
            )
            .with_document("file:///s/c.xsd", schema("", r#"<xs:complexType name="C"/>"#));

        let config = GeneratorConfig::new("models").with_limits(Limits {
            max_include_depth: 1,
            ..Limits::default()
        });
        let mut t = SchemaTransformer::new(config).unwrap().with_fetcher(loader);
        t.resolve_schemas(&["file:///s/a.xsd".to_string()]).unwrap();

        assert!(!t.class_map().contains("file:///s/c.xsd"));
        assert_eq!(t.class_map().len(), 2);
    }

    #[test]
    fn test_too_deep_document_is_kept_as_entry_point() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///s/a.xsd",
                schema("", r#"<xs:include schemaLocation="b.xsd"/><xs:complexType name="A"/>"#),
            )
            .with_document(
                "file:///s/b.xsd",
                schema("", r#"<xs:include schemaLocation="c.xsd"/><xs:complexType name="B"/>"#),
            )
            .with_document("file:///s/c.xsd", schema("", r#"<xs:complexType name="C"/>"#));

        let config = GeneratorConfig::new("models").with_limits(Limits {
            max_include_depth: 1,
            ..Limits::default()
        });
        let mut t = SchemaTransformer::new(config).unwrap().with_fetcher(loader);
        t.resolve_schemas(&["file:///s/a.xsd".to_string(), "file:///s/c.xsd".to_string()])
            .unwrap();

        let keys: Vec<_> = t.class_map().keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["file:///s/b.xsd", "file:///s/a.xsd", "file:///s/c.xsd"]
        );
        assert_eq!(names(t.class_map().get("file:///s/c.xsd").unwrap()), vec!["C"]);
    }

    #[test]
    fn test_wsdl_root_failure_is_fatal() {
        let mut t = transformer(MemoryLoader::new());
        let result = t.resolve_definitions("file:///svc/missing.wsdl");

        assert!(matches!(result, Err(Error::Generation(_))));
        assert!(t.class_map().is_empty());
    }

    #[test]
    fn test_wsdl_inline_schemas_share_one_key() {
        let wsdl = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" {xs} targetNamespace="urn:svc">
  <types>
    <xs:schema targetNamespace="urn:a"><xs:element name="A" type="xs:string"/></xs:schema>
    <xs:schema targetNamespace="urn:b"><xs:element name="B" type="xs:string"/></xs:schema>
  </types>
</definitions>"#,
            xs = XS
        );
        let loader = MemoryLoader::new().with_document("file:///svc/service.wsdl", wsdl);

        let mut t = transformer(loader);
        t.resolve_definitions("file:///svc/service.wsdl").unwrap();

        let classes = t.class_map().get("file:///svc/service.wsdl").unwrap();
        assert_eq!(names(classes), vec!["A", "B"]);
    }

    #[test]
    fn test_wsdl_can_be_resolved_twice() {
        let wsdl = format!(
            r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/" {xs}>
  <types><xs:schema><xs:element name="A" type="xs:string"/></xs:schema></types>
</definitions>"#,
            xs = XS
        );
        let loader = MemoryLoader::new().with_document("file:///svc/service.wsdl", wsdl);

        let mut t = transformer(loader);
        t.resolve_definitions("file:///svc/service.wsdl").unwrap();
        t.resolve_definitions("file:///svc/service.wsdl").unwrap();

        assert!(t.class_map().contains("file:///svc/service.wsdl"));
    }

    #[test]
    fn test_wsdl_import_cycle_terminates() {
        let root = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/">
  <import location="other.wsdl"/><message name="m1"/>
</definitions>"#;
        let other = r#"<definitions xmlns="http://schemas.xmlsoap.org/wsdl/">
  <import location="root.wsdl"/><message name="m2"/>
</definitions>"#;
        let loader = MemoryLoader::new()
            .with_document("file:///svc/root.wsdl", root)
            .with_document("file:///svc/other.wsdl", other);

        let mut t = transformer(loader);
        let definitions = t.parse_definitions("file:///svc/root.wsdl", None, 0).unwrap();

        let messages: Vec<_> = definitions
            .messages
            .iter()
            .filter_map(|m| m.name.as_deref())
            .collect();
        assert_eq!(messages, vec!["m1", "m2"]);
    }

    #[test]
    fn test_compile_assigns_packages() {
        let loader = MemoryLoader::new()
            .with_document(
                "file:///a/x/one.xsd",
                schema("", r#"<xs:import schemaLocation="../y/two.xsd"/><xs:complexType name="One"/>"#),
            )
            .with_document("file:///a/y/two.xsd", schema("", r#"<xs:complexType name="Two"/>"#));

        let mut t = transformer(loader);
        t.resolve_schemas(&["file:///a/x/one.xsd".to_string()]).unwrap();
        let classes = t.compile().unwrap();

        let packages: Vec<_> = classes
            .iter()
            .map(|c| (c.name.as_str(), c.package.as_deref()))
            .collect();
        assert_eq!(
            packages,
            vec![("Two", Some("models.y")), ("One", Some("models.x"))]
        );
        assert!(classes.iter().all(|c| c.class_type == Tag::ComplexType));
    }

    #[test]
    fn test_zero_classes() {
        let mut t = transformer(MemoryLoader::new());
        t.resolve_schemas(&["file:///nothing.xsd".to_string()]).unwrap();
        assert!(t.process_classes().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_output_is_rejected_upfront() {
        let result = SchemaTransformer::new(GeneratorConfig::new("models").with_output("cobol"));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
