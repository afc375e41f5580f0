//! WSDL definitions resolution tests

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use xsdgen::locations::path_to_uri;
use xsdgen::{resolve_source, Error, GeneratorConfig, SchemaTransformer};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn fixture_uri(relative: &str) -> String {
    path_to_uri(&fixtures_dir().join(relative)).unwrap()
}

fn transformer() -> SchemaTransformer {
    SchemaTransformer::new(GeneratorConfig::new("stock").with_wsdl(true)).unwrap()
}

#[test]
fn test_imports_are_merged_into_the_root() {
    let mut t = transformer();
    let definitions = t
        .parse_definitions(&fixture_uri("service/stock.wsdl"), None, 0)
        .unwrap();

    assert_eq!(definitions.name.as_deref(), Some("StockQuote"));

    let messages: Vec<_> = definitions
        .messages
        .iter()
        .filter_map(|m| m.name.as_deref())
        .collect();
    assert_eq!(messages, vec!["QuoteFaultMessage", "GetHistoryInput"]);

    assert_eq!(definitions.schemas().len(), 2);
    assert_eq!(definitions.port_types.len(), 1);
    assert_eq!(definitions.bindings.len(), 1);
    assert_eq!(definitions.services.len(), 1);
    assert_eq!(definitions.imports.len(), 2);
}

#[test]
fn test_inline_schemas_produce_classes() {
    let mut t = transformer();
    t.resolve_definitions(&fixture_uri("service/stock.wsdl"))
        .unwrap();

    let stock = t.class_map().get(&fixture_uri("service/stock.wsdl")).unwrap();
    let names: Vec<_> = stock.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["TradePriceRequest", "TradePrice"]);
    assert!(stock.iter().all(|c| c.namespace.as_deref() == Some("urn:stock")));

    let faults = t.class_map().get(&fixture_uri("service/faults.wsdl")).unwrap();
    assert_eq!(faults[0].name, "QuoteFault");
}

#[test]
fn test_process_definitions_writes_output() {
    let out = TempDir::new().unwrap();
    let config = GeneratorConfig::new("stock")
        .with_wsdl(true)
        .with_output_dir(out.path());
    let mut t = SchemaTransformer::new(config).unwrap();

    let classes = t
        .process_definitions(&fixture_uri("service/stock.wsdl"))
        .unwrap();

    assert_eq!(classes.len(), 3);
    assert!(classes.iter().all(|c| c.package.as_deref() == Some("stock")));
    assert!(out.path().join("stock.json").exists());
}

#[test]
fn test_unreachable_root_is_fatal() {
    let mut t = transformer();
    let result = t.process_definitions(&fixture_uri("service/missing.wsdl"));

    assert!(matches!(result, Err(Error::Generation(_))));
    assert!(t.class_map().is_empty());
}

#[test]
fn test_directory_source_is_rejected_in_wsdl_mode() {
    let source = fixtures_dir().join("service");
    let result = resolve_source(source.to_str().unwrap(), true);
    assert!(matches!(result, Err(Error::Config(_))));
}
