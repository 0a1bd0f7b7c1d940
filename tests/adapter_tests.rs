//! Adapter Behaviour Tests
//!
//! Exercises the public surface the way an application does: declare
//! domains, register functions, then run the same use case against real
//! and fake adapters.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use io_adapters::{
    formats, AdapterError, AdapterMode, Container, Direction, Format, IoAdapter, IoConfig,
    IoOptions,
};
use serde_json::{json, Value};
use tempfile::tempdir;

fn orders_container() -> Container {
    io_adapters::logging::init();

    let mut container: Container = Container::new();
    container.add_domain("orders").unwrap();
    container
        .register_domain_read_fn("orders", Format::Json, formats::read_json)
        .unwrap();
    container
        .register_domain_write_fn("orders", Format::Json, formats::write_json)
        .unwrap();
    container
}

/// Use case under test: copy an order and add a processed flag
fn process_order(io: &mut dyn IoAdapter, input: &Path, output: &Path) -> io_adapters::Result<()> {
    let mut order = io.read(input, &Format::Json)?;
    order["processed"] = Value::Bool(true);
    io.write(order, output, &Format::Json)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_fake_round_trip_scenario() {
    let container = orders_container();
    let mut fake = container.get_fake_adapter("orders").unwrap();

    fake.write(json!({"a": 1}), Path::new("f.json"), &Format::Json)
        .unwrap();
    assert_eq!(
        fake.read(Path::new("f.json"), &Format::Json).unwrap(),
        json!({"a": 1})
    );

    let files = fake.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files["f.json"], json!({"a": 1}));
}

#[test]
fn test_fake_missing_path_scenario() {
    let container = orders_container();
    let fake = container.get_fake_adapter("orders").unwrap();

    let err = fake
        .read(Path::new("missing.json"), &Format::Json)
        .unwrap_err();
    match err {
        AdapterError::PathNotFound { path } => assert_eq!(path, Path::new("missing.json")),
        other => panic!("Expected PathNotFound, got {:?}", other),
    }
}

#[test]
fn test_unknown_domain_scenario() {
    let container = orders_container();
    let err = container.get_real_adapter("unknown_domain").unwrap_err();
    assert!(matches!(err, AdapterError::DomainNotFound { ref domain } if domain == "unknown_domain"));
    assert!(err.is_missing_binding());
}

// =============================================================================
// Isolation
// =============================================================================

#[test]
fn test_fake_adapters_are_isolated() {
    let container = orders_container();
    let mut first = container.get_fake_adapter("orders").unwrap();
    let mut second = container.get_fake_adapter("orders").unwrap();

    first
        .write(json!(1), Path::new("shared.json"), &Format::Json)
        .unwrap();
    second
        .write(json!(2), Path::new("other.json"), &Format::Json)
        .unwrap();

    assert!(matches!(
        second.read(Path::new("shared.json"), &Format::Json),
        Err(AdapterError::PathNotFound { .. })
    ));
    assert_eq!(first.files().len(), 1);
    assert_eq!(second.files().len(), 1);
}

#[test]
fn test_domains_do_not_share_bindings() {
    let mut container = orders_container();
    container.add_domain("reporting").unwrap();
    container
        .register_domain_write_fn("reporting", Format::Json, formats::write_json)
        .unwrap();

    let reporting = container.get_fake_adapter("reporting").unwrap();
    let err = reporting
        .read(Path::new("f.json"), &Format::Json)
        .unwrap_err();
    assert!(matches!(
        err,
        AdapterError::TagNotRegistered { direction: Direction::Read, .. }
    ));
}

// =============================================================================
// Missing bindings behave the same on both variants
// =============================================================================

#[test]
fn test_unregistered_tag_on_both_variants() {
    let container = orders_container();
    let mut real = container.get_real_adapter("orders").unwrap();
    let mut fake = container.get_fake_adapter("orders").unwrap();

    let adapters: [&mut dyn IoAdapter; 2] = [&mut real, &mut fake];
    for io in adapters {
        assert!(matches!(
            io.read(Path::new("x.parquet"), &Format::custom("parquet").unwrap()),
            Err(AdapterError::TagNotRegistered { .. })
        ));
        assert!(matches!(
            io.write(json!({}), Path::new("x.toml"), &Format::Toml),
            Err(AdapterError::TagNotRegistered { .. })
        ));
    }
}

// =============================================================================
// Same use case, real and fake
// =============================================================================

#[test]
fn test_use_case_against_filesystem() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in/order.json");
    let output = dir.path().join("out/order.json");
    formats::write_json(json!({"id": 7}), &input, &IoOptions::new()).unwrap();

    let container = orders_container();
    let mut real = container.get_real_adapter("orders").unwrap();
    process_order(&mut real, &input, &output).unwrap();

    assert_eq!(
        formats::read_json(&output, &IoOptions::new()).unwrap(),
        json!({"id": 7, "processed": true})
    );
}

#[test]
fn test_use_case_against_fake() {
    let container = orders_container();
    let mut fake = container
        .get_fake_adapter_with_files("orders", [("in/order.json", json!({"id": 7}))])
        .unwrap();

    process_order(&mut fake, Path::new("in/order.json"), Path::new("out/order.json")).unwrap();

    let files = fake.into_files();
    assert_eq!(files.len(), 2);
    assert_eq!(
        files["out/order.json"],
        json!({"id": 7, "processed": true})
    );
}

#[test]
fn test_real_adapter_surfaces_backend_errors_fake_does_not() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let container = orders_container();

    let real = container.get_real_adapter("orders").unwrap();
    let err = real.read(&missing, &Format::Json).unwrap_err();
    assert!(matches!(err, AdapterError::Backend(_)));
    assert!(!err.is_missing_binding());

    let fake = container.get_fake_adapter("orders").unwrap();
    assert!(matches!(
        fake.read(&missing, &Format::Json),
        Err(AdapterError::PathNotFound { .. })
    ));
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_stacked_registration_across_domains() {
    let mut container: Container = Container::with_domains(["orders", "payment"]).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let write = move |_: Value, _: &Path, _: &IoOptions| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    };
    let write = container
        .register_domain_write_fn("payment", Format::Json, write)
        .unwrap();
    container
        .register_domain_write_fn("orders", Format::Json, write)
        .unwrap();

    for domain in ["orders", "payment"] {
        let mut real = container.get_real_adapter(domain).unwrap();
        real.write(json!(null), Path::new("p.json"), &Format::Json)
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_tag_spelling_does_not_split_bindings() {
    let mut container = orders_container();
    container
        .register_domain_write_fn("orders", Format::custom("CSV ").unwrap(), formats::write_text)
        .unwrap();

    let mut fake = container.get_fake_adapter("orders").unwrap();
    let csv: Format = " csv".parse().unwrap();
    fake.write(json!("a,b"), Path::new("rows.csv"), &csv).unwrap();
    assert_eq!(fake.files()["rows.csv"], json!("a,b"));

    // "json" spelled as a custom name is the registered builtin tag
    let json_tag = Format::custom("JSON ").unwrap();
    fake.write(json!({"a": 1}), Path::new("f.json"), &json_tag)
        .unwrap();
    assert_eq!(
        fake.read(Path::new("f.json"), &Format::Json).unwrap(),
        json!({"a": 1})
    );
}

#[test]
fn test_duplicate_registration_rejected_by_default() {
    let mut container = orders_container();
    let err = container
        .register_domain_read_fn("orders", Format::Json, formats::read_json)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, AdapterError::AlreadyRegistered { .. }));
}

#[test]
fn test_typo_domain_rejected_at_registration() {
    let mut container = orders_container();
    let err = container
        .register_domain_read_fn("ordesr", Format::Toml, formats::read_toml)
        .map(|_| ())
        .unwrap_err();
    assert!(matches!(err, AdapterError::DomainNotFound { .. }));
}

#[test]
fn test_custom_tag_enum() {
    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
    enum Source {
        Database,
        Cache,
    }

    impl std::fmt::Display for Source {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Source::Database => f.write_str("database"),
                Source::Cache => f.write_str("cache"),
            }
        }
    }

    let mut container: Container<Source, String> = Container::with_domains(["reporting"]).unwrap();
    container
        .register_domain_read_fn("reporting", Source::Database, |path: &Path, _: &IoOptions| {
            Ok(format!("rows from {}", path.display()))
        })
        .unwrap();

    let real = container.get_real_adapter("reporting").unwrap();
    assert_eq!(
        real.read(Path::new("sales"), &Source::Database).unwrap(),
        "rows from sales"
    );
    assert!(matches!(
        real.read(Path::new("sales"), &Source::Cache),
        Err(AdapterError::TagNotRegistered { .. })
    ));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_switches_to_fake() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("io-adapters.toml");
    std::fs::write(
        &config_path,
        "[adapters]\nmode = \"fake\"\n\n[domains]\nnames = [\"orders\"]\n",
    )
    .unwrap();

    let config = IoConfig::load_from(config_path.to_str()).unwrap();
    let mut container: Container = Container::from_config(&config).unwrap();
    assert_eq!(container.mode(), AdapterMode::Fake);
    formats::register_standard_formats(&mut container, "orders").unwrap();

    let target = dir.path().join("never-written.json");
    let mut io = container.get_adapter("orders").unwrap();
    io.write(json!({"a": 1}), &target, &Format::Json).unwrap();

    assert_eq!(io.read(&target, &Format::Json).unwrap(), json!({"a": 1}));
    assert!(!target.exists());
}
