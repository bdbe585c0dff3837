//! Unit tests for the eligibility policy

use rewire_di::{Module, ModuleRegistry, ProviderKind, ServiceValue};
use rewire_test::{InjectorCatalogProvider, ModuleCatalog, is_mockable, mockable_dependencies};
use rstest::*;
use std::sync::Arc;

fn catalog() -> ModuleCatalog {
	let registry = Arc::new(ModuleRegistry::new());
	let module = Module::new("policy");
	module
		.constant("aConstant", ServiceValue::opaque(1u8))
		.value("aValue", ServiceValue::opaque(2u8))
		.service("aService", &[], |_| ServiceValue::opaque(()))
		.factory("aFactory", &[], |_| ServiceValue::opaque(()))
		.provider("aProvider", &[], |_| ServiceValue::opaque(()))
		.filter("aFilter", &[], |_| ServiceValue::opaque(()))
		.factory(
			"consumer",
			&["aConstant", "aValue", "aFactory", "fromElsewhere"],
			|_| ServiceValue::opaque(()),
		);
	registry.register(module);

	let provider = InjectorCatalogProvider::new(registry);
	ModuleCatalog::introspect(&provider, "policy").unwrap()
}

#[rstest]
#[case("aConstant", false)]
#[case("aValue", false)]
#[case("aService", true)]
#[case("aFactory", true)]
#[case("aProvider", true)]
#[case("aFilterFilter", true)]
fn declared_dependencies_follow_their_kind(#[case] name: &str, #[case] expected: bool) {
	// Arrange
	let catalog = catalog();

	// Act / Assert
	assert_eq!(is_mockable(&catalog, name), expected);
}

#[rstest]
fn unknown_dependencies_default_to_mockable() {
	// Arrange
	let catalog = catalog();

	// Assert
	assert!(is_mockable(&catalog, "fromElsewhere"));
}

#[rstest]
fn mockable_dependencies_preserve_declaration_order() {
	// Arrange
	let catalog = catalog();
	let record = catalog.get(ProviderKind::Factory, "consumer").unwrap();

	// Act
	let eligible = mockable_dependencies(&catalog, record);

	// Assert
	assert_eq!(eligible, vec!["aFactory".to_string(), "fromElsewhere".to_string()]);
}
