//! Unit tests for the registration catalog

use rewire_di::{
	ContainerError, Declaration, Module, ModuleRegistry, ProviderKind, ServiceValue,
};
use rewire_test::{
	CatalogProvider, InjectorCatalogProvider, ModuleCatalog, RegistrationRecord,
};
use rstest::*;
use std::sync::Arc;

mockall::mock! {
	Provider {}
	impl CatalogProvider for Provider {
		fn list_declarations(
			&self,
			module_name: &str,
		) -> rewire_di::ContainerResult<Vec<RegistrationRecord>>;
	}
}

fn fixture_catalog() -> ModuleCatalog {
	let registry = Arc::new(ModuleRegistry::new());
	let module = Module::new("fixture");
	module
		.constant("limit", ServiceValue::opaque(10u8))
		.value("config", ServiceValue::opaque("cfg".to_string()))
		.factory("repo", &["config"], |_| ServiceValue::opaque(()))
		.provider("gateway", &["repo", "config"], |_| ServiceValue::opaque(()))
		.filter("pretty", &["repo"], |_| ServiceValue::opaque(()))
		.controller("page", &["repo"], |_| ServiceValue::opaque(()));
	registry.register(module);

	let provider = InjectorCatalogProvider::new(registry);
	ModuleCatalog::introspect(&provider, "fixture").unwrap()
}

#[rstest]
fn provider_get_dependencies_are_normalized() {
	// Arrange
	let catalog = fixture_catalog();

	// Act
	let record = catalog.get(ProviderKind::Provider, "gateway").unwrap();

	// Assert
	assert_eq!(record.dependency_names, vec!["repo".to_string(), "config".to_string()]);
}

#[rstest]
fn value_like_records_have_no_dependencies() {
	// Arrange
	let catalog = fixture_catalog();

	// Assert
	assert!(catalog.get(ProviderKind::Constant, "limit").unwrap().dependency_names.is_empty());
	assert!(catalog.get(ProviderKind::Value, "config").unwrap().dependency_names.is_empty());
}

#[rstest]
fn filters_are_indexed_under_their_decorated_name() {
	// Arrange
	let catalog = fixture_catalog();

	// Act
	let record = catalog.find_by_resolution_name("prettyFilter").unwrap();

	// Assert
	assert_eq!(record.kind, ProviderKind::Filter);
	assert_eq!(record.name, "pretty");
	assert!(catalog.find_by_resolution_name("pretty").is_none());
}

#[rstest]
fn controllers_are_keyed_but_not_injectable() {
	// Arrange
	let catalog = fixture_catalog();

	// Assert
	assert!(catalog.get(ProviderKind::Controller, "page").is_some());
	assert!(catalog.find_by_resolution_name("page").is_none());
}

#[rstest]
fn kinds_do_not_share_a_namespace() {
	// Arrange
	let registry = Arc::new(ModuleRegistry::new());
	let module = Module::new("m");
	module
		.value("twin", ServiceValue::opaque(1u8))
		.filter("twin", &[], |_| ServiceValue::opaque(2u8));
	registry.register(module);
	let provider = InjectorCatalogProvider::new(registry);

	// Act
	let catalog = ModuleCatalog::introspect(&provider, "m").unwrap();

	// Assert
	assert_eq!(catalog.get(ProviderKind::Value, "twin").unwrap().kind, ProviderKind::Value);
	assert_eq!(catalog.get(ProviderKind::Filter, "twin").unwrap().kind, ProviderKind::Filter);
}

#[rstest]
fn introspection_propagates_provider_failures() {
	// Arrange
	let mut provider = MockProvider::new();
	provider
		.expect_list_declarations()
		.returning(|name| Err(ContainerError::ModuleNotFound(name.to_string())));

	// Act
	let err = ModuleCatalog::introspect(&provider, "ghost").unwrap_err();

	// Assert
	assert!(matches!(
		err,
		rewire_test::MockBuildError::Container(ContainerError::ModuleNotFound(name)) if name == "ghost"
	));
}

#[rstest]
fn introspection_indexes_foreign_records() {
	// Arrange
	let mut provider = MockProvider::new();
	provider.expect_list_declarations().returning(|_| {
		Ok(vec![RegistrationRecord {
			kind: ProviderKind::Factory,
			name: "remote".to_string(),
			dependency_names: vec!["a".to_string()],
			declaration: Declaration::Factory(Arc::new(|_| ServiceValue::opaque(()))),
		}])
	});

	// Act
	let catalog = ModuleCatalog::introspect(&provider, "elsewhere").unwrap();

	// Assert
	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog.module_name(), "elsewhere");
	assert!(catalog.find_by_resolution_name("remote").is_some());
}

#[rstest]
fn records_keep_the_original_declaration_handle() {
	// Arrange
	let registry = Arc::new(ModuleRegistry::new());
	let module = Module::new("m");
	module.factory("svc", &["dep"], |_| ServiceValue::opaque(()));
	registry.register(module);
	let provider = InjectorCatalogProvider::new(Arc::clone(&registry));
	let catalog = ModuleCatalog::introspect(&provider, "m").unwrap();

	// Act
	let record = catalog.get(ProviderKind::Factory, "svc").unwrap();
	let rebuilt = record.to_registration(vec!["depMock".to_string()]);

	// Assert
	assert_eq!(rebuilt.dependencies, vec!["depMock".to_string()]);
	assert_eq!(rebuilt.kind(), ProviderKind::Factory);
}
