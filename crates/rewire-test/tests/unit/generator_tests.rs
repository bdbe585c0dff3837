//! Unit tests for the mock-generator seam

use rewire_di::{Module, ModuleRegistry, ServiceObject, ServiceValue};
use rewire_test::{InjectorCatalogProvider, MockGenerator, ModuleBuilder};
use rstest::*;
use serde_json::Value;
use std::sync::{Arc, Mutex};

mockall::mock! {
	Gen {}
	impl MockGenerator for Gen {
		fn generate(&self, original: &ServiceValue) -> ServiceValue;
	}
}

#[rstest]
fn builder_routes_every_substitute_through_the_generator() {
	// Arrange
	let registry = Arc::new(ModuleRegistry::new());
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let module = Module::new("app");
	module
		.factory("left", &[], |_| {
			ServiceValue::object(ServiceObject::new().with_method("l", |_| Value::Null))
		})
		.factory("right", &[], |_| {
			ServiceValue::object(ServiceObject::new().with_method("r", |_| Value::Null))
		})
		.factory("target", &["left", "right"], move |deps| {
			*sink.lock().unwrap() = deps.to_vec();
			ServiceValue::opaque(())
		});
	registry.register(module);

	let sentinel = ServiceValue::opaque("sentinel".to_string());
	let sentinel_out = sentinel.clone();
	let mut generator = MockGen::new();
	generator
		.expect_generate()
		.times(2)
		.returning(move |_| sentinel_out.clone());

	// Act
	let provider = InjectorCatalogProvider::new(Arc::clone(&registry));
	let injector = ModuleBuilder::for_module_with(
		Arc::clone(&registry),
		"app",
		&provider,
		Arc::new(generator),
	)
	.unwrap()
	.service_with_mocks("target")
	.unwrap()
	.build()
	.unwrap();
	injector.resolve("target").unwrap();

	// Assert
	let seen = seen.lock().unwrap();
	assert!(seen[0].same_instance(&sentinel));
	assert!(seen[1].same_instance(&sentinel));
}

#[rstest]
fn generator_receives_the_baseline_instance() {
	// Arrange
	let registry = Arc::new(ModuleRegistry::new());
	let module = Module::new("app");
	module
		.factory("dep", &[], |_| {
			ServiceValue::object(ServiceObject::new().with_method("m", |_| Value::Null))
		})
		.factory("target", &["dep"], |_| ServiceValue::opaque(()));
	registry.register(module);

	let mut generator = MockGen::new();
	generator
		.expect_generate()
		.withf(|original| original.as_object().is_some_and(|o| o.method("m").is_some()))
		.times(1)
		.returning(|original| original.clone());

	// Act
	let provider = InjectorCatalogProvider::new(Arc::clone(&registry));
	let built = ModuleBuilder::for_module_with(
		Arc::clone(&registry),
		"app",
		&provider,
		Arc::new(generator),
	)
	.unwrap()
	.service_with_mocks("target")
	.unwrap()
	.build();

	// Assert
	assert!(built.is_ok());
}
