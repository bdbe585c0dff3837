//! ONLY and EXCEPT select complementary, exact mock sets for any subset of
//! a target's eligible dependencies.

use proptest::prelude::*;
use rewire_di::{Module, ModuleRegistry, ServiceObject, ServiceValue};
use rewire_test::{MockBuildResult, ModuleBuilder, for_module};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

const DEPS: [&str; 5] = ["depA", "depB", "depC", "depD", "depE"];

/// Build the fixture module, run one configured build, and report which
/// target argument positions received a recording substitute.
fn mocked_positions<F>(configure: F) -> Vec<bool>
where
	F: FnOnce(ModuleBuilder) -> MockBuildResult<ModuleBuilder>,
{
	let registry = Arc::new(ModuleRegistry::new());
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	let module = Module::new("props");
	for dep in DEPS {
		module.factory(dep, &[], |_| {
			ServiceValue::object(ServiceObject::new().with_method("m", |_| Value::Null))
		});
	}
	module.factory("target", &DEPS, move |deps| {
		*sink.lock().unwrap() = deps.to_vec();
		ServiceValue::opaque(())
	});
	registry.register(module);

	let builder = for_module(&registry, "props").unwrap();
	let injector = configure(builder).unwrap().build().unwrap();
	injector.resolve("target").unwrap();

	let seen = seen.lock().unwrap();
	seen.iter()
		.map(|value| {
			value
				.as_object()
				.unwrap()
				.method("m")
				.unwrap()
				.is_recording()
		})
		.collect()
}

proptest! {
	#[test]
	fn only_mode_mocks_exactly_the_listed_subset(
		subset in prop::collection::btree_set(0usize..DEPS.len(), 0..=DEPS.len()),
	) {
		let names: Vec<&str> = subset.iter().map(|index| DEPS[*index]).collect();

		let mocked = mocked_positions(|builder| builder.service_with_mocks_for("target", &names));

		for (index, _) in DEPS.iter().enumerate() {
			prop_assert_eq!(mocked[index], subset.contains(&index));
		}
	}

	#[test]
	fn except_mode_mocks_exactly_the_complement(
		subset in prop::collection::btree_set(0usize..DEPS.len(), 0..=DEPS.len()),
	) {
		let names: Vec<&str> = subset.iter().map(|index| DEPS[*index]).collect();

		let mocked = mocked_positions(|builder| builder.service_with_mocks_except("target", &names));

		for (index, _) in DEPS.iter().enumerate() {
			prop_assert_eq!(mocked[index], !subset.contains(&index));
		}
	}

	#[test]
	fn only_and_except_partition_the_dependency_list(
		subset in prop::collection::btree_set(0usize..DEPS.len(), 0..=DEPS.len()),
	) {
		let names: Vec<&str> = subset.iter().map(|index| DEPS[*index]).collect();

		let only = mocked_positions(|builder| builder.service_with_mocks_for("target", &names));
		let except = mocked_positions(|builder| builder.service_with_mocks_except("target", &names));

		let overlap: BTreeSet<usize> = (0..DEPS.len())
			.filter(|index| only[*index] == except[*index])
			.collect();
		prop_assert!(overlap.is_empty());
	}
}
