//! Rebuild: derived-module construction
//!
//! A rebuild layers one anonymous override module over the base module in a
//! fresh injector. The override pins each mock substitute as a value under a
//! private name and re-declares the target with those pins spliced into its
//! dependency list, so the target gets the mixed mocked/real set while every
//! other name keeps resolving through the base module.

use crate::catalog::{ModuleCatalog, RegistrationRecord};
use crate::error::MockBuildResult;
use crate::mock::MockGenerator;
use rewire_di::{Injector, Module, ModuleRegistry};
use std::collections::HashMap;
use tracing::{debug, trace};

pub(crate) fn rebuild(
	registry: &ModuleRegistry,
	module_name: &str,
	catalog: &ModuleCatalog,
	target: &RegistrationRecord,
	mocked_names: &[String],
	generator: &dyn MockGenerator,
) -> MockBuildResult<Injector> {
	// current dependency values come from a plain load of the base module
	let baseline = Injector::create(registry, &[module_name])?;
	let overlay = Module::new(format!("{module_name}.mockOverrides"));

	// one substitute per distinct name; repeated references share it
	let mut pinned: HashMap<String, String> = HashMap::new();
	for name in mocked_names {
		if pinned.contains_key(name) {
			continue;
		}
		let original = baseline.resolve(name)?;
		let substitute = generator.generate(&original);
		let pin = pin_name(catalog, name);
		trace!(dependency = %name, pin = %pin, "substituting mock");
		overlay.value(&pin, substitute);
		pinned.insert(name.clone(), pin);
	}

	let dependency_names: Vec<String> = target
		.dependency_names
		.iter()
		.map(|name| pinned.get(name).cloned().unwrap_or_else(|| name.clone()))
		.collect();
	overlay.declare(target.to_registration(dependency_names));

	debug!(
		module = module_name,
		target = %target.name,
		mocks = pinned.len(),
		"rebuilt module with mock overrides"
	);
	Ok(Injector::create_with(registry, &[module_name], &[&overlay])?)
}

/// Private value name a substitute is registered under. `<dep>Mock`, with a
/// numeric suffix if the module already declares that name.
fn pin_name(catalog: &ModuleCatalog, dependency_name: &str) -> String {
	let mut candidate = format!("{dependency_name}Mock");
	let mut counter = 2u32;
	while catalog.find_by_resolution_name(&candidate).is_some() {
		candidate = format!("{dependency_name}Mock{counter}");
		counter += 1;
	}
	candidate
}
