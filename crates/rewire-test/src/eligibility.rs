//! Mocking eligibility policy
//!
//! Constants and values are immutable configuration, not collaborators, so a
//! dependency whose own declaration is one of those kinds can never be
//! mocked. A dependency the catalog cannot find at all (typically one
//! contributed by a module that was not introspected) is assumed mockable.

use crate::catalog::{ModuleCatalog, RegistrationRecord};

/// Whether the named dependency may be replaced with a mock.
pub fn is_mockable(catalog: &ModuleCatalog, dependency_name: &str) -> bool {
	match catalog.find_by_resolution_name(dependency_name) {
		Some(record) => !record.kind.is_value_like(),
		None => true,
	}
}

/// The eligible subset of a record's dependencies, in declaration order.
pub fn mockable_dependencies(
	catalog: &ModuleCatalog,
	record: &RegistrationRecord,
) -> Vec<String> {
	record
		.dependency_names
		.iter()
		.filter(|name| is_mockable(catalog, name.as_str()))
		.cloned()
		.collect()
}
