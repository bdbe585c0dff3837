//! Registration catalog: reading back a module's declaration table
//!
//! Introspection runs inside a throwaway injector so cataloging a module can
//! never instantiate one of its singletons or leak a side effect. The five
//! injectable registration styles plus constants, values and controllers all
//! normalize here, and only here, into the flat [`RegistrationRecord`]
//! shape the builder and rebuild work against.

use crate::error::MockBuildResult;
use rewire_di::{
	ContainerResult, Declaration, Injector, ModuleRegistry, ProviderKind, Registration,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One declaration of the introspected module, normalized across styles.
#[derive(Debug, Clone)]
pub struct RegistrationRecord {
	pub kind: ProviderKind,
	/// Bare name, unique within its kind-namespace.
	pub name: String,
	/// Positional dependency list, exactly as declared.
	pub dependency_names: Vec<String>,
	/// The original declaration payload; referenced, never copied.
	pub declaration: Declaration,
}

impl RegistrationRecord {
	pub fn from_registration(registration: &Registration) -> Self {
		let dependency_names = match &registration.declaration {
			Declaration::Constant(_) | Declaration::Value(_) => Vec::new(),
			Declaration::Provider {
				get_dependencies, ..
			} => get_dependencies.clone(),
			_ => registration.dependencies.clone(),
		};
		Self {
			kind: registration.kind(),
			name: registration.name.clone(),
			dependency_names,
			declaration: registration.declaration.clone(),
		}
	}

	/// The name this record resolves under in the provider namespace.
	pub fn resolution_name(&self) -> String {
		self.kind.resolution_name(&self.name)
	}

	/// Re-declaration of this record with a rewritten dependency list,
	/// sharing the original declaration payload.
	pub fn to_registration(&self, dependency_names: Vec<String>) -> Registration {
		Registration {
			name: self.name.clone(),
			dependencies: Vec::new(),
			declaration: self.declaration.clone(),
		}
		.with_dependency_names(dependency_names)
	}
}

/// Injected introspection capability: enumerate a module's declarations.
pub trait CatalogProvider: Send + Sync {
	fn list_declarations(&self, module_name: &str) -> ContainerResult<Vec<RegistrationRecord>>;
}

/// Default [`CatalogProvider`]: builds an isolated injector for the module
/// and snapshots its merged declaration table. The injector is discarded
/// afterwards; nothing is instantiated during the snapshot.
pub struct InjectorCatalogProvider {
	registry: Arc<ModuleRegistry>,
}

impl InjectorCatalogProvider {
	pub fn new(registry: Arc<ModuleRegistry>) -> Self {
		Self { registry }
	}
}

impl CatalogProvider for InjectorCatalogProvider {
	fn list_declarations(&self, module_name: &str) -> ContainerResult<Vec<RegistrationRecord>> {
		let injector = Injector::create(&self.registry, &[module_name])?;
		Ok(injector
			.declarations()
			.iter()
			.map(RegistrationRecord::from_registration)
			.collect())
	}
}

/// Keyed view of one module's declarations.
#[derive(Debug)]
pub struct ModuleCatalog {
	module_name: String,
	records: Vec<RegistrationRecord>,
	by_key: HashMap<(ProviderKind, String), usize>,
	by_resolution: HashMap<String, usize>,
}

impl ModuleCatalog {
	/// Enumerate `module_name` through the given provider and index the
	/// result by `(kind, name)` and by provider-namespace resolution name.
	/// Controller names are not injectable, so they stay out of the
	/// resolution index.
	pub fn introspect(
		provider: &dyn CatalogProvider,
		module_name: &str,
	) -> MockBuildResult<Self> {
		let records = provider.list_declarations(module_name)?;
		let mut by_key = HashMap::new();
		let mut by_resolution = HashMap::new();
		for (index, record) in records.iter().enumerate() {
			by_key.insert((record.kind, record.name.clone()), index);
			if record.kind != ProviderKind::Controller {
				by_resolution.insert(record.resolution_name(), index);
			}
		}
		debug!(
			module = module_name,
			records = records.len(),
			"introspected module"
		);
		Ok(Self {
			module_name: module_name.to_string(),
			records,
			by_key,
			by_resolution,
		})
	}

	pub fn module_name(&self) -> &str {
		&self.module_name
	}

	pub fn get(&self, kind: ProviderKind, name: &str) -> Option<&RegistrationRecord> {
		self.by_key
			.get(&(kind, name.to_string()))
			.map(|index| &self.records[*index])
	}

	/// Look a dependency name up across every injectable kind.
	pub fn find_by_resolution_name(&self, name: &str) -> Option<&RegistrationRecord> {
		self.by_resolution.get(name).map(|index| &self.records[*index])
	}

	pub fn records(&self) -> &[RegistrationRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}
