//! Fluent module builder
//!
//! One builder per introspected module. A single target registration is
//! selected together with a mock mode (all dependencies, only the listed
//! ones, or all except the listed ones); `build()` resolves the final mock
//! set against the eligibility policy and rebuilds the module.
//!
//! Kind-level contract violations (unknown target, constant/value target,
//! second target) fail at the configuration call. Per-dependency
//! eligibility depends on catalog state and is checked at `build()`.

use crate::catalog::{CatalogProvider, InjectorCatalogProvider, ModuleCatalog, RegistrationRecord};
use crate::eligibility::{is_mockable, mockable_dependencies};
use crate::error::{MockBuildError, MockBuildResult};
use crate::mock::{MockGenerator, SpyMockGenerator};
use crate::rebuild::rebuild;
use rewire_di::{ContainerError, Injector, ModuleRegistry, ProviderKind};
use std::sync::Arc;
use tracing::debug;

/// Which of a target's dependencies get mocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockMode {
	/// Every eligible dependency.
	All,
	/// Exactly the listed names; each must be an eligible dependency.
	Only(Vec<String>),
	/// Every eligible dependency not listed. Listed names that are not
	/// mockable are skipped, not an error.
	Except(Vec<String>),
}

#[derive(Debug, Clone)]
struct MockSelection {
	kind: ProviderKind,
	name: String,
	mode: MockMode,
}

/// Namespaces a target name can be looked up in.
#[derive(Debug, Clone, Copy)]
enum TargetNamespace {
	Service,
	Filter,
	Directive,
	Controller,
}

/// Start a builder for a registered module, using the default catalog
/// provider and mock generator.
pub fn for_module(
	registry: &Arc<ModuleRegistry>,
	module_name: &str,
) -> MockBuildResult<ModuleBuilder> {
	ModuleBuilder::for_module(Arc::clone(registry), module_name)
}

/// Fluent configuration of one mocked rebuild of a module.
pub struct ModuleBuilder {
	registry: Arc<ModuleRegistry>,
	module_name: String,
	catalog: ModuleCatalog,
	generator: Arc<dyn MockGenerator>,
	selection: Option<MockSelection>,
}

impl std::fmt::Debug for ModuleBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ModuleBuilder")
			.field("module_name", &self.module_name)
			.field("catalog", &self.catalog)
			.field("selection", &self.selection)
			.finish_non_exhaustive()
	}
}

impl ModuleBuilder {
	/// Introspect `module_name` and return a builder over its catalog.
	/// Fails immediately if the module is unknown to the registry.
	pub fn for_module(registry: Arc<ModuleRegistry>, module_name: &str) -> MockBuildResult<Self> {
		let provider = InjectorCatalogProvider::new(Arc::clone(&registry));
		Self::for_module_with(registry, module_name, &provider, Arc::new(SpyMockGenerator::new()))
	}

	/// Same as [`ModuleBuilder::for_module`] with explicit capabilities.
	pub fn for_module_with(
		registry: Arc<ModuleRegistry>,
		module_name: &str,
		catalog_provider: &dyn CatalogProvider,
		generator: Arc<dyn MockGenerator>,
	) -> MockBuildResult<Self> {
		let catalog = ModuleCatalog::introspect(catalog_provider, module_name)?;
		Ok(Self {
			registry,
			module_name: module_name.to_string(),
			catalog,
			generator,
			selection: None,
		})
	}

	/// Target a service-namespace registration (service, factory or
	/// provider style) and mock every eligible dependency.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::{Module, ModuleRegistry, ServiceValue};
	/// use rewire_test::for_module;
	/// use std::sync::Arc;
	///
	/// let registry = Arc::new(ModuleRegistry::new());
	/// let module = Module::new("app");
	/// module
	///     .value("clock", ServiceValue::opaque("clock".to_string()))
	///     .factory("alarm", &["clock"], |deps| deps[0].clone());
	/// registry.register(module);
	///
	/// let injector = for_module(&registry, "app")
	///     .unwrap()
	///     .service_with_mocks("alarm")
	///     .unwrap()
	///     .build()
	///     .unwrap();
	/// assert!(injector.resolve("alarm").is_ok());
	/// ```
	pub fn service_with_mocks(self, name: &str) -> MockBuildResult<Self> {
		self.configure(TargetNamespace::Service, name, MockMode::All)
	}

	/// Target a service and mock exactly the listed dependencies.
	pub fn service_with_mocks_for(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Service,
			name,
			MockMode::Only(to_names(dependency_names)),
		)
	}

	/// Target a service and mock every eligible dependency except the
	/// listed ones.
	pub fn service_with_mocks_except(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Service,
			name,
			MockMode::Except(to_names(dependency_names)),
		)
	}

	/// Target a filter registration by its bare name.
	pub fn filter_with_mocks(self, name: &str) -> MockBuildResult<Self> {
		self.configure(TargetNamespace::Filter, name, MockMode::All)
	}

	pub fn filter_with_mocks_for(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Filter,
			name,
			MockMode::Only(to_names(dependency_names)),
		)
	}

	pub fn filter_with_mocks_except(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Filter,
			name,
			MockMode::Except(to_names(dependency_names)),
		)
	}

	/// Target a directive registration by its bare name.
	pub fn directive_with_mocks(self, name: &str) -> MockBuildResult<Self> {
		self.configure(TargetNamespace::Directive, name, MockMode::All)
	}

	pub fn directive_with_mocks_for(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Directive,
			name,
			MockMode::Only(to_names(dependency_names)),
		)
	}

	pub fn directive_with_mocks_except(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Directive,
			name,
			MockMode::Except(to_names(dependency_names)),
		)
	}

	/// Target a controller registration.
	pub fn controller_with_mocks(self, name: &str) -> MockBuildResult<Self> {
		self.configure(TargetNamespace::Controller, name, MockMode::All)
	}

	pub fn controller_with_mocks_for(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Controller,
			name,
			MockMode::Only(to_names(dependency_names)),
		)
	}

	pub fn controller_with_mocks_except(
		self,
		name: &str,
		dependency_names: &[&str],
	) -> MockBuildResult<Self> {
		self.configure(
			TargetNamespace::Controller,
			name,
			MockMode::Except(to_names(dependency_names)),
		)
	}

	/// Resolve the mock set, rebuild the module and return the live
	/// container. With no target configured this is a plain load of the
	/// module.
	pub fn build(self) -> MockBuildResult<Injector> {
		let Some(selection) = &self.selection else {
			return Ok(Injector::create(&self.registry, &[self.module_name.as_str()])?);
		};
		let record = self
			.catalog
			.get(selection.kind, &selection.name)
			.ok_or_else(|| {
				MockBuildError::Container(ContainerError::UnknownProvider(selection.name.clone()))
			})?;
		let mocked_names = resolve_mock_names(&self.catalog, record, &selection.mode)?;
		debug!(
			module = %self.module_name,
			target = %record.name,
			kind = %record.kind,
			mocked = mocked_names.len(),
			"building module with mock overrides"
		);
		rebuild(
			&self.registry,
			&self.module_name,
			&self.catalog,
			record,
			&mocked_names,
			self.generator.as_ref(),
		)
	}

	fn configure(
		mut self,
		namespace: TargetNamespace,
		name: &str,
		mode: MockMode,
	) -> MockBuildResult<Self> {
		if let Some(existing) = &self.selection {
			return Err(MockBuildError::TargetAlreadyConfigured(existing.name.clone()));
		}
		let (kind, target_name) = {
			let record = self.lookup_target(namespace, name)?;
			if record.kind.is_value_like() {
				return Err(MockBuildError::UnsupportedRegistrationKind(record.name.clone()));
			}
			(record.kind, record.name.clone())
		};
		self.selection = Some(MockSelection {
			kind,
			name: target_name,
			mode,
		});
		Ok(self)
	}

	fn lookup_target(
		&self,
		namespace: TargetNamespace,
		name: &str,
	) -> MockBuildResult<&RegistrationRecord> {
		let kinds: &[ProviderKind] = match namespace {
			// service-style targets share the bare provider namespace;
			// value-like hits are surfaced so configure can reject them
			TargetNamespace::Service => &[
				ProviderKind::Service,
				ProviderKind::Factory,
				ProviderKind::Provider,
				ProviderKind::Value,
				ProviderKind::Constant,
			],
			TargetNamespace::Filter => &[ProviderKind::Filter],
			TargetNamespace::Directive => &[ProviderKind::Directive],
			TargetNamespace::Controller => &[ProviderKind::Controller],
		};
		for kind in kinds {
			if let Some(record) = self.catalog.get(*kind, name) {
				return Ok(record);
			}
		}
		let missing = match namespace {
			TargetNamespace::Filter => ProviderKind::Filter.resolution_name(name),
			TargetNamespace::Directive => ProviderKind::Directive.resolution_name(name),
			_ => name.to_string(),
		};
		Err(ContainerError::UnknownProvider(missing).into())
	}
}

fn resolve_mock_names(
	catalog: &ModuleCatalog,
	record: &RegistrationRecord,
	mode: &MockMode,
) -> MockBuildResult<Vec<String>> {
	match mode {
		MockMode::All => Ok(mockable_dependencies(catalog, record)),
		MockMode::Only(names) => {
			for name in names {
				let declared = record.dependency_names.iter().any(|d| d == name);
				if !declared || !is_mockable(catalog, name) {
					return Err(MockBuildError::NonMockableDependency(name.clone()));
				}
			}
			Ok(record
				.dependency_names
				.iter()
				.filter(|d| names.iter().any(|n| n == *d))
				.cloned()
				.collect())
		}
		MockMode::Except(names) => Ok(record
			.dependency_names
			.iter()
			.filter(|d| is_mockable(catalog, d.as_str()) && !names.iter().any(|n| n == *d))
			.cloned()
			.collect()),
	}
}

fn to_names(names: &[&str]) -> Vec<String> {
	names.iter().map(|name| name.to_string()).collect()
}
