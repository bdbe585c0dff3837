//! Container instance: module loading and name resolution

use crate::error::{ContainerError, ContainerResult};
use crate::module::{Declaration, Module, ProviderKind, Registration};
use crate::registry::ModuleRegistry;
use crate::value::ServiceValue;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::debug;

/// A container instance built from one or more modules.
///
/// Creation merges the named modules' declaration tables (required modules
/// first, then the module itself; later declarations shadow earlier ones for
/// the same resolution name) without instantiating anything. Instantiation is
/// lazy: [`Injector::resolve`] builds a name's singleton on first request and
/// caches it; [`Injector::controller`] builds a fresh instance per call.
///
/// # Examples
///
/// ```
/// use rewire_di::{Injector, Module, ModuleRegistry, ServiceValue};
///
/// let registry = ModuleRegistry::new();
/// let module = Module::new("math");
/// module
///     .value("offset", ServiceValue::opaque(10i64))
///     .factory("shifted", &["offset"], |deps| {
///         let offset = deps[0].downcast::<i64>().unwrap();
///         ServiceValue::opaque(*offset + 1)
///     });
/// registry.register(module);
///
/// let injector = Injector::create(&registry, &["math"]).unwrap();
/// let shifted = injector.resolve("shifted").unwrap();
/// assert_eq!(*shifted.downcast::<i64>().unwrap(), 11);
/// ```
#[derive(Debug)]
pub struct Injector {
	providers: HashMap<String, Registration>,
	controllers: HashMap<String, Registration>,
	instances: RwLock<HashMap<String, ServiceValue>>,
	resolving: Mutex<Vec<String>>,
}

impl Injector {
	/// Create an injector over the named modules, in order.
	pub fn create(registry: &ModuleRegistry, modules: &[&str]) -> ContainerResult<Self> {
		Self::create_with(registry, modules, &[])
	}

	/// Create an injector over the named modules plus anonymous overlay
	/// modules loaded last, so their declarations shadow everything named.
	pub fn create_with(
		registry: &ModuleRegistry,
		modules: &[&str],
		overlays: &[&Module],
	) -> ContainerResult<Self> {
		let mut providers = HashMap::new();
		let mut controllers = HashMap::new();
		let mut visited = HashSet::new();

		for name in modules {
			Self::load(registry, name, &mut visited, &mut providers, &mut controllers)?;
		}
		for overlay in overlays {
			for required in overlay.requires() {
				Self::load(registry, required, &mut visited, &mut providers, &mut controllers)?;
			}
			Self::absorb(overlay, &mut providers, &mut controllers);
		}

		debug!(
			modules = modules.len(),
			overlays = overlays.len(),
			providers = providers.len(),
			controllers = controllers.len(),
			"created injector"
		);

		Ok(Self {
			providers,
			controllers,
			instances: RwLock::new(HashMap::new()),
			resolving: Mutex::new(Vec::new()),
		})
	}

	fn load(
		registry: &ModuleRegistry,
		name: &str,
		visited: &mut HashSet<String>,
		providers: &mut HashMap<String, Registration>,
		controllers: &mut HashMap<String, Registration>,
	) -> ContainerResult<()> {
		if !visited.insert(name.to_string()) {
			return Ok(());
		}
		let module = registry.module(name)?;
		for required in module.requires() {
			Self::load(registry, required, visited, providers, controllers)?;
		}
		Self::absorb(&module, providers, controllers);
		Ok(())
	}

	fn absorb(
		module: &Module,
		providers: &mut HashMap<String, Registration>,
		controllers: &mut HashMap<String, Registration>,
	) {
		for registration in module.registrations() {
			if registration.kind() == ProviderKind::Controller {
				controllers.insert(registration.name.clone(), registration);
			} else {
				providers.insert(registration.resolution_name(), registration);
			}
		}
	}

	/// Whether a name resolves in the provider namespace.
	pub fn has(&self, name: &str) -> bool {
		self.providers.contains_key(name)
	}

	/// Resolve a provider-namespace name to its singleton instance.
	pub fn resolve(&self, name: &str) -> ContainerResult<ServiceValue> {
		if let Some(instance) = self
			.instances
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(name)
		{
			return Ok(instance.clone());
		}

		let registration = self
			.providers
			.get(name)
			.ok_or_else(|| ContainerError::UnknownProvider(name.to_string()))?;

		self.enter(name)?;
		let built = self.instantiate(registration);
		self.leave(name);
		let instance = built?;

		self.instances
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(name.to_string(), instance.clone());
		Ok(instance)
	}

	/// Instantiate a controller by name. Controllers are never cached.
	pub fn controller(&self, name: &str) -> ContainerResult<ServiceValue> {
		let registration = self
			.controllers
			.get(name)
			.ok_or_else(|| ContainerError::UnknownProvider(name.to_string()))?;
		self.instantiate(registration)
	}

	/// Snapshot of the merged declaration table, both namespaces.
	pub fn declarations(&self) -> Vec<Registration> {
		self.providers
			.values()
			.chain(self.controllers.values())
			.cloned()
			.collect()
	}

	fn instantiate(&self, registration: &Registration) -> ContainerResult<ServiceValue> {
		match &registration.declaration {
			Declaration::Constant(value) | Declaration::Value(value) => Ok(value.clone()),
			Declaration::Service(construct)
			| Declaration::Factory(construct)
			| Declaration::Filter(construct)
			| Declaration::Directive(construct)
			| Declaration::Controller(construct) => {
				let dependencies = self.resolve_all(&registration.dependencies)?;
				Ok(construct(&dependencies))
			}
			Declaration::Provider {
				get,
				get_dependencies,
			} => {
				let dependencies = self.resolve_all(get_dependencies)?;
				Ok(get(&dependencies))
			}
		}
	}

	fn resolve_all(&self, names: &[String]) -> ContainerResult<Vec<ServiceValue>> {
		names.iter().map(|name| self.resolve(name)).collect()
	}

	fn enter(&self, name: &str) -> ContainerResult<()> {
		let mut stack = self.resolving.lock().unwrap_or_else(PoisonError::into_inner);
		if stack.iter().any(|entry| entry == name) {
			let mut chain = stack.clone();
			chain.push(name.to_string());
			return Err(ContainerError::CircularDependency(chain.join(" -> ")));
		}
		stack.push(name.to_string());
		Ok(())
	}

	fn leave(&self, name: &str) {
		let mut stack = self.resolving.lock().unwrap_or_else(PoisonError::into_inner);
		if let Some(position) = stack.iter().rposition(|entry| entry == name) {
			stack.remove(position);
		}
	}
}
