//! Module registry

use crate::error::{ContainerError, ContainerResult};
use crate::module::Module;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Name-keyed table of registered modules.
///
/// The registry only stores declarations; it never instantiates anything.
/// Injectors read from it and re-registering a name replaces the previous
/// module for *future* injectors only.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
	modules: RwLock<HashMap<String, Arc<Module>>>,
}

impl ModuleRegistry {
	pub fn new() -> Self {
		Self {
			modules: RwLock::new(HashMap::new()),
		}
	}

	/// Register a module under its own name, returning the shared handle.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::{Module, ModuleRegistry};
	///
	/// let registry = ModuleRegistry::new();
	/// registry.register(Module::new("app"));
	///
	/// assert!(registry.contains("app"));
	/// assert!(!registry.contains("other"));
	/// ```
	pub fn register(&self, module: Module) -> Arc<Module> {
		let module = Arc::new(module);
		self.modules
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(module.name().to_string(), Arc::clone(&module));
		module
	}

	/// Look up a module by name.
	pub fn module(&self, name: &str) -> ContainerResult<Arc<Module>> {
		self.modules
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(name)
			.cloned()
			.ok_or_else(|| ContainerError::ModuleNotFound(name.to_string()))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.modules
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contains_key(name)
	}
}
