//! Module declaration table
//!
//! A [`Module`] is an ordered list of [`Registration`]s made under eight
//! registration styles. Declarations are stored exactly as made; nothing is
//! instantiated until an [`crate::Injector`] loads the module.

use crate::value::ServiceValue;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Registration style of a declaration.
///
/// Kinds do not share a namespace: a filter and a service may carry the same
/// bare name. Filters and directives resolve under a kind suffix; controllers
/// live in their own table and are instantiated per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
	Constant,
	Value,
	Service,
	Factory,
	Provider,
	Filter,
	Directive,
	Controller,
}

impl ProviderKind {
	/// Suffix appended to the bare name when the kind resolves in the
	/// provider namespace under a decorated name.
	pub fn resolution_suffix(self) -> &'static str {
		match self {
			Self::Filter => "Filter",
			Self::Directive => "Directive",
			_ => "",
		}
	}

	/// The name a declaration of this kind resolves under.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::ProviderKind;
	///
	/// assert_eq!(ProviderKind::Filter.resolution_name("currency"), "currencyFilter");
	/// assert_eq!(ProviderKind::Factory.resolution_name("currency"), "currency");
	/// ```
	pub fn resolution_name(self, name: &str) -> String {
		format!("{name}{}", self.resolution_suffix())
	}

	/// Constants and values: immutable leaves with no dependencies.
	pub fn is_value_like(self) -> bool {
		matches!(self, Self::Constant | Self::Value)
	}
}

impl fmt::Display for ProviderKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Constant => "constant",
			Self::Value => "value",
			Self::Service => "service",
			Self::Factory => "factory",
			Self::Provider => "provider",
			Self::Filter => "filter",
			Self::Directive => "directive",
			Self::Controller => "controller",
		};
		f.write_str(name)
	}
}

/// Factory/constructor body: positional dependencies in, instance out.
pub type FactoryFn = Arc<dyn Fn(&[ServiceValue]) -> ServiceValue + Send + Sync>;

/// Style-specific declaration payload.
///
/// Provider declarations keep their construction dependency list inside the
/// variant; every other injectable style takes its list from the owning
/// [`Registration`].
#[derive(Clone)]
pub enum Declaration {
	Constant(ServiceValue),
	Value(ServiceValue),
	Service(FactoryFn),
	Factory(FactoryFn),
	Provider {
		get: FactoryFn,
		get_dependencies: Vec<String>,
	},
	Filter(FactoryFn),
	Directive(FactoryFn),
	Controller(FactoryFn),
}

impl Declaration {
	pub fn kind(&self) -> ProviderKind {
		match self {
			Self::Constant(_) => ProviderKind::Constant,
			Self::Value(_) => ProviderKind::Value,
			Self::Service(_) => ProviderKind::Service,
			Self::Factory(_) => ProviderKind::Factory,
			Self::Provider { .. } => ProviderKind::Provider,
			Self::Filter(_) => ProviderKind::Filter,
			Self::Directive(_) => ProviderKind::Directive,
			Self::Controller(_) => ProviderKind::Controller,
		}
	}
}

impl fmt::Debug for Declaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Declaration::{}", self.kind())
	}
}

/// One declaration made against a module.
#[derive(Debug, Clone)]
pub struct Registration {
	pub name: String,
	/// Positional injection order. Empty for constants, values and providers
	/// (a provider's list lives inside its declaration).
	pub dependencies: Vec<String>,
	pub declaration: Declaration,
}

impl Registration {
	pub fn kind(&self) -> ProviderKind {
		self.declaration.kind()
	}

	pub fn resolution_name(&self) -> String {
		self.kind().resolution_name(&self.name)
	}

	/// Re-declaration with a rewritten positional dependency list, placed
	/// wherever this registration's style keeps it. The declaration payload
	/// is shared, not copied.
	pub fn with_dependency_names(&self, dependency_names: Vec<String>) -> Registration {
		match &self.declaration {
			Declaration::Provider { get, .. } => Registration {
				name: self.name.clone(),
				dependencies: Vec::new(),
				declaration: Declaration::Provider {
					get: Arc::clone(get),
					get_dependencies: dependency_names,
				},
			},
			_ => Registration {
				name: self.name.clone(),
				dependencies: dependency_names,
				declaration: self.declaration.clone(),
			},
		}
	}
}

/// A named module: registration target and unit of loading.
///
/// Registration methods take `&self` and return `&Self`, so declarations can
/// be chained and modules can keep receiving declarations after creation.
///
/// # Examples
///
/// ```
/// use rewire_di::{Module, ServiceValue};
///
/// let module = Module::new("billing");
/// module
///     .constant("currency", ServiceValue::opaque("EUR".to_string()))
///     .factory("invoices", &["currency"], |deps| deps[0].clone());
///
/// assert_eq!(module.registrations().len(), 2);
/// ```
pub struct Module {
	name: String,
	requires: Vec<String>,
	registrations: RwLock<Vec<Registration>>,
}

impl Module {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			requires: Vec::new(),
			registrations: RwLock::new(Vec::new()),
		}
	}

	/// Declare modules this module depends on; they are loaded first.
	pub fn with_requires(mut self, requires: &[&str]) -> Self {
		self.requires = requires.iter().map(|name| name.to_string()).collect();
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn requires(&self) -> &[String] {
		&self.requires
	}

	pub fn constant(&self, name: &str, value: ServiceValue) -> &Self {
		self.push(name, Vec::new(), Declaration::Constant(value))
	}

	pub fn value(&self, name: &str, value: ServiceValue) -> &Self {
		self.push(name, Vec::new(), Declaration::Value(value))
	}

	/// Register a service under an annotated constructor.
	pub fn service<F>(&self, name: &str, dependencies: &[&str], constructor: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			to_names(dependencies),
			Declaration::Service(Arc::new(constructor)),
		)
	}

	pub fn factory<F>(&self, name: &str, dependencies: &[&str], factory: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			to_names(dependencies),
			Declaration::Factory(Arc::new(factory)),
		)
	}

	/// Register a provider: the construction function and its own dependency
	/// list, resolved when the provider's name is first requested.
	pub fn provider<F>(&self, name: &str, get_dependencies: &[&str], get: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			Vec::new(),
			Declaration::Provider {
				get: Arc::new(get),
				get_dependencies: to_names(get_dependencies),
			},
		)
	}

	/// Register a filter factory; it resolves under `<name>Filter`.
	pub fn filter<F>(&self, name: &str, dependencies: &[&str], factory: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			to_names(dependencies),
			Declaration::Filter(Arc::new(factory)),
		)
	}

	/// Register a directive factory; it resolves under `<name>Directive`.
	pub fn directive<F>(&self, name: &str, dependencies: &[&str], factory: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			to_names(dependencies),
			Declaration::Directive(Arc::new(factory)),
		)
	}

	/// Register a controller constructor, instantiated fresh per request.
	pub fn controller<F>(&self, name: &str, dependencies: &[&str], constructor: F) -> &Self
	where
		F: Fn(&[ServiceValue]) -> ServiceValue + Send + Sync + 'static,
	{
		self.push(
			name,
			to_names(dependencies),
			Declaration::Controller(Arc::new(constructor)),
		)
	}

	/// Append a prebuilt registration, e.g. one lifted from another module's
	/// declaration table.
	pub fn declare(&self, registration: Registration) -> &Self {
		self.registrations
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.push(registration);
		self
	}

	/// Snapshot of the declaration table in registration order.
	pub fn registrations(&self) -> Vec<Registration> {
		self.registrations
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	fn push(&self, name: &str, dependencies: Vec<String>, declaration: Declaration) -> &Self {
		self.declare(Registration {
			name: name.to_string(),
			dependencies,
			declaration,
		})
	}
}

impl fmt::Debug for Module {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Module")
			.field("name", &self.name)
			.field("requires", &self.requires)
			.field(
				"registrations",
				&self
					.registrations
					.read()
					.unwrap_or_else(PoisonError::into_inner)
					.len(),
			)
			.finish()
	}
}

fn to_names(names: &[&str]) -> Vec<String> {
	names.iter().map(|name| name.to_string()).collect()
}
