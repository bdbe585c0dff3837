//! # Rewire Test
//!
//! Test-support engine for [`rewire_di`] modules: build "service X, but with
//! dependencies A and B replaced by call-recording mocks" without
//! hand-writing a parallel module.
//!
//! ## Overview
//!
//! [`for_module`] introspects a registered module inside a throwaway
//! injector and returns a [`ModuleBuilder`]. The builder selects one target
//! registration (service, factory, provider, filter, directive or controller
//! style) and a mock mode:
//!
//! - `*_with_mocks(name)`: mock every eligible dependency
//! - `*_with_mocks_for(name, deps)`: mock exactly the listed dependencies
//! - `*_with_mocks_except(name, deps)`: mock everything eligible but the
//!   listed names
//!
//! `build()` validates the selection, generates substitutes through the
//! [`MockGenerator`] capability (default: [`SpyMockGenerator`]) and returns
//! a fresh injector in which the target is re-declared against the mixed
//! mocked/real dependency set. Everything not targeted behaves exactly as in
//! the original module; the original module is never modified.
//!
//! Constants and values are immutable configuration and can never be mocked:
//! targeting one fails immediately, asking `*_with_mocks_for` for one fails
//! at `build()`, and `*_with_mocks_except` simply never touches them.
//!
//! ## Quick Start
//!
//! ```
//! use rewire_di::{Module, ModuleRegistry, ServiceObject, ServiceValue};
//! use rewire_test::for_module;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ModuleRegistry::new());
//! let module = Module::new("checkout");
//! module
//!     .value("paymentGateway", ServiceValue::object(
//!         ServiceObject::new().with_method("charge", |_args| json!("receipt")),
//!     ))
//!     .factory("checkoutService", &["paymentGateway"], |deps| {
//!         let gateway = deps[0].clone();
//!         ServiceValue::object(ServiceObject::new().with_method("purchase", move |args| {
//!             gateway.as_object().unwrap().call("charge", args).unwrap()
//!         }))
//!     });
//! registry.register(module);
//!
//! let injector = for_module(&registry, "checkout")
//!     .unwrap()
//!     .service_with_mocks("checkoutService")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! // the gateway injected into the service is a recording stand-in
//! let service = injector.resolve("checkoutService").unwrap();
//! let result = service.as_object().unwrap().call("purchase", &[json!(12)]).unwrap();
//! assert_eq!(result, serde_json::Value::Null);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: registration introspection and the [`CatalogProvider`] seam
//! - [`eligibility`]: the pure mocking-eligibility policy
//! - [`mock`]: the [`MockGenerator`] seam and the spy implementation
//! - [`builder`]: the fluent [`ModuleBuilder`]
//! - [`logging`]: test logging initialization

pub mod builder;
pub mod catalog;
pub mod eligibility;
pub mod error;
pub mod logging;
pub mod mock;

mod rebuild;

pub use builder::{MockMode, ModuleBuilder, for_module};
pub use catalog::{CatalogProvider, InjectorCatalogProvider, ModuleCatalog, RegistrationRecord};
pub use eligibility::{is_mockable, mockable_dependencies};
pub use error::{MockBuildError, MockBuildResult};
pub use logging::init_test_logging;
pub use mock::{MockGenerator, SpyMockGenerator};

/// Re-export commonly used types
pub mod prelude {
	pub use super::builder::{MockMode, ModuleBuilder, for_module};
	pub use super::catalog::{CatalogProvider, RegistrationRecord};
	pub use super::error::{MockBuildError, MockBuildResult};
	pub use super::logging::init_test_logging;
	pub use super::mock::{MockGenerator, SpyMockGenerator};
}
