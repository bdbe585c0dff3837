//! # Rewire
//!
//! Test-support engine for string-keyed dependency-injection modules:
//! instantiate "service X, but with dependencies A and B replaced by
//! call-recording mocks" without hand-writing a parallel module definition.
//!
//! The facade re-exports the two workspace crates:
//!
//! - `rewire-di`: the synchronous DI container, with modules, a registry, an
//!   injector and the dynamic [`ServiceValue`] model mocking builds on
//! - `rewire-test`: the engine itself, with the registration catalog, the
//!   eligibility policy, mock generation and the fluent [`ModuleBuilder`]
//!
//! ## Example
//!
//! ```
//! use rewire::{Module, ModuleRegistry, ServiceObject, ServiceValue, for_module};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(ModuleRegistry::new());
//! let module = Module::new("newsletter");
//! module
//!     .factory("mailer", &[], |_| {
//!         ServiceValue::object(ServiceObject::new().with_method("send", |_| json!("sent")))
//!     })
//!     .factory("digest", &["mailer"], |deps| deps[0].clone());
//! registry.register(module);
//!
//! let injector = for_module(&registry, "newsletter")
//!     .unwrap()
//!     .service_with_mocks("digest")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! // the digest got a recording stand-in, the module's own mailer is untouched
//! let digest = injector.resolve("digest").unwrap();
//! assert!(digest.as_object().unwrap().method("send").unwrap().is_recording());
//! let mailer = injector.resolve("mailer").unwrap();
//! assert!(!mailer.as_object().unwrap().method("send").unwrap().is_recording());
//! ```

pub use rewire_di::{
	CallLog, CallRecord, ContainerError, ContainerResult, Declaration, FactoryFn, Injector,
	MethodFn, Module, ModuleRegistry, ProviderKind, Registration, ServiceFunction, ServiceObject,
	ServiceValue,
};
pub use rewire_test::{
	CatalogProvider, InjectorCatalogProvider, MockBuildError, MockBuildResult, MockGenerator,
	MockMode, ModuleBuilder, ModuleCatalog, RegistrationRecord, SpyMockGenerator, for_module,
	init_test_logging,
};

/// Re-export commonly used types
pub mod prelude {
	pub use rewire_di::{Injector, Module, ModuleRegistry, ServiceObject, ServiceValue};
	pub use rewire_test::prelude::*;
}
