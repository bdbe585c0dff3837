//! # Rewire DI
//!
//! Synchronous, string-keyed dependency injection container.
//!
//! ## Overview
//!
//! Declarations are made against named [`Module`]s in a [`ModuleRegistry`]
//! under eight registration styles (constant, value, service, factory,
//! provider, filter, directive, controller). An [`Injector`] merges one or
//! more modules into a container instance and resolves names lazily,
//! injecting dependencies positionally in declaration order.
//!
//! Injected values are [`ServiceValue`]s: opaque typed payloads, method
//! bags ([`ServiceObject`]) or bare callables ([`ServiceFunction`]). That
//! makes a value's call surface observable and substitutable at runtime,
//! which is what the `rewire-test` crate builds on.
//!
//! ## Example
//!
//! ```
//! use rewire_di::{Injector, Module, ModuleRegistry, ServiceObject, ServiceValue};
//! use serde_json::json;
//!
//! let registry = ModuleRegistry::new();
//! let module = Module::new("greetings");
//! module
//!     .value("punctuation", ServiceValue::opaque("!".to_string()))
//!     .factory("greeter", &["punctuation"], |deps| {
//!         let punctuation = deps[0].downcast::<String>().unwrap();
//!         let object = ServiceObject::new().with_method("greet", move |args| {
//!             json!(format!("hello {}{}", args[0].as_str().unwrap_or(""), punctuation))
//!         });
//!         ServiceValue::object(object)
//!     });
//! registry.register(module);
//!
//! let injector = Injector::create(&registry, &["greetings"]).unwrap();
//! let greeter = injector.resolve("greeter").unwrap();
//! let result = greeter.as_object().unwrap().call("greet", &[json!("world")]);
//! assert_eq!(result, Some(json!("hello world!")));
//! ```

pub mod error;
pub mod injector;
pub mod module;
pub mod registry;
pub mod value;

pub use error::{ContainerError, ContainerResult};
pub use injector::Injector;
pub use module::{Declaration, FactoryFn, Module, ProviderKind, Registration};
pub use registry::ModuleRegistry;
pub use value::{CallLog, CallRecord, MethodFn, ServiceFunction, ServiceObject, ServiceValue};
