//! Mock generation: call-recording substitutes
//!
//! A substitute keeps the original's call surface (the same method names,
//! or the same bare-callable shape) while every invocation lands in a
//! [`rewire_di::CallLog`]. Opaque payloads have nothing callable to observe
//! and pass through untouched.

use rewire_di::{ServiceFunction, ServiceObject, ServiceValue};
use serde_json::Value;

/// Injected mock-generation capability.
pub trait MockGenerator: Send + Sync {
	/// Produce a substitute with the same call surface as `original`.
	fn generate(&self, original: &ServiceValue) -> ServiceValue;
}

/// Default [`MockGenerator`]: recording stand-ins that return `null`.
///
/// # Examples
///
/// ```
/// use rewire_di::{ServiceObject, ServiceValue};
/// use rewire_test::{MockGenerator, SpyMockGenerator};
/// use serde_json::{json, Value};
///
/// let original = ServiceValue::object(
///     ServiceObject::new().with_method("send", |_args| json!("sent")),
/// );
///
/// let substitute = SpyMockGenerator::new().generate(&original);
/// let send = substitute.as_object().unwrap().method("send").unwrap();
///
/// assert_eq!(send.invoke(&[json!("payload")]), Value::Null);
/// assert!(send.call_log().unwrap().was_called_with(&[json!("payload")]));
/// ```
#[derive(Debug, Default)]
pub struct SpyMockGenerator;

impl SpyMockGenerator {
	pub fn new() -> Self {
		Self
	}
}

impl MockGenerator for SpyMockGenerator {
	fn generate(&self, original: &ServiceValue) -> ServiceValue {
		match original {
			ServiceValue::Object(object) => {
				let mut substitute = ServiceObject::new();
				for name in object.method_names() {
					substitute.insert(name, ServiceFunction::recording(|_args| Value::Null));
				}
				ServiceValue::object(substitute)
			}
			ServiceValue::Function(_) => {
				ServiceValue::function(ServiceFunction::recording(|_args| Value::Null))
			}
			ServiceValue::Opaque(_) => original.clone(),
		}
	}
}
