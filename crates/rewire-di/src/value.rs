//! Injectable value model
//!
//! Everything an injector hands out is a [`ServiceValue`]: an opaque typed
//! payload, an object exposing named methods, or a bare callable. Method
//! arguments and return values are `serde_json::Value`s so a value's call
//! surface can be walked and replaced without knowing concrete types.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Call record for one invocation of a service method
#[derive(Debug, Clone)]
pub struct CallRecord {
	pub args: Vec<serde_json::Value>,
	pub timestamp: std::time::Instant,
}

/// Invocation history of a recording [`ServiceFunction`].
#[derive(Debug, Default)]
pub struct CallLog {
	calls: Mutex<Vec<CallRecord>>,
}

impl CallLog {
	pub fn new() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
		}
	}

	/// Append one invocation to the log.
	pub fn record(&self, args: Vec<serde_json::Value>) {
		let record = CallRecord {
			args,
			timestamp: std::time::Instant::now(),
		};
		self.calls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(record);
	}

	pub fn call_count(&self) -> usize {
		self.calls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn was_called(&self) -> bool {
		self.call_count() > 0
	}

	/// Check whether the log contains an invocation with exactly these arguments.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::CallLog;
	/// use serde_json::json;
	///
	/// let log = CallLog::new();
	/// log.record(vec![json!("a"), json!(1)]);
	///
	/// assert!(log.was_called_with(&[json!("a"), json!(1)]));
	/// assert!(!log.was_called_with(&[json!("b")]));
	/// ```
	pub fn was_called_with(&self, args: &[serde_json::Value]) -> bool {
		let calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
		calls.iter().any(|record| record.args == args)
	}

	/// Snapshot of all recorded invocations, oldest first.
	pub fn calls(&self) -> Vec<CallRecord> {
		self.calls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	pub fn last_call_args(&self) -> Option<Vec<serde_json::Value>> {
		self.calls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.last()
			.map(|record| record.args.clone())
	}

	pub fn reset(&self) {
		self.calls
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.clear();
	}
}

/// Boxed method body shared by every clone of a [`ServiceFunction`].
pub type MethodFn = Arc<dyn Fn(&[serde_json::Value]) -> serde_json::Value + Send + Sync>;

/// A callable service member.
///
/// Cloning is shallow: clones share the underlying function and, when
/// present, the call log. A function constructed with [`ServiceFunction::recording`]
/// appends every invocation to its [`CallLog`] before running the body.
#[derive(Clone)]
pub struct ServiceFunction {
	f: MethodFn,
	log: Option<Arc<CallLog>>,
}

impl ServiceFunction {
	/// Create a plain, non-recording function.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::ServiceFunction;
	/// use serde_json::json;
	///
	/// let double = ServiceFunction::new(|args| json!(args[0].as_i64().unwrap_or(0) * 2));
	/// assert_eq!(double.invoke(&[json!(21)]), json!(42));
	/// assert!(double.call_log().is_none());
	/// ```
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&[serde_json::Value]) -> serde_json::Value + Send + Sync + 'static,
	{
		Self {
			f: Arc::new(f),
			log: None,
		}
	}

	/// Create a function that records every invocation.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::ServiceFunction;
	/// use serde_json::{json, Value};
	///
	/// let stub = ServiceFunction::recording(|_args| Value::Null);
	/// stub.invoke(&[json!("hello")]);
	///
	/// let log = stub.call_log().unwrap();
	/// assert_eq!(log.call_count(), 1);
	/// assert!(log.was_called_with(&[json!("hello")]));
	/// ```
	pub fn recording<F>(f: F) -> Self
	where
		F: Fn(&[serde_json::Value]) -> serde_json::Value + Send + Sync + 'static,
	{
		Self {
			f: Arc::new(f),
			log: Some(Arc::new(CallLog::new())),
		}
	}

	/// Invoke the function, recording the call first when a log is attached.
	pub fn invoke(&self, args: &[serde_json::Value]) -> serde_json::Value {
		if let Some(log) = &self.log {
			log.record(args.to_vec());
		}
		(self.f)(args)
	}

	pub fn is_recording(&self) -> bool {
		self.log.is_some()
	}

	pub fn call_log(&self) -> Option<&Arc<CallLog>> {
		self.log.as_ref()
	}

	/// Whether two handles share the same underlying function.
	pub fn same_fn(&self, other: &ServiceFunction) -> bool {
		Arc::ptr_eq(&self.f, &other.f)
	}
}

impl fmt::Debug for ServiceFunction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ServiceFunction")
			.field("recording", &self.is_recording())
			.finish_non_exhaustive()
	}
}

/// A service instance: a bag of named methods.
///
/// Methods are kept in name order so walking an object (e.g. to build a
/// substitute with the same shape) is deterministic.
#[derive(Debug, Default)]
pub struct ServiceObject {
	methods: BTreeMap<String, ServiceFunction>,
}

impl ServiceObject {
	pub fn new() -> Self {
		Self {
			methods: BTreeMap::new(),
		}
	}

	/// Add a method during construction.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::ServiceObject;
	/// use serde_json::json;
	///
	/// let object = ServiceObject::new()
	///     .with_method("greet", |args| json!(format!("hi {}", args[0].as_str().unwrap_or(""))));
	///
	/// assert_eq!(object.call("greet", &[json!("sam")]), Some(json!("hi sam")));
	/// ```
	pub fn with_method<F>(mut self, name: &str, f: F) -> Self
	where
		F: Fn(&[serde_json::Value]) -> serde_json::Value + Send + Sync + 'static,
	{
		self.methods.insert(name.to_string(), ServiceFunction::new(f));
		self
	}

	pub fn insert(&mut self, name: impl Into<String>, method: ServiceFunction) {
		self.methods.insert(name.into(), method);
	}

	pub fn method(&self, name: &str) -> Option<&ServiceFunction> {
		self.methods.get(name)
	}

	pub fn method_names(&self) -> impl Iterator<Item = &str> {
		self.methods.keys().map(String::as_str)
	}

	/// Invoke a method by name; `None` if the object has no such method.
	pub fn call(&self, method: &str, args: &[serde_json::Value]) -> Option<serde_json::Value> {
		self.methods.get(method).map(|f| f.invoke(args))
	}

	pub fn len(&self) -> usize {
		self.methods.len()
	}

	pub fn is_empty(&self) -> bool {
		self.methods.is_empty()
	}
}

/// The one injectable value type.
///
/// Cloning is shallow and identity-preserving: clones of the same value
/// compare equal under [`ServiceValue::same_instance`].
#[derive(Clone)]
pub enum ServiceValue {
	/// An arbitrary typed payload. The usual shape of constants and values.
	Opaque(Arc<dyn Any + Send + Sync>),
	/// A method-bearing service instance.
	Object(Arc<ServiceObject>),
	/// A bare callable, e.g. a filter.
	Function(ServiceFunction),
}

impl ServiceValue {
	pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
		Self::Opaque(Arc::new(value))
	}

	pub fn object(object: ServiceObject) -> Self {
		Self::Object(Arc::new(object))
	}

	pub fn function(function: ServiceFunction) -> Self {
		Self::Function(function)
	}

	pub fn as_object(&self) -> Option<&ServiceObject> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_function(&self) -> Option<&ServiceFunction> {
		match self {
			Self::Function(function) => Some(function),
			_ => None,
		}
	}

	/// Downcast an opaque payload to a concrete type.
	///
	/// # Examples
	///
	/// ```
	/// use rewire_di::ServiceValue;
	///
	/// let value = ServiceValue::opaque(7u32);
	/// assert_eq!(*value.downcast::<u32>().unwrap(), 7);
	/// assert!(value.downcast::<String>().is_none());
	/// ```
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		match self {
			Self::Opaque(value) => Arc::clone(value).downcast::<T>().ok(),
			_ => None,
		}
	}

	/// Identity comparison: do both handles point at the same underlying value?
	pub fn same_instance(&self, other: &ServiceValue) -> bool {
		match (self, other) {
			(Self::Opaque(a), Self::Opaque(b)) => Arc::ptr_eq(a, b),
			(Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
			(Self::Function(a), Self::Function(b)) => a.same_fn(b),
			_ => false,
		}
	}
}

impl fmt::Debug for ServiceValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Opaque(_) => f.write_str("ServiceValue::Opaque(..)"),
			Self::Object(object) => f
				.debug_tuple("ServiceValue::Object")
				.field(&object.method_names().collect::<Vec<_>>())
				.finish(),
			Self::Function(function) => {
				f.debug_tuple("ServiceValue::Function").field(function).finish()
			}
		}
	}
}
