use thiserror::Error;

/// Errors raised by the container
#[derive(Debug, Error)]
pub enum ContainerError {
	/// The named module was never registered
	#[error("module '{0}' is not available")]
	ModuleNotFound(String),

	/// No registration resolves under this name
	#[error("unknown provider: {0}")]
	UnknownProvider(String),

	/// Resolution re-entered a name already being resolved
	#[error("circular dependency found: {0}")]
	CircularDependency(String),
}

/// Result type for container operations
pub type ContainerResult<T> = std::result::Result<T, ContainerError>;
