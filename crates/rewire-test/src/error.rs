use rewire_di::ContainerError;
use thiserror::Error;

/// Errors raised while configuring or building a mocked module
#[derive(Debug, Error)]
pub enum MockBuildError {
	/// The mock target is a constant or value registration
	#[error("services declared with \"constant\" or \"value\" are not supported: {0}")]
	UnsupportedRegistrationKind(String),

	/// An explicitly listed dependency cannot be mocked into the target
	#[error("could not mock the dependency explicitly asked to mock: {0}")]
	NonMockableDependency(String),

	/// A builder accepts exactly one mock target
	#[error("a mock target is already configured: {0}")]
	TargetAlreadyConfigured(String),

	/// Container failure, surfaced unmodified
	#[error(transparent)]
	Container(#[from] ContainerError),
}

/// Result type for mock-build operations
pub type MockBuildResult<T> = std::result::Result<T, MockBuildError>;
