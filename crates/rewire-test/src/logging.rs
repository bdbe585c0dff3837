//! Test logging utilities

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (call once).
///
/// Safe to call from every test; initialization happens on the first call
/// only, with test-mode capture enabled.
///
/// # Examples
///
/// ```
/// use rewire_test::logging::init_test_logging;
///
/// init_test_logging();
/// ```
pub fn init_test_logging() {
	INIT.call_once(|| {
		let _ = env_logger::builder().is_test(true).try_init();
	});
}
