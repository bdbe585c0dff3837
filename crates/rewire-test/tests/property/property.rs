//! Property-based tests for mock-set selection

mod mock_selection_properties;
