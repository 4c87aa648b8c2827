// SQL Function Tests
// Tests for SQL function implementations

pub mod conditional_functions_test;
pub mod date_functions_test;
pub mod network_functions_test;
pub mod registry_test;
pub mod string_functions_test;
pub mod timestampdiff_test;
