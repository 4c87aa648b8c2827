// SQL module tests - function behaviour through the public dispatch API

// SQL function tests
pub mod functions;
