//! Common test utilities: transport stubs and a mock HTTP endpoint

pub mod mock_server;
pub mod stubs;
