//! Test utilities for ArangoMap integration tests
//!
//! - MockSession: scripted in-memory transport that records every request
//! - TestFixture: connection, registry and reporter wired to a MockSession

#![allow(dead_code)]

pub mod mock_session;
pub mod test_fixture;
