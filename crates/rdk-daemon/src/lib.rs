//! rdk-daemon library surface.
//!
//! Exposed as a lib so the scenario tests in `tests/` can build the router
//! and state in-process without spawning the binary.

pub mod api_types;
pub mod routes;
pub mod state;
