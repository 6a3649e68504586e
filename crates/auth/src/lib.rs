//! `jobwatch-auth` — credential verification, decoupled from HTTP and storage.

pub mod basic;
pub mod gate;

pub use basic::{encode_basic_auth, parse_basic_auth_header};
pub use gate::{AuthError, AuthGate, Credentials};
