//! Login gate
//!
//! A plain comparison against the configured credentials. This is a
//! navigation gate for the console, not a security boundary.

use crate::config::Credentials;

pub fn check_credentials(username: &str, password: &str, expected: &Credentials) -> bool {
    username == expected.username && password == expected.password
}
