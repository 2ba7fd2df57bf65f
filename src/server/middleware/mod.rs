//! Session wrappers and the login guard used by the web endpoints.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
