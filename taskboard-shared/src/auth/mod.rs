/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
///
/// There is no token or session handling: signin verifies credentials and
/// returns the account, nothing more.

pub mod password;
