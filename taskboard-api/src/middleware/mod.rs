/// Middleware modules for the API server
///
/// - `security`: security response headers on every route

pub mod security;
