/// Service layer
///
/// Thin wrappers over the repositories. They translate entities into the
/// shapes the API returns and leave HTTP semantics to the handlers.

pub mod task;
pub mod user;
