//! Error types for the service layer.

/// Errors talking to the engine actor.
///
/// A rejected game operation is NOT a `ServiceError`: it comes back as a
/// receipt with a `Rejected` outcome. This type only covers the plumbing.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The actor's command channel is closed (the actor shut down) or it
    /// dropped the reply channel.
    #[error("engine is unavailable")]
    Unavailable,
}
