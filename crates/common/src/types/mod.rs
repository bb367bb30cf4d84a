use serde::Serialize;

/// Payload returned by the `/health` route of both services.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Health {
    pub status: &'static str,
}
