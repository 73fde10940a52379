use crate::error::{NclipError, Result};

/// Lists peer hosts running a clipboard server.
pub trait HostDiscovery {
    fn hosts(&mut self) -> Result<Vec<String>>;
}

/// Used when no discovery backend is available; always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl HostDiscovery for Unavailable {
    fn hosts(&mut self) -> Result<Vec<String>> {
        Err(NclipError::Discovery(
            "no discovery backend is available".to_string(),
        ))
    }
}
