use crate::{auth::CredentialGate, storage::UploadRelay};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<CredentialGate>,
    pub relay: Arc<UploadRelay>,
}

impl AppState {
    pub fn new(gate: Arc<CredentialGate>, relay: Arc<UploadRelay>) -> Self {
        Self { gate, relay }
    }
}
