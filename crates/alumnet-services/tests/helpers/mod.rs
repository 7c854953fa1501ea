#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alumnet_core::models::{Role, StoredMetadata};
use alumnet_core::PortalConfig;
use alumnet_services::seed::{self, ADMIN_EMAIL, ADMIN_PASSWORD, ALUMNI_PASSWORD};
use alumnet_services::{PortalState, Session, UploadFile};
use alumnet_storage::{DocumentStore, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use tokio::time::Instant;

pub const ALUMNI_EMAIL: &str = "priya.nair@alumni.edu";

/// Store whose blob writes follow a script: `true` succeeds, `false` fails transiently.
/// Calls past the end of the script succeed.
pub struct ScriptedStore {
    script: Mutex<Vec<bool>>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedStore {
    pub fn failing_times(failures: usize) -> Self {
        Self {
            script: Mutex::new(vec![false; failures]),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for ScriptedStore {
    async fn store(&self, path: &str, _data: Bytes, _content_type: &str) -> StorageResult<String> {
        self.calls.lock().unwrap().push(Instant::now());
        let mut script = self.script.lock().unwrap();
        let ok = if script.is_empty() {
            true
        } else {
            script.remove(0)
        };
        if ok {
            Ok(path.to_string())
        } else {
            Err(StorageError::Unavailable("503 from remote store".to_string()))
        }
    }

    async fn insert_metadata(&self, metadata: &StoredMetadata) -> StorageResult<String> {
        Ok(metadata.record_id.to_string())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Simulated
    }
}

/// Portal over `store` with the seeded identities and otherwise empty repositories
pub fn portal_with(store: Arc<dyn DocumentStore>) -> PortalState {
    let identities = seed::identities().expect("seed identities");
    PortalState::new(PortalConfig::default(), store, Arc::new(identities))
}

pub fn admin(portal: &PortalState) -> Session {
    portal
        .login(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin)
        .expect("admin login")
}

pub fn alumni(portal: &PortalState) -> Session {
    portal
        .login(ALUMNI_EMAIL, ALUMNI_PASSWORD, Role::Alumni)
        .expect("alumni login")
}

pub fn pdf(size: usize) -> UploadFile {
    UploadFile::new("transcript.pdf", "application/pdf", vec![b'%'; size])
}
