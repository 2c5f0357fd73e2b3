use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::gateway::{ContentGateway, EntryType, RemoteEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFile {
    pub path: String,
    pub filename: String,
    pub content: String,
    pub commit_message: String,
}

/// In-memory gateway. References are `fake://<path>`.
#[derive(Default)]
pub struct FakeGateway {
    pub entries: Vec<RemoteEntry>,
    pub files: HashMap<String, String>,
    pub failing: HashSet<String>,
    pub list_error: Option<fn() -> GatewayError>,
    pub writes: Mutex<Vec<WrittenFile>>,
    pub listed: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        let reference = self.reference_for(path);
        self.entries.push(RemoteEntry {
            name,
            path: path.to_string(),
            reference: reference.clone(),
            entry_type: EntryType::File,
        });
        self.files.insert(reference, content.to_string());
        self
    }

    pub fn with_entry(mut self, name: &str, entry_type: EntryType) -> Self {
        self.entries.push(RemoteEntry {
            name: name.to_string(),
            path: name.to_string(),
            reference: self.reference_for(name),
            entry_type,
        });
        self
    }

    pub fn failing_on(mut self, path: &str) -> Self {
        let reference = self.reference_for(path);
        self.failing.insert(reference);
        self
    }

    pub fn written(&self) -> Vec<WrittenFile> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGateway for FakeGateway {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, GatewayError> {
        self.listed.lock().unwrap().push(path.to_string());
        if let Some(make_error) = self.list_error {
            return Err(make_error());
        }
        Ok(self.entries.iter()
            .filter(|entry| entry.is_markdown())
            .cloned()
            .collect())
    }

    async fn read_file(&self, reference: &str) -> Result<String, GatewayError> {
        // Let the fan-out interleave
        tokio::task::yield_now().await;
        if self.failing.contains(reference) {
            return Err(GatewayError::Transport(format!("connection reset fetching {}", reference)));
        }
        self.files.get(reference)
            .cloned()
            .ok_or_else(|| GatewayError::RemoteRejected("Not Found".to_string()))
    }

    async fn write_file(&self, path: &str, filename: &str, content: &str, commit_message: &str) -> Result<(), GatewayError> {
        self.writes.lock().unwrap().push(WrittenFile {
            path: path.to_string(),
            filename: filename.to_string(),
            content: content.to_string(),
            commit_message: commit_message.to_string(),
        });
        Ok(())
    }

    fn reference_for(&self, path: &str) -> String {
        format!("fake://{}", path)
    }
}
