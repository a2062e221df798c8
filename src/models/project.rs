use serde::{Deserialize, Serialize};

use super::TransitNetwork;

/// Identity and bookkeeping for a saved network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectMetadata {
    #[must_use]
    pub fn new_with_name(name: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self::new_with_name("Untitled network")
    }
}

/// The unit of persistence: one named transit network
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub metadata: ProjectMetadata,
    pub network: TransitNetwork,
}

impl Project {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn new_with_name(name: String) -> Self {
        Self {
            metadata: ProjectMetadata::new_with_name(&name),
            network: TransitNetwork::new(),
        }
    }

    /// Record that the project changed
    pub fn touch(&mut self) {
        self.metadata.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
