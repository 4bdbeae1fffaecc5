use crate::error::{WorkflowError, WorkflowResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration for the encoding workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Profile every object should end up with.
    pub target_profile: String,
    /// Encoder profiles known to the installation.
    pub profiles: BTreeSet<String>,
    /// Priority given to jobs requested by the workflow.
    pub job_priority: u32,
    /// Tag marking the track jobs are encoded from.
    pub source_tag: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            target_profile: "video_h264".to_string(),
            profiles: ["master_copy", "video_h264", "audio_aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            job_priority: 2,
            source_tag: "sbs".to_string(),
        }
    }
}

impl WorkflowConfig {
    /// True when the target profile is one of the known profiles.
    #[must_use]
    pub fn has_target_profile(&self) -> bool {
        self.profiles.contains(&self.target_profile)
    }

    /// Tag carried by tracks already encoded with the target profile.
    #[must_use]
    pub fn target_tag(&self) -> String {
        format!("profile:{}", self.target_profile)
    }

    /// Checks that the names used to match tracks are not blank.
    ///
    /// An unknown target profile is not an error here: the workflow logs it
    /// and skips, so a profile can be removed without breaking startup.
    pub fn validate(&self) -> WorkflowResult<()> {
        if self.target_profile.trim().is_empty() {
            return Err(WorkflowError::ConfigInvalid("target_profile is empty".into()));
        }
        if self.source_tag.trim().is_empty() {
            return Err(WorkflowError::ConfigInvalid("source_tag is empty".into()));
        }
        Ok(())
    }
}
