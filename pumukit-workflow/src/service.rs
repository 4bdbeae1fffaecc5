use crate::config::WorkflowConfig;
use crate::error::WorkflowResult;
use crate::queue::{JobOutcome, JobQueue, JobRequest};
use pumukit_model::MultimediaObject;
use tracing::{debug, info, warn};

/// Requests target-profile encodings for objects that lack one.
pub struct WorkflowService<Q> {
    config: WorkflowConfig,
    queue: Q,
}

impl<Q: JobQueue> WorkflowService<Q> {
    pub fn new(config: WorkflowConfig, queue: Q) -> Self {
        Self { config, queue }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Called when an encoding job for `object` finished successfully.
    pub fn on_job_success(&self, object: &MultimediaObject) -> WorkflowResult<Option<JobOutcome>> {
        self.check_multimedia_object(object)
    }

    /// Called after `object` was saved.
    pub fn on_multimedia_object_update(
        &self,
        object: &MultimediaObject,
    ) -> WorkflowResult<Option<JobOutcome>> {
        self.check_multimedia_object(object)
    }

    /// Requests a target-profile job when `object` has a source track and no
    /// rendition in the target profile. Returns `None` when nothing was asked.
    pub fn check_multimedia_object(
        &self,
        object: &MultimediaObject,
    ) -> WorkflowResult<Option<JobOutcome>> {
        if !self.config.has_target_profile() {
            warn!(profile = %self.config.target_profile, "Workflow target profile doesn't exist");
            return Ok(None);
        }

        let Some(source) = object.track_with_tag(&self.config.source_tag) else {
            debug!(object_id = %object.id, tag = %self.config.source_tag, "No source track");
            return Ok(None);
        };
        if !object.tracks_with_tag(&self.config.target_tag()).is_empty() {
            debug!(object_id = %object.id, profile = %self.config.target_profile, "Target rendition present");
            return Ok(None);
        }

        info!(
            object_id = %object.id,
            profile = %self.config.target_profile,
            "Requesting encoding job from {} track",
            self.config.source_tag
        );
        let outcome = self.queue.add_unique_job(JobRequest {
            multimedia_object_id: object.id,
            profile: self.config.target_profile.clone(),
            path: source.path.clone(),
            priority: self.config.job_priority,
            language: source.language.clone(),
        })?;
        Ok(Some(outcome))
    }
}
