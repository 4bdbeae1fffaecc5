use pretty_assertions::assert_eq;
use pumukit_model::{MultimediaObject, Track};
use pumukit_types::{EmbeddedId, MultimediaObjectId};
use pumukit_workflow::{
    InMemoryJobQueue, JobId, JobOutcome, JobQueue, JobRequest, WorkflowConfig, WorkflowError,
    WorkflowService,
};

fn object_with_tracks(tracks: Vec<Track>) -> MultimediaObject {
    let mut mm = MultimediaObject::new(MultimediaObjectId::new(), "Lecture");
    for track in tracks {
        mm.add_track(track).unwrap();
    }
    mm
}

fn sbs_track(path: &str) -> Track {
    Track::new(EmbeddedId::new(), path).with_tag("sbs").with_language("es")
}

fn service() -> WorkflowService<InMemoryJobQueue> {
    WorkflowService::new(WorkflowConfig::default(), InMemoryJobQueue::new())
}

// ── Config ───────────────────────────────────────────────────────

#[test]
fn default_config() {
    let config = WorkflowConfig::default();
    assert_eq!(config.target_profile, "video_h264");
    assert_eq!(config.job_priority, 2);
    assert_eq!(config.source_tag, "sbs");
    assert!(config.has_target_profile());
    assert_eq!(config.target_tag(), "profile:video_h264");
    assert!(config.validate().is_ok());
}

#[test]
fn config_from_toml_keeps_defaults_for_missing_keys() {
    let config: WorkflowConfig = toml::from_str(
        r#"
        target_profile = "mp4_hd"
        profiles = ["mp4_hd", "mp4_sd"]
        "#,
    )
    .unwrap();
    assert_eq!(config.target_profile, "mp4_hd");
    assert!(config.has_target_profile());
    assert_eq!(config.job_priority, 2);
    assert_eq!(config.source_tag, "sbs");
}

#[test]
fn blank_names_fail_validation() {
    let config = WorkflowConfig {
        source_tag: "  ".into(),
        ..WorkflowConfig::default()
    };
    assert!(matches!(config.validate(), Err(WorkflowError::ConfigInvalid(_))));
}

// ── Queue ────────────────────────────────────────────────────────

#[test]
fn queue_deduplicates_on_object_profile_and_path() {
    let queue = InMemoryJobQueue::new();
    let object = MultimediaObjectId::new();
    let request = JobRequest {
        multimedia_object_id: object,
        profile: "video_h264".into(),
        path: "/sbs.mp4".into(),
        priority: 2,
        language: None,
    };

    assert_eq!(queue.add_unique_job(request.clone()).unwrap(), JobOutcome::Created(JobId(1)));

    let higher_priority = JobRequest {
        priority: 9,
        ..request.clone()
    };
    assert_eq!(queue.add_unique_job(higher_priority).unwrap(), JobOutcome::AlreadyQueued(JobId(1)));

    let other_path = JobRequest {
        path: "/other.mp4".into(),
        ..request
    };
    assert_eq!(queue.add_unique_job(other_path).unwrap(), JobOutcome::Created(JobId(2)));
    assert_eq!(queue.len().unwrap(), 2);
}

#[test]
fn outcome_accessors() {
    assert_eq!(JobOutcome::AlreadyQueued(JobId(4)).job_id(), JobId(4));
    assert!(JobOutcome::Created(JobId(1)).is_created());
    assert!(!JobOutcome::AlreadyQueued(JobId(1)).is_created());
    assert_eq!(JobId(7).to_string(), "job-7");
}

// ── Service ──────────────────────────────────────────────────────

#[test]
fn requests_job_from_source_track() {
    let service = service();
    let mm = object_with_tracks(vec![
        Track::new(EmbeddedId::new(), "/master.mov").with_tag("master"),
        sbs_track("/sbs.mp4"),
    ]);

    let outcome = service.on_multimedia_object_update(&mm).unwrap();
    assert_eq!(outcome, Some(JobOutcome::Created(JobId(1))));

    let jobs = service.queue().jobs().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(
        jobs[0].request,
        JobRequest {
            multimedia_object_id: mm.id,
            profile: "video_h264".into(),
            path: "/sbs.mp4".into(),
            priority: 2,
            language: Some("es".into()),
        }
    );
}

#[test]
fn repeated_events_do_not_duplicate_jobs() {
    let service = service();
    let mm = object_with_tracks(vec![sbs_track("/sbs.mp4")]);

    service.on_multimedia_object_update(&mm).unwrap();
    let outcome = service.on_job_success(&mm).unwrap();
    assert_eq!(outcome, Some(JobOutcome::AlreadyQueued(JobId(1))));
    assert_eq!(service.queue().len().unwrap(), 1);
}

#[test]
fn first_source_track_wins() {
    let service = service();
    let mm = object_with_tracks(vec![sbs_track("/first.mp4"), sbs_track("/second.mp4")]);
    service.check_multimedia_object(&mm).unwrap();
    assert_eq!(service.queue().jobs().unwrap()[0].request.path, "/first.mp4");
}

#[test]
fn no_job_when_target_rendition_exists() {
    let service = service();
    let mm = object_with_tracks(vec![
        sbs_track("/sbs.mp4"),
        Track::new(EmbeddedId::new(), "/h264.mp4").with_tag("profile:video_h264"),
    ]);
    assert_eq!(service.on_job_success(&mm).unwrap(), None);
    assert_eq!(service.queue().len().unwrap(), 0);
}

#[test]
fn no_job_without_source_track() {
    let service = service();
    let mm = object_with_tracks(vec![Track::new(EmbeddedId::new(), "/master.mov")]);
    assert_eq!(service.on_multimedia_object_update(&mm).unwrap(), None);
    assert_eq!(service.queue().len().unwrap(), 0);
}

#[test]
fn unknown_target_profile_skips() {
    let config = WorkflowConfig {
        target_profile: "missing".into(),
        ..WorkflowConfig::default()
    };
    let service = WorkflowService::new(config, InMemoryJobQueue::new());
    let mm = object_with_tracks(vec![sbs_track("/sbs.mp4")]);
    assert_eq!(service.on_multimedia_object_update(&mm).unwrap(), None);
    assert_eq!(service.queue().len().unwrap(), 0);
}

#[test]
fn custom_source_tag_and_priority() {
    let config = WorkflowConfig {
        source_tag: "master".into(),
        job_priority: 5,
        ..WorkflowConfig::default()
    };
    let service = WorkflowService::new(config, InMemoryJobQueue::new());
    let mm = object_with_tracks(vec![
        sbs_track("/sbs.mp4"),
        Track::new(EmbeddedId::new(), "/master.mov").with_tag("master"),
    ]);
    service.check_multimedia_object(&mm).unwrap();
    let job = &service.queue().jobs().unwrap()[0];
    assert_eq!(job.request.path, "/master.mov");
    assert_eq!(job.request.priority, 5);
    assert_eq!(job.request.language, None);
}

struct FailingQueue;

impl JobQueue for FailingQueue {
    fn add_unique_job(&self, _request: JobRequest) -> Result<JobOutcome, WorkflowError> {
        Err(WorkflowError::Queue("encoder offline".into()))
    }
}

#[test]
fn queue_errors_propagate() {
    let service = WorkflowService::new(WorkflowConfig::default(), FailingQueue);
    let mm = object_with_tracks(vec![sbs_track("/sbs.mp4")]);
    assert!(matches!(
        service.on_multimedia_object_update(&mm),
        Err(WorkflowError::Queue(_))
    ));
}
