//! Drives the image provider's submit/poll protocol as one blocking call.
//!
//! `Submitted -> Polling -> {Complete, TimedOut}`. Submission happens exactly
//! once per call because every submission is billed; only the status fetches
//! are repeated. Sleeps go through `tokio::time`, so a waiting poll never
//! blocks other requests and tests can run it on a paused clock.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::PollSettings;
use crate::error::GatewayError;
use crate::services::providers::ImageJobApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    Submitted { job_id: String },
    Polling { job_id: String, attempt: u32 },
    Complete { image_url: String },
    TimedOut,
}

pub struct ImagePoller<'a> {
    api: &'a dyn ImageJobApi,
    settings: PollSettings,
}

impl<'a> ImagePoller<'a> {
    pub fn new(api: &'a dyn ImageJobApi, settings: PollSettings) -> Self {
        Self { api, settings }
    }

    /// Submits `prompt` and waits for the finished image URL.
    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let job_id = self.api.submit(prompt).await?;
        info!(job_id = %job_id, "image generation submitted");

        let mut state = PollState::Submitted { job_id };
        loop {
            state = match state {
                PollState::Complete { image_url } => return Ok(image_url),
                PollState::TimedOut => return Err(GatewayError::TimedOut),
                other => self.step(other).await?,
            };
        }
    }

    /// Advances one transition. Terminal states are returned unchanged.
    pub async fn step(&self, state: PollState) -> Result<PollState, GatewayError> {
        match state {
            PollState::Submitted { job_id } => Ok(PollState::Polling { job_id, attempt: 0 }),
            PollState::Polling { job_id, attempt } => {
                if attempt >= self.settings.max_attempts {
                    warn!(job_id = %job_id, attempts = attempt, "image generation timed out");
                    return Ok(PollState::TimedOut);
                }

                sleep(self.settings.interval).await;
                let attempt = attempt + 1;

                match self.api.fetch(&job_id).await {
                    Ok(Some(snapshot)) => {
                        if let Some(url) = snapshot.completed_image() {
                            info!(job_id = %job_id, attempt, "image generation complete");
                            return Ok(PollState::Complete {
                                image_url: url.to_string(),
                            });
                        }
                        debug!(
                            job_id = %job_id,
                            attempt,
                            status = ?snapshot.status,
                            "image generation still running"
                        );
                    }
                    Ok(None) => debug!(job_id = %job_id, attempt, "transient status failure"),
                    Err(err) => {
                        warn!(job_id = %job_id, attempt, error = %err, "status fetch failed")
                    }
                }

                Ok(PollState::Polling { job_id, attempt })
            }
            terminal => Ok(terminal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::JobSnapshot;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedJobs {
        submit: Mutex<Option<Result<String, GatewayError>>>,
        replies: Mutex<VecDeque<Option<JobSnapshot>>>,
        broken_fetches: AtomicU32,
        submits: AtomicU32,
        fetches: AtomicU32,
    }

    impl ScriptedJobs {
        fn new(replies: Vec<Option<JobSnapshot>>) -> Self {
            Self {
                submit: Mutex::new(Some(Ok("job-1".to_string()))),
                replies: Mutex::new(replies.into()),
                broken_fetches: AtomicU32::new(0),
                submits: AtomicU32::new(0),
                fetches: AtomicU32::new(0),
            }
        }

        fn failing_submit(error: GatewayError) -> Self {
            let jobs = Self::new(Vec::new());
            *jobs.submit.lock().unwrap() = Some(Err(error));
            jobs
        }

        fn with_broken_fetches(self, count: u32) -> Self {
            self.broken_fetches.store(count, Ordering::SeqCst);
            self
        }
    }

    #[async_trait]
    impl ImageJobApi for ScriptedJobs {
        async fn submit(&self, _prompt: &str) -> Result<String, GatewayError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            self.submit
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(GatewayError::Internal("submitted twice".into())))
        }

        async fn fetch(&self, job_id: &str) -> Result<Option<JobSnapshot>, GatewayError> {
            assert_eq!(job_id, "job-1");
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let broken = self
                .broken_fetches
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1));
            if broken.is_ok() {
                return Err(GatewayError::MalformedProviderResponse("truncated body".into()));
            }
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Some(running())))
        }
    }

    fn running() -> JobSnapshot {
        JobSnapshot {
            status: Some("PROCESSING".into()),
            progress: Some(serde_json::json!(30)),
            ..Default::default()
        }
    }

    fn done(uri: Option<&str>) -> JobSnapshot {
        JobSnapshot {
            status: Some("DONE".into()),
            uri: uri.map(ToString::to_string),
            ..Default::default()
        }
    }

    fn fast() -> PollSettings {
        PollSettings {
            max_attempts: 24,
            interval: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn returns_image_once_done() {
        let jobs = ScriptedJobs::new(vec![Some(running()), Some(done(Some("https://cdn/img.png")))]);
        let url = ImagePoller::new(&jobs, fast()).generate("prompt").await.unwrap();
        assert_eq!(url, "https://cdn/img.png");
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 2);
        assert_eq!(jobs.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_failures_count_as_attempts() {
        let jobs = ScriptedJobs::new(vec![None, None, Some(done(Some("https://cdn/ok.png")))]);
        let url = ImagePoller::new(&jobs, fast()).generate("prompt").await.unwrap();
        assert_eq!(url, "https://cdn/ok.png");
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fetch_errors_do_not_abandon_the_job() {
        let jobs = ScriptedJobs::new(vec![Some(done(Some("https://cdn/kept.png")))])
            .with_broken_fetches(2);
        let url = ImagePoller::new(&jobs, fast()).generate("prompt").await.unwrap();
        assert_eq!(url, "https://cdn/kept.png");
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 3);
        assert_eq!(jobs.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn broken_fetches_still_time_out() {
        let jobs = ScriptedJobs::new(Vec::new()).with_broken_fetches(u32::MAX);
        let result = ImagePoller::new(&jobs, fast()).generate("prompt").await;
        assert!(matches!(result, Err(GatewayError::TimedOut)));
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 24);
    }

    #[tokio::test]
    async fn done_without_locator_keeps_polling() {
        let jobs = ScriptedJobs::new(vec![Some(done(None)), Some(done(Some("https://cdn/late.png")))]);
        let url = ImagePoller::new(&jobs, fast()).generate("prompt").await.unwrap();
        assert_eq!(url, "https://cdn/late.png");
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let jobs = ScriptedJobs::new(Vec::new());
        let started = tokio::time::Instant::now();

        let result = ImagePoller::new(&jobs, PollSettings::default())
            .generate("prompt")
            .await;

        assert!(matches!(result, Err(GatewayError::TimedOut)));
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 24);
        assert_eq!(jobs.submits.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::from_millis(24 * 2_500));
    }

    #[tokio::test]
    async fn submit_errors_are_not_retried() {
        let jobs = ScriptedJobs::failing_submit(GatewayError::NoJobId);
        let result = ImagePoller::new(&jobs, fast()).generate("prompt").await;
        assert!(matches!(result, Err(GatewayError::NoJobId)));
        assert_eq!(jobs.submits.load(Ordering::SeqCst), 1);
        assert_eq!(jobs.fetches.load(Ordering::SeqCst), 0);

        let jobs = ScriptedJobs::failing_submit(GatewayError::RateLimited("429".into()));
        let result = ImagePoller::new(&jobs, fast()).generate("prompt").await;
        assert!(matches!(result, Err(GatewayError::RateLimited(_))));
        assert_eq!(jobs.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn step_walks_the_state_machine() {
        let jobs = ScriptedJobs::new(vec![Some(done(Some("https://cdn/s.png")))]);
        let poller = ImagePoller::new(&jobs, fast());

        let state = poller
            .step(PollState::Submitted { job_id: "job-1".into() })
            .await
            .unwrap();
        assert_eq!(state, PollState::Polling { job_id: "job-1".into(), attempt: 0 });

        let state = poller.step(state).await.unwrap();
        assert_eq!(state, PollState::Complete { image_url: "https://cdn/s.png".into() });

        let exhausted = PollState::Polling { job_id: "job-1".into(), attempt: 24 };
        assert_eq!(poller.step(exhausted).await.unwrap(), PollState::TimedOut);
    }
}
