//! Career recommendation: a prompt built from a short profile, sent to an
//! external text-completion service with a bounded number of attempts.
//!
//! Fine-tuning of the hosted model is managed on the service side.

use std::thread;
use std::time::Duration;

use thiserror::Error;

pub mod client;

pub use client::HostedCompletionClient;

/// How many times the service is called before giving up.
pub const MAX_ATTEMPTS: u32 = 3;
/// Fixed pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Anything that turns a prompt into a completion.
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("fill in at least one profile field")]
    EmptyProfile,

    #[error("recommendation service failed after {attempts} attempts: {source:#}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            delay: RETRY_DELAY,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile and prompt
// ---------------------------------------------------------------------------

/// Free-text answers from the career form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerProfile {
    pub interests: String,
    pub skills: String,
    pub degree: String,
    pub employment_status: String,
}

impl CareerProfile {
    pub fn is_blank(&self) -> bool {
        [
            &self.interests,
            &self.skills,
            &self.degree,
            &self.employment_status,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }

    /// The single prompt sent to the completion service.
    pub fn prompt(&self) -> String {
        format!(
            "### Instruction: Suggest a suitable career path in the Indian IT industry \
             for the person described below, and name the skills they should learn next.\n\n\
             ### Interests: {}\n\
             ### Skills: {}\n\
             ### Degree: {}\n\
             ### Employment status: {}\n\n\
             ### Response:",
            self.interests.trim(),
            self.skills.trim(),
            self.degree.trim(),
            self.employment_status.trim(),
        )
    }
}

/// Ask `service` for a recommendation, retrying failed calls per `policy`.
///
/// Blocks the calling thread for up to `(max_attempts - 1) * delay` plus the
/// time spent in the calls themselves.
pub fn recommend(
    service: &dyn CompletionService,
    profile: &CareerProfile,
    policy: RetryPolicy,
) -> Result<String, RecommendError> {
    if profile.is_blank() {
        return Err(RecommendError::EmptyProfile);
    }
    let prompt = profile.prompt();
    let attempts = policy.max_attempts.max(1);

    let mut attempt = 1;
    loop {
        match service.complete(&prompt) {
            Ok(text) => {
                log::info!("Recommendation received on attempt {attempt}");
                return Ok(text.trim().to_string());
            }
            Err(e) if attempt < attempts => {
                log::warn!(
                    "Recommendation attempt {attempt}/{attempts} failed: {e:#}; retrying in {}s",
                    policy.delay.as_secs_f32()
                );
                thread::sleep(policy.delay);
                attempt += 1;
            }
            Err(e) => {
                log::error!("Recommendation failed after {attempts} attempts: {e:#}");
                return Err(RecommendError::Exhausted {
                    attempts,
                    source: e,
                });
            }
        }
    }
}
