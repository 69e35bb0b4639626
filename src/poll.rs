// Bounded poll-until-terminal engine. One loop serves both the search job
// and the reservation job; only the classifier differs.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Classification of a single poll response.
#[derive(Debug)]
pub enum PollState<P, T> {
    /// The job is still producing; keep the partial payload and poll again
    /// after the configured delay.
    Continuing(P),
    /// The job finished; stop immediately with this final payload.
    Terminal(T),
    /// The job stopped without succeeding. Polling ends immediately without
    /// consuming the remaining budget; the caller interprets what the
    /// outcome means.
    Indeterminate,
}

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            delay: Duration::from_secs(2),
        }
    }
}

/// How a poll loop ended. `attempts` starts at 1 and is exposed for
/// reporting only.
#[derive(Debug)]
pub enum PollOutcome<P, T> {
    Completed {
        partials: Vec<P>,
        last: T,
        attempts: u32,
    },
    Indeterminate {
        partials: Vec<P>,
        attempts: u32,
    },
}

#[derive(Error, Debug)]
pub enum PollError<E> {
    #[error("no terminal state after {attempts} poll attempts")]
    BudgetExceeded { attempts: u32 },

    #[error("poll action failed: {0}")]
    Action(E),
}

/// Repeatedly runs `action`, classifies each response, and stops on the
/// first terminal or indeterminate classification. Action errors propagate
/// immediately; only the terminal-state wait is retried.
///
/// The sleep between attempts is a plain `tokio::time::sleep`, so wrapping
/// the returned future in `tokio::time::timeout` bounds total wall-clock
/// time including mid-delay.
pub async fn poll_until_terminal<F, Fut, R, E, C, P, T>(
    mut action: F,
    mut classify: C,
    config: PollConfig,
) -> Result<PollOutcome<P, T>, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    C: FnMut(R) -> PollState<P, T>,
{
    let mut partials = Vec::new();

    for attempt in 1..=config.max_attempts {
        let response = action().await.map_err(PollError::Action)?;
        match classify(response) {
            PollState::Continuing(partial) => {
                partials.push(partial);
                tokio::time::sleep(config.delay).await;
            }
            PollState::Terminal(last) => {
                return Ok(PollOutcome::Completed {
                    partials,
                    last,
                    attempts: attempt,
                });
            }
            PollState::Indeterminate => {
                return Ok(PollOutcome::Indeterminate {
                    partials,
                    attempts: attempt,
                });
            }
        }
    }

    Err(PollError::BudgetExceeded {
        attempts: config.max_attempts,
    })
}
