//! Bounded retry
//!
//! A retry combinator parameterized by max attempts, an overall wall-clock
//! deadline, and a jittered backoff. The transfer path uses it to drive its
//! optimistic commit loop; anything that needs to spin on a transient
//! failure can reuse it.

use std::future::Future;
use std::time::{Duration, Instant};

use rand::Rng;

/// Delay applied between attempts: a fixed base plus a random jitter so
/// competing workers do not retry in lockstep.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub base: Duration,
    pub jitter: Duration,
}

impl Backoff {
    pub fn delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base;
        }
        self.base + rand::thread_rng().gen_range(Duration::ZERO..self.jitter)
    }
}

/// How a single attempt failed.
#[derive(Debug)]
pub enum AttemptError<E> {
    /// Worth retrying (a storage conflict lost a race).
    Transient,
    /// Terminal; retrying cannot help.
    Fatal(E),
}

/// Why the whole retry loop gave up.
#[derive(Debug)]
pub enum RetryError<E> {
    Fatal(E),
    DeadlineElapsed { attempts: u32, waited: Duration },
    AttemptsExhausted { attempts: u32, waited: Duration },
}

/// Retry budget for one logical operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub deadline: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Run `attempt` until it succeeds, fails fatally, or the budget runs
    /// out. Always makes at least one attempt, even with a zero deadline.
    pub async fn run<T, E, F, Fut>(&self, mut attempt: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
    {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        while attempts < self.max_attempts {
            if attempts > 0 && started.elapsed() >= self.deadline {
                return Err(RetryError::DeadlineElapsed {
                    attempts,
                    waited: started.elapsed(),
                });
            }

            attempts += 1;
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(AttemptError::Fatal(err)) => return Err(RetryError::Fatal(err)),
                Err(AttemptError::Transient) => {
                    tracing::debug!(attempts, "transient failure, backing off before retry");
                    tokio::time::sleep(self.backoff.delay()).await;
                }
            }
        }

        Err(RetryError::AttemptsExhausted {
            attempts,
            waited: started.elapsed(),
        })
    }
}
