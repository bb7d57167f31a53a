//! Bounded retry with linear backoff.
//!
//! Used for the Sheets API client initialization: after the first failure the
//! operation is re-run up to `max_retries` times, waiting
//! `step_ms * retry_number` before each retry (2000, 4000, 6000 ms by default).

use std::future::Future;

use crate::constants::{API_INIT_MAX_RETRIES, API_INIT_RETRY_STEP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub step_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: API_INIT_MAX_RETRIES,
            step_ms: API_INIT_RETRY_STEP_MS,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, step_ms: u32) -> Self {
        Self { max_retries, step_ms }
    }

    /// Delay before retry number `retry` (1-based), or `None` once the budget
    /// is spent.
    pub fn delay_for(&self, retry: u32) -> Option<u32> {
        if retry == 0 || retry > self.max_retries {
            return None;
        }
        Some(self.step_ms.saturating_mul(retry))
    }

    /// Run `op` until it succeeds or the retry budget is exhausted. `sleep`
    /// receives the delay in milliseconds; in the browser it is a
    /// `gloo_timers` timeout, in tests a recorder.
    ///
    /// Returns the last error when every attempt failed.
    pub async fn run<T, E, Op, OpFut, Sleep, SleepFut>(
        &self,
        mut op: Op,
        mut sleep: Sleep,
    ) -> Result<T, E>
    where
        Op: FnMut(u32) -> OpFut,
        OpFut: Future<Output = Result<T, E>>,
        Sleep: FnMut(u32) -> SleepFut,
        SleepFut: Future<Output = ()>,
        E: std::fmt::Display,
    {
        let mut retry = 0;
        loop {
            match op(retry).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    retry += 1;
                    match self.delay_for(retry) {
                        Some(delay) => {
                            log::warn!(
                                "attempt {} failed ({}), retrying in {} ms",
                                retry,
                                err,
                                delay
                            );
                            sleep(delay).await;
                        }
                        None => return Err(err),
                    }
                }
            }
        }
    }
}
