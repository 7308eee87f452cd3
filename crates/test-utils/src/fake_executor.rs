use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use pwatch::exec::{ExecOutput, Executor};
use pwatch::types::CommandSpec;

/// One recorded `execute` call.
#[derive(Debug, Clone)]
pub struct ExecCall {
    pub spec: CommandSpec,
    pub started: Instant,
}

pub type CallLog = Arc<Mutex<Vec<ExecCall>>>;

/// A fake executor that:
/// - records every call with its start time
/// - returns the scripted outputs in order, repeating the last one forever
/// - optionally sleeps before returning, to simulate slow commands.
pub struct ScriptedExecutor {
    script: Vec<ExecOutput>,
    delay: Duration,
    calls: CallLog,
}

impl ScriptedExecutor {
    pub fn new(script: Vec<ExecOutput>) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call succeeds with these outputs, in order.
    pub fn outputs(outputs: &[&str]) -> Self {
        Self::new(outputs.iter().map(|o| ExecOutput::success(o.as_bytes())).collect())
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Handle to the call log; grab it before moving the executor.
    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

impl Executor for ScriptedExecutor {
    fn execute<'a>(
        &'a mut self,
        spec: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = ExecOutput> + Send + 'a>> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(ExecCall {
                spec: spec.clone(),
                started: Instant::now(),
            });
            calls.len() - 1
        };

        let output = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
            .unwrap_or_default();
        let delay = self.delay;

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            output
        })
    }
}

/// Start-to-start gaps between recorded calls.
pub fn start_gaps(calls: &[ExecCall]) -> Vec<Duration> {
    calls
        .windows(2)
        .map(|w| w[1].started.duration_since(w[0].started))
        .collect()
}
