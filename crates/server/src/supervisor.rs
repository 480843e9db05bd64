use std::future::Future;

use anyhow::{Error, Result};
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;

/// Runs long-lived tasks until all exit, Ctrl-C arrives, or one fails.
///
/// The first failure cancels the shared shutdown token so the remaining
/// tasks can drain.
pub struct Supervisor {
    shutdown: CancellationToken,
    tasks: JoinSet<(String, Result<()>)>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            shutdown: CancellationToken::new(),
            tasks: JoinSet::new(),
        }
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn spawn<F, Fut>(&mut self, name: &'static str, factory: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let shutdown = self.shutdown.child_token();
        self.tasks.spawn(async move {
            let result = factory(shutdown).await;
            (name.to_string(), result)
        });
    }

    pub async fn run(mut self) -> Result<()> {
        let mut first_err: Option<Error> = None;

        while !self.tasks.is_empty() {
            tokio::select! {
                Some(outcome) = self.tasks.join_next() => {
                    self.handle_task_outcome(&mut first_err, outcome);
                }
                _ = tokio::signal::ctrl_c(), if !self.shutdown.is_cancelled() => {
                    tracing::info!("interrupt received, shutting down");
                    self.shutdown.cancel();
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn handle_task_outcome(
        &self,
        first_err: &mut Option<Error>,
        outcome: std::result::Result<(String, Result<()>), JoinError>,
    ) {
        match outcome {
            Ok((name, Ok(()))) => {
                tracing::info!("task `{name}` exited gracefully");
            }
            Ok((name, Err(err))) => {
                tracing::error!("task `{name}` exited with error: {err:#}");
                first_err.get_or_insert(err);
                self.cancel_all();
            }
            Err(join_err) => {
                tracing::error!("task panicked: {join_err:?}");
                first_err.get_or_insert(join_err.into());
                self.cancel_all();
            }
        }
    }

    fn cancel_all(&self) {
        if !self.shutdown.is_cancelled() {
            tracing::warn!("supervisor shutting down");
            self.shutdown.cancel();
        }
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_tasks_finish() {
        let mut supervisor = Supervisor::new();
        supervisor.spawn("one", |_| async { Ok::<(), anyhow::Error>(()) });
        supervisor.spawn("two", |_| async { Ok::<(), anyhow::Error>(()) });

        assert!(supervisor.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_failure_cancels_siblings() {
        let mut supervisor = Supervisor::new();
        let token = supervisor.shutdown_token();

        supervisor.spawn("waiter", |shutdown| async move {
            shutdown.cancelled().await;
            Ok::<(), anyhow::Error>(())
        });
        supervisor.spawn("broken", |_| async { Err::<(), _>(anyhow::anyhow!("boom")) });

        let err = supervisor.run().await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(token.is_cancelled());
    }
}
