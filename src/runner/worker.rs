use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{
    args::{PositiveU64, PositiveUsize},
    error::AppResult,
    scenario::{CheckSummary, CheckTally, Scenario, ScenarioClient, VirtualUser},
    shutdown::{ShutdownReceiver, ShutdownSender, spawn_deadline},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub vus: PositiveUsize,
    pub duration: Duration,
    pub pace: Duration,
    pub iterations: Option<PositiveU64>,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub elapsed: Duration,
    pub iterations: u64,
    pub short_circuited: u64,
    pub checks: CheckSummary,
}

#[derive(Debug, Default, Clone, Copy)]
struct UserTotals {
    iterations: u64,
    short_circuited: u64,
}

/// Runs `settings.vus` virtual users until the duration elapses, shutdown is
/// broadcast, or every user reaches the iteration cap.
///
/// Users are numbered from 1. An iteration still in flight when shutdown
/// arrives is dropped; checks it already recorded are kept.
///
/// # Errors
///
/// Returns an error when a virtual-user task panics or is cancelled.
pub async fn run_load<C>(
    settings: RunSettings,
    scenario: Arc<Scenario>,
    client: Arc<C>,
    shutdown_tx: &ShutdownSender,
) -> AppResult<RunOutcome>
where
    C: ScenarioClient + 'static,
{
    let started = Instant::now();
    let tally = Arc::new(CheckTally::new());
    let mut early_rx = shutdown_tx.subscribe();
    let user_count = u64::try_from(settings.vus.get()).unwrap_or(u64::MAX);
    let limit = settings.iterations.map(PositiveU64::get);

    info!(
        "Starting {} virtual users for {:?} (pace {:?}).",
        user_count, settings.duration, settings.pace
    );

    // Broadcast receivers only see messages sent after they subscribe, so
    // every user holds its receiver before the deadline starts ticking.
    let receivers: Vec<(VirtualUser, ShutdownReceiver)> = (1..=user_count)
        .map(|index| (VirtualUser::new(index), shutdown_tx.subscribe()))
        .collect();
    if early_rx.try_recv().is_ok() {
        // A signal arrived while users were subscribing; repeat it for the
        // receivers that missed it.
        drop(shutdown_tx.send(()));
    }
    drop(early_rx);
    let deadline = spawn_deadline(shutdown_tx, settings.duration);

    let mut handles: Vec<JoinHandle<UserTotals>> = Vec::with_capacity(receivers.len());
    for (user, shutdown_rx) in receivers {
        let scenario = Arc::clone(&scenario);
        let client = Arc::clone(&client);
        let tally = Arc::clone(&tally);
        handles.push(tokio::spawn(async move {
            let loop_settings = UserLoop {
                user,
                pace: settings.pace,
                limit,
            };
            loop_settings
                .run(
                    scenario.as_ref(),
                    client.as_ref(),
                    tally.as_ref(),
                    shutdown_rx,
                )
                .await
        }));
    }

    let mut totals = UserTotals::default();
    for handle in handles {
        let user_totals = handle.await?;
        totals.iterations = totals.iterations.saturating_add(user_totals.iterations);
        totals.short_circuited = totals
            .short_circuited
            .saturating_add(user_totals.short_circuited);
    }

    // Every user is done; release the deadline task if it has not fired.
    drop(shutdown_tx.send(()));
    deadline.await?;

    Ok(RunOutcome {
        elapsed: started.elapsed(),
        iterations: totals.iterations,
        short_circuited: totals.short_circuited,
        checks: tally.summary(),
    })
}

#[derive(Debug, Clone, Copy)]
struct UserLoop {
    user: VirtualUser,
    pace: Duration,
    limit: Option<u64>,
}

impl UserLoop {
    async fn run<C>(
        self,
        scenario: &Scenario,
        client: &C,
        tally: &CheckTally,
        mut shutdown_rx: ShutdownReceiver,
    ) -> UserTotals
    where
        C: ScenarioClient + ?Sized,
    {
        let mut totals = UserTotals::default();
        loop {
            let result = tokio::select! {
                _ = shutdown_rx.recv() => break,
                result = scenario.run_iteration(self.user, client, tally) => result,
            };
            totals.iterations = totals.iterations.saturating_add(1);
            if result.short_circuited() {
                totals.short_circuited = totals.short_circuited.saturating_add(1);
            }

            if self.limit.is_some_and(|limit| totals.iterations >= limit) {
                debug!(
                    "{} reached its iteration cap ({}).",
                    self.user, totals.iterations
                );
                break;
            }

            tokio::select! {
                _ = shutdown_rx.recv() => break,
                () = sleep(self.pace) => {}
            }
        }
        totals
    }
}
