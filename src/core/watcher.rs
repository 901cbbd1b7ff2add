use crate::config::WatcherConfig;
use crate::domain::model::{Name, NotificationMessage, SeenSet};
use crate::domain::ports::{NameSource, Notifier, SeenStore, SummaryResolver};
use crate::utils::error::{Result, WatcherError};
use std::collections::HashSet;
use tokio::sync::watch;

/// What happened to one new name during a cycle.
#[derive(Debug)]
pub enum NameOutcome {
    Notified(Name),
    Failed { name: Name, error: WatcherError },
}

#[derive(Debug, Default)]
pub struct CycleReport {
    pub notified: Vec<Name>,
    pub failed: Vec<(Name, WatcherError)>,
    /// Repeated listings of a name already notified earlier in the same cycle.
    /// A repeat of a name that failed is tried again.
    pub duplicates_skipped: usize,
    /// The stop signal arrived before every new name was processed.
    pub interrupted: bool,
}

/// The polling driver: extract, diff against the seen set, notify, persist, sleep.
pub struct Watcher<S, R, N, St>
where
    S: NameSource,
    R: SummaryResolver,
    N: Notifier,
    St: SeenStore,
{
    config: WatcherConfig,
    source: S,
    resolver: R,
    notifier: N,
    store: St,
    seen: SeenSet,
}

impl<S, R, N, St> Watcher<S, R, N, St>
where
    S: NameSource,
    R: SummaryResolver,
    N: Notifier,
    St: SeenStore,
{
    /// Builds a watcher whose in-memory seen set starts from `store`.
    pub async fn load(
        config: &WatcherConfig,
        source: S,
        resolver: R,
        notifier: N,
        store: St,
    ) -> Result<Self> {
        let seen = store.load().await?;
        tracing::info!("Loaded {} previously seen names", seen.len());

        Ok(Self {
            config: config.clone(),
            source,
            resolver,
            notifier,
            store,
            seen,
        })
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// One extraction plus delivery for every new name. Only extraction
    /// failures abort the cycle; per-name failures land in the report.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        let (_never_stop, shutdown) = watch::channel(false);
        self.run_cycle_until(&shutdown).await
    }

    /// Like [`Watcher::run_cycle`], but stops before the next name once
    /// `shutdown` turns true. Names not reached stay unseen.
    pub async fn run_cycle_until(
        &mut self,
        shutdown: &watch::Receiver<bool>,
    ) -> Result<CycleReport> {
        let url = self.config.current_listing_url();
        let current = self.source.extract_all_names(&url).await?;
        tracing::debug!("{} names listed on {}", current.len(), url);

        let mut report = CycleReport::default();
        let mut handled: HashSet<Name> = HashSet::new();

        for name in current {
            if *shutdown.borrow() {
                report.interrupted = true;
                break;
            }

            let repeated = !handled.insert(name.clone());
            if self.seen.contains(&name) {
                if repeated {
                    report.duplicates_skipped += 1;
                }
                continue;
            }

            tracing::info!("New name: {}", name);
            match self.process_name(name).await {
                NameOutcome::Notified(name) => report.notified.push(name),
                NameOutcome::Failed { name, error } => {
                    tracing::error!("Failed to process {}: {}", name, error);
                    report.failed.push((name, error));
                }
            }
        }

        Ok(report)
    }

    async fn process_name(&mut self, name: Name) -> NameOutcome {
        match self.deliver(&name).await {
            Ok(()) => NameOutcome::Notified(name),
            Err(error) => NameOutcome::Failed { name, error },
        }
    }

    async fn deliver(&mut self, name: &str) -> Result<()> {
        let summary = self.resolver.resolve(name).await?;
        let message = NotificationMessage::from_summary(name, &summary);
        self.notifier.notify(&message).await?;

        // Already delivered, so keep it in memory even if persisting fails.
        self.seen.insert(name.to_string());
        self.store.save(&self.seen).await
    }

    /// Polls until `shutdown` turns true. The flag is honored before each
    /// name, between cycles and during the sleep.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            "Watching for new names every {} seconds",
            self.config.poll_interval_secs
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.run_cycle_until(&shutdown).await {
                Ok(report) => tracing::info!(
                    "Check finished: {} notified, {} failed, {} duplicates skipped",
                    report.notified.len(),
                    report.failed.len(),
                    report.duplicates_skipped
                ),
                Err(e) => tracing::error!("Check failed: {}", e),
            }

            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval()) => {}
                _ = wait_for_stop(&mut shutdown) => break,
            }
        }

        tracing::info!("Interrupted, stopping");
    }
}

async fn wait_for_stop(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if shutdown.changed().await.is_err() {
            // Sender gone: nobody can stop us any more.
            std::future::pending::<()>().await;
        }
        if *shutdown.borrow_and_update() {
            return;
        }
    }
}
