//! Composition root wiring the local repositories behind the driving ports.
//!
//! `ClientCore` owns the in-memory medium and the clock, builds the five
//! local repositories over one shared store, and optionally places the
//! remote-first gateway in front of them. Callers only ever see
//! `Arc<dyn …Operations>` handles, so the two wirings are indistinguishable
//! at the call site.

use std::sync::Arc;
use std::time::Duration;

use mockable::{Clock, DefaultClock};
use reqwest::Url;

use crate::domain::JournalPlanner;
use crate::domain::ports::{
    CollectibleOperations, ProgressOperations, ReflectionOperations, SettingsOperations,
    TaskOperations, TextAnalysis,
};
use crate::outbound::gateway::RemoteFirst;
use crate::outbound::persistence::{
    CollectibleInventory, ProgressLedger, ReflectionLog, SettingsRepository, TaskRepository,
};
use crate::outbound::remote::RemoteApi;
use crate::outbound::storage::{InMemoryMedium, Store};

/// The wired application core.
#[derive(Clone)]
pub struct ClientCore {
    tasks: Arc<dyn TaskOperations>,
    progress: Arc<dyn ProgressOperations>,
    collectibles: Arc<dyn CollectibleOperations>,
    settings: Arc<dyn SettingsOperations>,
    reflections: Arc<dyn ReflectionOperations>,
}

struct LocalRepositories {
    tasks: TaskRepository<InMemoryMedium>,
    ledger: ProgressLedger<InMemoryMedium>,
    inventory: CollectibleInventory<InMemoryMedium>,
    settings: SettingsRepository<InMemoryMedium>,
    reflections: ReflectionLog<InMemoryMedium>,
}

fn build_local(clock: Arc<dyn Clock>) -> LocalRepositories {
    let store = Store::new(Arc::new(InMemoryMedium::new()));
    let ledger = ProgressLedger::new(store.clone(), Arc::clone(&clock));
    LocalRepositories {
        tasks: TaskRepository::new(store.clone(), ledger.clone(), Arc::clone(&clock)),
        inventory: CollectibleInventory::new(store.clone(), ledger.clone(), Arc::clone(&clock)),
        settings: SettingsRepository::new(store.clone(), Arc::clone(&clock)),
        reflections: ReflectionLog::new(store, clock),
        ledger,
    }
}

impl ClientCore {
    /// Wire the core against local storage only.
    #[must_use]
    pub fn local(clock: Arc<dyn Clock>) -> Self {
        let local = build_local(clock);
        Self {
            tasks: Arc::new(local.tasks),
            progress: Arc::new(local.ledger),
            collectibles: Arc::new(local.inventory),
            settings: Arc::new(local.settings),
            reflections: Arc::new(local.reflections),
        }
    }

    /// Wire the core against local storage with the system clock.
    #[must_use]
    pub fn local_with_system_clock() -> Self {
        Self::local(Arc::new(DefaultClock))
    }

    /// Wire the core remote-first: every operation with an endpoint tries
    /// `base_url` before the local repositories.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn remote_first(
        base_url: Url,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let remote = RemoteApi::new(base_url, timeout)?;
        let local = build_local(clock);
        Ok(Self {
            tasks: Arc::new(RemoteFirst::new(remote.clone(), local.tasks)),
            progress: Arc::new(RemoteFirst::new(remote.clone(), local.ledger)),
            collectibles: Arc::new(RemoteFirst::new(remote.clone(), local.inventory)),
            settings: Arc::new(RemoteFirst::new(remote.clone(), local.settings)),
            reflections: Arc::new(RemoteFirst::new(remote, local.reflections)),
        })
    }

    /// Task operations handle.
    #[must_use]
    pub fn tasks(&self) -> Arc<dyn TaskOperations> {
        Arc::clone(&self.tasks)
    }

    /// Kaibloom ledger handle.
    #[must_use]
    pub fn progress(&self) -> Arc<dyn ProgressOperations> {
        Arc::clone(&self.progress)
    }

    /// Collectible operations handle.
    #[must_use]
    pub fn collectibles(&self) -> Arc<dyn CollectibleOperations> {
        Arc::clone(&self.collectibles)
    }

    /// Settings operations handle.
    #[must_use]
    pub fn settings(&self) -> Arc<dyn SettingsOperations> {
        Arc::clone(&self.settings)
    }

    /// Reflection log handle.
    #[must_use]
    pub fn reflections(&self) -> Arc<dyn ReflectionOperations> {
        Arc::clone(&self.reflections)
    }

    /// Build a journal planner over the wired task operations.
    #[must_use]
    pub fn journal_planner<A: TextAnalysis + ?Sized>(
        &self,
        analysis: Arc<A>,
    ) -> JournalPlanner<A, dyn TaskOperations> {
        JournalPlanner::new(analysis, self.tasks())
    }
}
