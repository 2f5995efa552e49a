// Dashboard refresher - Keeps the admin charts in sync with the server
use crate::application::chart_builder::ChartBuilder;
use crate::application::data_source::ChartDataSource;
use crate::application::error::RefreshError;
use crate::application::mount_point::{MountPoint, MountState};
use crate::domain::chart::{ChartConfig, ChartInstance, ChartSlot};
use crate::domain::payload::ChartPayload;
use crate::domain::theme::Palette;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What a refresh did to one mount point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SlotOutcome {
    Rendered { generation: u64 },
    Retained { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    pub tips: SlotOutcome,
    pub staff: SlotOutcome,
}

impl RefreshOutcome {
    fn retained(err: &RefreshError) -> Self {
        Self {
            tips: SlotOutcome::Retained {
                error: err.to_string(),
            },
            staff: SlotOutcome::Retained {
                error: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.tips, SlotOutcome::Rendered { .. })
            && matches!(self.staff, SlotOutcome::Rendered { .. })
    }
}

/// Read-only view of a mount point.
#[derive(Debug, Clone, Serialize)]
pub struct MountSnapshot {
    pub slot: ChartSlot,
    pub mount_id: &'static str,
    pub state: MountState,
    pub generation: Option<u64>,
    pub config: Option<ChartConfig>,
    pub tooltips: Vec<Vec<String>>,
}

/// Owns the tips and staff mount points and refreshes them from a data source.
///
/// Refreshes are serialized: the timer and on-demand callers queue on one
/// lock, so payloads are applied in the order they were requested and a slow
/// response can never overwrite a newer one.
pub struct DashboardRefresher {
    source: Arc<dyn ChartDataSource>,
    builder: ChartBuilder,
    palette: watch::Receiver<Palette>,
    poll_interval: Duration,
    tips: RwLock<MountPoint>,
    staff: RwLock<MountPoint>,
    generation: AtomicU64,
    refresh_lock: Mutex<()>,
    shutdown: watch::Sender<bool>,
}

impl DashboardRefresher {
    pub fn new(
        source: Arc<dyn ChartDataSource>,
        builder: ChartBuilder,
        palette: watch::Receiver<Palette>,
        poll_interval: Duration,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            source,
            builder,
            palette,
            poll_interval,
            tips: RwLock::new(MountPoint::new(ChartSlot::Tips)),
            staff: RwLock::new(MountPoint::new(ChartSlot::Staff)),
            generation: AtomicU64::new(0),
            refresh_lock: Mutex::new(()),
            shutdown,
        }
    }

    /// Render both charts from the seed embedded at startup, if any.
    ///
    /// A missing or malformed seed is not an error: nothing is rendered and
    /// the first scheduled fetch fills the charts.
    pub async fn bootstrap(&self, seed: Option<&str>) -> Option<RefreshOutcome> {
        match parse_seed(seed) {
            Ok(payload) => {
                let _guard = self.refresh_lock.lock().await;
                let outcome = self.apply(&payload).await;
                tracing::info!("Rendered charts from seed payload");
                Some(outcome)
            }
            Err(e) => {
                tracing::debug!("Skipping seed render: {}", e);
                None
            }
        }
    }

    /// Fetch the latest payload and rebuild both charts.
    ///
    /// On failure the previously rendered charts stay as they were. The
    /// loading state is cleared on both mount points in every case.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _guard = self.refresh_lock.lock().await;

        self.set_loading(true).await;
        let outcome = match self.source.fetch_payload().await {
            Ok(payload) => self.apply(&payload).await,
            Err(e) => {
                tracing::warn!("Chart data error from {}: {}", self.source.describe(), e);
                RefreshOutcome::retained(&e)
            }
        };
        self.set_loading(false).await;

        outcome
    }

    /// Refresh now and then every poll interval until [`stop`](Self::stop).
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        let mut shutdown = self.shutdown.subscribe();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(this.poll_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            tracing::info!(
                "Polling {} every {:?}",
                this.source.describe(),
                this.poll_interval
            );

            loop {
                if *shutdown.borrow() {
                    break;
                }
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown.changed() => break,
                }
                this.refresh().await;
            }

            tracing::info!("Dashboard refresher stopped");
        })
    }

    /// Cancel the repeating schedule. An in-flight refresh still completes.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    pub async fn snapshot(&self, slot: ChartSlot) -> MountSnapshot {
        let mount = self.mount(slot).read().await;
        let instance = mount.instance();
        MountSnapshot {
            slot,
            mount_id: slot.mount_id(),
            state: mount.state(),
            generation: instance.map(|i| i.generation()),
            config: instance.map(|i| i.config().clone()),
            tooltips: instance.map(|i| i.tooltips()).unwrap_or_default(),
        }
    }

    /// Clone of the instance currently mounted in `slot`.
    pub async fn instance(&self, slot: ChartSlot) -> Option<ChartInstance> {
        self.mount(slot).read().await.instance().cloned()
    }

    fn mount(&self, slot: ChartSlot) -> &RwLock<MountPoint> {
        match slot {
            ChartSlot::Tips => &self.tips,
            ChartSlot::Staff => &self.staff,
        }
    }

    async fn set_loading(&self, on: bool) {
        for slot in ChartSlot::ALL {
            self.mount(slot).write().await.set_loading(on);
        }
    }

    // Each chart is validated and replaced on its own, so a bad staff section
    // does not hold back the tips chart.
    async fn apply(&self, payload: &ChartPayload) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let accent = self.palette.borrow().accent();

        let tips = payload
            .daily()
            .map(|series| self.builder.tips_chart(&series, &accent));
        let staff = payload
            .staff()
            .map(|series| self.builder.staff_chart(&series, &accent));

        RefreshOutcome {
            tips: self
                .mount_config(ChartSlot::Tips, generation, tips.map_err(RefreshError::from))
                .await,
            staff: self
                .mount_config(ChartSlot::Staff, generation, staff.map_err(RefreshError::from))
                .await,
        }
    }

    async fn mount_config(
        &self,
        slot: ChartSlot,
        generation: u64,
        config: Result<ChartConfig, RefreshError>,
    ) -> SlotOutcome {
        match config {
            Ok(config) => {
                let instance = ChartInstance::new(slot, generation, config, self.builder.money());
                self.mount(slot).write().await.replace(instance);
                tracing::debug!("Mounted {} chart generation {}", slot.mount_id(), generation);
                SlotOutcome::Rendered { generation }
            }
            Err(e) => {
                tracing::warn!("Keeping previous {} chart: {}", slot.mount_id(), e);
                SlotOutcome::Retained {
                    error: e.to_string(),
                }
            }
        }
    }
}

fn parse_seed(seed: Option<&str>) -> Result<ChartPayload, RefreshError> {
    let text = seed
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RefreshError::SeedParse("no seed embedded".to_string()))?;
    ChartPayload::from_json(text).map_err(|e| RefreshError::SeedParse(e.to_string()))
}
