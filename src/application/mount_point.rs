// Mount point - A fixed chart region and its render state
use crate::domain::chart::{ChartInstance, ChartSlot};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MountState {
    Idle,
    Loading,
    Rendered,
}

/// Holds at most one live chart instance.
///
/// State moves `Idle -> Loading -> Rendered` on success; a failed load goes
/// back to whatever was shown before, never to empty.
#[derive(Debug)]
pub struct MountPoint {
    slot: ChartSlot,
    loading: bool,
    instance: Option<ChartInstance>,
}

impl MountPoint {
    pub fn new(slot: ChartSlot) -> Self {
        Self {
            slot,
            loading: false,
            instance: None,
        }
    }

    pub fn state(&self) -> MountState {
        if self.loading {
            MountState::Loading
        } else if self.instance.is_some() {
            MountState::Rendered
        } else {
            MountState::Idle
        }
    }

    pub fn set_loading(&mut self, on: bool) {
        self.loading = on;
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        self.instance.as_ref()
    }

    /// Tear down the current instance and mount a new one.
    pub fn replace(&mut self, instance: ChartInstance) -> Option<ChartInstance> {
        debug_assert_eq!(instance.slot(), self.slot);
        self.instance.replace(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_builder::ChartBuilder;
    use crate::domain::payload::sample_payload;

    fn tips_instance(generation: u64) -> ChartInstance {
        let builder = ChartBuilder::default();
        let config = builder.tips_chart(&sample_payload().daily().unwrap(), "hsl(0, 0%, 0%)");
        ChartInstance::new(ChartSlot::Tips, generation, config, builder.money())
    }

    #[test]
    fn test_state_transitions() {
        let mut mount = MountPoint::new(ChartSlot::Tips);
        assert_eq!(mount.state(), MountState::Idle);

        mount.set_loading(true);
        assert_eq!(mount.state(), MountState::Loading);

        // failed load with nothing rendered goes back to idle
        mount.set_loading(false);
        assert_eq!(mount.state(), MountState::Idle);

        mount.set_loading(true);
        mount.replace(tips_instance(1));
        mount.set_loading(false);
        assert_eq!(mount.state(), MountState::Rendered);

        // failed load keeps the stale chart
        mount.set_loading(true);
        mount.set_loading(false);
        assert_eq!(mount.state(), MountState::Rendered);
        assert_eq!(mount.instance().unwrap().generation(), 1);
    }

    #[test]
    fn test_replace_returns_old_instance() {
        let mut mount = MountPoint::new(ChartSlot::Tips);
        assert!(mount.replace(tips_instance(1)).is_none());
        let old = mount.replace(tips_instance(2)).unwrap();
        assert_eq!(old.generation(), 1);
        assert_eq!(mount.instance().unwrap().generation(), 2);
    }
}
