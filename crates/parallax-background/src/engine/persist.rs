//! Snapshot save/restore

use super::BackgroundEngine;
use crate::layers::LayerPatch;
use crate::lights::LightProvider;
use crate::persistence::Snapshot;
use crate::sink::ParamSink;

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Capture layer table, counts and rates
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: Snapshot::CURRENT_VERSION,
            layer_count: self.store.layer_count() as i32,
            sky_layer: self.store.sky_layer_raw(),
            main_rate: self.clock.rate(),
            secondary_rate: self.clock.secondary_rate(),
            layers: self.store.layers(),
        }
    }

    /// Restore a snapshot
    ///
    /// Layers beyond this engine's capacity are dropped; missing layers keep
    /// their current values. Simulation time and any running reset are left
    /// alone.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        for (i, params) in snapshot.layers.iter().enumerate().take(self.store.capacity()) {
            self.write_layer(i as i32, &LayerPatch::from(*params));
        }
        self.store.set_layer_count(snapshot.layer_count);
        self.store.set_sky_layer(snapshot.sky_layer);
        self.clock.set_rate(snapshot.main_rate);
        self.clock.set_secondary_rate(snapshot.secondary_rate);

        log::info!(
            "restored background snapshot: {} layers, {} active",
            snapshot.layers.len(),
            self.store.layer_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::tests::engine;
    use crate::layers::LayerPatch;
    use crate::persistence::Snapshot;

    #[test]
    fn test_snapshot_restore() {
        let mut source = engine(6);
        source.set_layer(2, &LayerPatch::new().tint_hex(0x123456).opacity(0.4));
        source.set_layer_count(3);
        source.set_sky_layer(-1);
        source.set_main_rate(0.5);

        let json = source.snapshot().to_json().unwrap();
        let snapshot = Snapshot::from_json(&json).unwrap();

        let mut target = engine(6);
        target.restore(&snapshot);
        assert_eq!(target.layers(), source.layers());
        assert_eq!(target.layer_count(), 3);
        assert_eq!(target.sky_layer(), -1);
        assert_eq!(target.main_rate(), 0.5);
    }

    #[test]
    fn test_restore_clamps_negative_rates() {
        let mut snapshot = engine(4).snapshot();
        snapshot.main_rate = -2.0;
        snapshot.secondary_rate = -0.5;

        let mut target = engine(4);
        target.restore(&snapshot);
        assert_eq!(target.main_rate(), 0.0);
        assert_eq!(target.secondary_rate(), 0.0);
    }

    #[test]
    fn test_restore_into_smaller_engine() {
        let source = engine(8);
        let snapshot = source.snapshot();

        let mut target = engine(4);
        target.restore(&snapshot);
        assert_eq!(target.layers().len(), 4);
        assert_eq!(target.layer(3), source.layer(3));
        assert_eq!(target.layer_count(), 4);
    }
}
