//! Per-frame update and parameter push

use super::BackgroundEngine;
use crate::lights::LightProvider;
use crate::sink::{names, ParamSink, ParamValue};

impl<S: ParamSink, L: LightProvider> BackgroundEngine<S, L> {
    /// Per-frame entry point, `now` in wall-clock seconds
    ///
    /// Samples the clock, resamples the lights, steps a running reset and
    /// pushes the full parameter set. Timestamps that go backwards count
    /// as a zero-length frame for the reset session.
    pub fn update_time(&mut self, now: f64) {
        let dt = self
            .last_update
            .map_or(0.0, |last| (now - last).max(0.0));
        self.last_update = Some(now);

        self.clock.sample(now);
        self.lights.sync();
        self.advance_reset(dt, now);
        self.push_frame();
    }

    /// Phase of the sky layer's secondary motion, one value per lane
    pub fn sky_phase(&self) -> [f32; 4] {
        let phase = (self.clock.time() * self.clock.secondary_rate()) as f32;
        [phase; 4]
    }

    /// Push every parameter to the sink and flush it
    pub(crate) fn push_frame(&mut self) {
        let time = self.clock.time() as f32;
        let sky_phase = self.sky_phase();
        let fade = self.fade_amount();
        let sink = &mut self.sink;

        sink.set_param(names::TIME, ParamValue::Float(time));
        sink.set_param(names::RESOLUTION, ParamValue::Vec2(self.resolution));
        sink.set_param(
            names::LAYER_COUNT,
            ParamValue::Int(self.store.layer_count() as i32),
        );
        sink.set_param(names::SKY_LAYER, ParamValue::Int(self.store.sky_layer_raw()));

        for (name, value) in self.store.channels().entries() {
            sink.set_param(name, value);
        }

        sink.set_param(
            names::LIQUID_RATE,
            ParamValue::Float(self.clock.secondary_rate() as f32),
        );
        sink.set_param(names::SKY_PHASE, ParamValue::Vec4(sky_phase));
        sink.set_param(names::FADE, ParamValue::Float(fade));

        self.lights.last().push(sink);
        sink.flush();
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::tests::engine;
    use crate::layers::LayerPatch;
    use crate::sink::{names, ParamSink, StoredParam};

    #[test]
    fn test_update_pushes_time() {
        let mut engine = engine(4);
        engine.update_time(100.0);
        engine.update_time(100.5);
        assert_eq!(engine.sink().float(names::TIME), Some(0.5));
        assert_eq!(engine.sink().flush_count(), 3);
    }

    #[test]
    fn test_update_pushes_layer_channels() {
        let mut engine = engine(4);
        engine.set_layer(1, &LayerPatch::new().opacity(0.75));
        engine.update_time(0.0);

        let opacity = engine.sink().param(names::OPACITY).unwrap();
        assert_eq!(opacity.as_floats().unwrap()[1], 0.75);
        assert_eq!(
            engine.sink().param(names::LAYER_COUNT).and_then(|p| p.as_int()),
            Some(4)
        );
        assert_eq!(
            engine.sink().param(names::SKY_LAYER).and_then(|p| p.as_int()),
            Some(0)
        );
    }

    #[test]
    fn test_sky_phase_follows_secondary_rate() {
        let mut engine = engine(4);
        engine.update_time(0.0);
        engine.set_secondary_rate(2.0);
        engine.update_time(1.5);
        assert_eq!(engine.sky_phase(), [3.0; 4]);
        assert_eq!(
            engine.sink().param(names::SKY_PHASE),
            Some(StoredParam::Vec4([3.0; 4]))
        );
    }

    #[test]
    fn test_lights_pushed_every_frame() {
        let mut engine = engine(4);
        engine.light_provider_mut().key.intensity = 0.0;
        engine.update_time(0.0);
        assert_eq!(
            engine.sink().param(names::DIR_LIGHT_COLOR),
            Some(StoredParam::Vec3([0.0, 0.0, 0.0]))
        );
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut engine = engine(4);
        engine.update_time(10.0);
        engine.force_reset();
        engine.update_time(5.0);
        assert_eq!(engine.fade_amount(), 0.0);
        assert!(engine.is_resetting());
    }
}
