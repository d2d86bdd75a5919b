//! Scene light state projected into the background's shading parameters
//!
//! The background does not own any lights. Each frame it asks a
//! [`LightProvider`] for the current directional, point and ambient
//! descriptors and copies `position` and `color × intensity` into a
//! [`LightSample`]. Nothing flows back to the provider.

use serde::{Deserialize, Serialize};

use crate::math::{Rgb, Vec3};
use crate::sink::{names, ParamSink, ParamValue};

/// A positioned light (directional or point)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescriptor {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
}

impl LightDescriptor {
    pub fn new(position: Vec3, color: Rgb, intensity: f32) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }

    /// Color scaled by intensity
    #[inline]
    pub fn radiance(&self) -> Vec3 {
        self.color.scaled(self.intensity)
    }
}

/// Ambient light (no position)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientDescriptor {
    pub color: Rgb,
    pub intensity: f32,
}

impl AmbientDescriptor {
    pub fn new(color: Rgb, intensity: f32) -> Self {
        Self {
            color,
            intensity,
        }
    }

    /// Color scaled by intensity
    #[inline]
    pub fn radiance(&self) -> Vec3 {
        self.color.scaled(self.intensity)
    }
}

/// Source of the lights the background samples every frame
pub trait LightProvider {
    fn directional(&self) -> LightDescriptor;
    fn point(&self) -> LightDescriptor;
    fn ambient(&self) -> AmbientDescriptor;
}

/// Plain light set, usable directly as a provider
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightRig {
    pub key: LightDescriptor,
    pub fill: LightDescriptor,
    pub ambient: AmbientDescriptor,
}

impl Default for LightRig {
    /// Warm white key light high and to the side, sky-blue fill from below,
    /// dim grey ambient
    fn default() -> Self {
        Self {
            key: LightDescriptor::new(Vec3::new(10.0, 20.0, 10.0), Rgb::WHITE, 2.0),
            fill: LightDescriptor::new(Vec3::new(-8.0, -5.0, 8.0), Rgb::from_hex(0x87ceeb), 0.6),
            ambient: AmbientDescriptor::new(Rgb::from_hex(0x404040), 0.2),
        }
    }
}

impl LightProvider for LightRig {
    fn directional(&self) -> LightDescriptor {
        self.key
    }

    fn point(&self) -> LightDescriptor {
        self.fill
    }

    fn ambient(&self) -> AmbientDescriptor {
        self.ambient
    }
}

impl<P: LightProvider + ?Sized> LightProvider for &P {
    fn directional(&self) -> LightDescriptor {
        (**self).directional()
    }

    fn point(&self) -> LightDescriptor {
        (**self).point()
    }

    fn ambient(&self) -> AmbientDescriptor {
        (**self).ambient()
    }
}

impl<P: LightProvider + ?Sized> LightProvider for std::rc::Rc<std::cell::RefCell<P>> {
    fn directional(&self) -> LightDescriptor {
        self.borrow().directional()
    }

    fn point(&self) -> LightDescriptor {
        self.borrow().point()
    }

    fn ambient(&self) -> AmbientDescriptor {
        self.borrow().ambient()
    }
}

/// Per-frame projection of the light provider
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LightSample {
    pub dir_position: Vec3,
    pub dir_color: Vec3,
    pub point_position: Vec3,
    pub point_color: Vec3,
    pub ambient_color: Vec3,
}

impl LightSample {
    /// Project a provider's current state
    pub fn from_provider<P: LightProvider + ?Sized>(provider: &P) -> Self {
        let directional = provider.directional();
        let point = provider.point();
        Self {
            dir_position: directional.position,
            dir_color: directional.radiance(),
            point_position: point.position,
            point_color: point.radiance(),
            ambient_color: provider.ambient().radiance(),
        }
    }

    /// Push the sample's shading parameters
    pub fn push<S: ParamSink + ?Sized>(&self, sink: &mut S) {
        sink.set_param(names::DIR_LIGHT_POS, ParamValue::Vec3(self.dir_position.to_array()));
        sink.set_param(names::DIR_LIGHT_COLOR, ParamValue::Vec3(self.dir_color.to_array()));
        sink.set_param(names::POINT_LIGHT_POS, ParamValue::Vec3(self.point_position.to_array()));
        sink.set_param(names::POINT_LIGHT_COLOR, ParamValue::Vec3(self.point_color.to_array()));
        sink.set_param(names::AMBIENT_COLOR, ParamValue::Vec3(self.ambient_color.to_array()));
    }
}

/// Copies light state into shading parameters once per frame
#[derive(Debug)]
pub struct LightSynchronizer<P> {
    provider: P,
    last: LightSample,
}

impl<P: LightProvider> LightSynchronizer<P> {
    pub fn new(provider: P) -> Self {
        let last = LightSample::from_provider(&provider);
        Self { provider, last }
    }

    /// Resample the provider
    pub fn sync(&mut self) -> LightSample {
        self.last = LightSample::from_provider(&self.provider);
        self.last
    }

    /// Sample taken by the last [`sync`](Self::sync)
    #[inline]
    pub fn last(&self) -> LightSample {
        self.last
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the wrapped provider
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_rig_sample() {
        let sample = LightSample::from_provider(&LightRig::default());
        assert_eq!(sample.dir_position, Vec3::new(10.0, 20.0, 10.0));
        assert_eq!(sample.dir_color, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(sample.point_position, Vec3::new(-8.0, -5.0, 8.0));
        let fill = Rgb::from_hex(0x87ceeb);
        assert!((sample.point_color.x - fill.r * 0.6).abs() < 0.0001);
        let grey = 0x40 as f32 / 255.0 * 0.2;
        assert!((sample.ambient_color.y - grey).abs() < 0.0001);
    }

    #[test]
    fn test_sync_follows_provider() {
        let rig = Rc::new(RefCell::new(LightRig::default()));
        let mut sync = LightSynchronizer::new(Rc::clone(&rig));

        rig.borrow_mut().key.intensity = 0.5;
        rig.borrow_mut().fill.position = Vec3::new(1.0, 2.0, 3.0);
        let sample = sync.sync();

        assert_eq!(sample.dir_color, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(sample.point_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sync.last(), sample);
    }

    #[test]
    fn test_push_writes_all_light_params() {
        let mut sink = RecordingSink::new();
        LightSample::from_provider(&LightRig::default()).push(&mut sink);
        for name in [
            names::DIR_LIGHT_POS,
            names::DIR_LIGHT_COLOR,
            names::POINT_LIGHT_POS,
            names::POINT_LIGHT_COLOR,
            names::AMBIENT_COLOR,
        ] {
            assert!(sink.param(name).is_some(), "missing {}", name);
        }
    }
}
