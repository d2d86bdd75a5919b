//! Integration tests for BackgroundEngine
//!
//! These tests verify the full background workflow including:
//! - Sparse layer edits and index validation
//! - Rate-scaled simulation time
//! - The fade, reset and fade-back cycle
//! - Light synchronization and resizing during a reset
//! - Uniform block packing of a live engine

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use parallax_background::sink::names;
use parallax_background::{
    BackgroundConfig, BackgroundEngine, LayerPatch, LightRig, ParamSink, RecordingSink,
    ResetPhase, Rgb, Snapshot, StoredParam, UniformBlockSink, Vec3,
};

const EPS: f64 = 1e-9;

fn engine(capacity: usize) -> BackgroundEngine<RecordingSink, LightRig> {
    let config = BackgroundConfig::default().with_capacity(capacity).with_seed(7);
    BackgroundEngine::new(config, RecordingSink::new(), LightRig::default())
}

/// Drive updates in fixed steps until the reset session ends
fn run_reset<S: ParamSink>(
    engine: &mut BackgroundEngine<S, LightRig>,
    start: f64,
    step: f64,
) -> Vec<(ResetPhase, f32)> {
    let mut trace = Vec::new();
    let mut now = start;
    for _ in 0..10_000 {
        if !engine.is_resetting() {
            break;
        }
        now += step;
        engine.update_time(now);
        trace.push((engine.reset_phase(), engine.fade_amount()));
    }
    trace
}

// =============================================================================
// Layer Store Tests
// =============================================================================

#[test]
fn test_out_of_range_edits_leave_store_unchanged() {
    let mut engine = engine(8);
    let before = engine.layers();

    for index in [-100, -1, 8, 9, 1000] {
        engine.set_layer(index, &LayerPatch::new().opacity(1.0).tint(Rgb::BLACK));
        engine.reset_layer(index);
        engine.randomize_layer(index);
        engine.copy_layer(index);
        engine.paste_layer(index);
    }

    assert_eq!(engine.layers(), before);
}

#[test]
fn test_sparse_merge_touches_one_field() {
    let mut engine = engine(8);
    let before = engine.layer(3).unwrap();

    engine.set_layer(3, &LayerPatch::new().opacity(0.5));

    let after = engine.layer(3).unwrap();
    assert_eq!(after.opacity, 0.5);
    assert_eq!(
        LayerPatch { opacity: None, ..LayerPatch::from(after) },
        LayerPatch { opacity: None, ..LayerPatch::from(before) }
    );
}

#[test]
fn test_layers_beyond_count_keep_their_data() {
    let mut engine = engine(8);
    engine.set_layer_count(5);
    engine.set_layer(7, &LayerPatch::new().opacity(1.0));

    assert_eq!(engine.layer_count(), 5);
    assert_eq!(engine.layer(7).unwrap().opacity, 1.0);

    engine.set_layer_count(8);
    assert_eq!(engine.layer(7).unwrap().opacity, 1.0);
}

#[test]
fn test_construction_defaults() {
    let engine = engine(8);
    let layers = engine.layers();
    assert_eq!(layers.len(), 8);
    assert!(layers.iter().all(|l| l.opacity == 0.0));
    assert!(layers.first().unwrap().freq < layers.last().unwrap().freq);
    assert!(layers.first().unwrap().base > layers.last().unwrap().base);
    assert!(layers.first().unwrap().amp > layers.last().unwrap().amp);
}

#[test]
fn test_values_are_not_clamped() {
    let mut engine = engine(4);
    engine.set_layer(0, &LayerPatch::new().opacity(-2.0).freq(-1.0));
    let layer = engine.layer(0).unwrap();
    assert_eq!(layer.opacity, -2.0);
    assert_eq!(layer.freq, -1.0);
}

// =============================================================================
// Simulation Time Tests
// =============================================================================

#[test]
fn test_rate_zero_freezes_rate_one_tracks_wall_clock() {
    let mut engine = engine(4);
    engine.update_time(50.0);
    engine.update_time(51.0);
    let frozen = engine.simulation_time();

    engine.set_main_rate(0.0);
    for t in [52.0, 60.0, 75.5] {
        engine.update_time(t);
        assert_eq!(engine.simulation_time(), frozen);
    }

    engine.set_main_rate(1.0);
    engine.update_time(78.0);
    assert!((engine.simulation_time() - (frozen + 2.5)).abs() < EPS);
}

#[test]
fn test_first_update_does_not_jump() {
    let mut engine = engine(4);
    engine.update_time(1_000_000.0);
    assert_eq!(engine.simulation_time(), 0.0);
}

// =============================================================================
// Reset Cycle Tests
// =============================================================================

#[test]
fn test_reset_phase_order_and_fade_shape() {
    let mut engine = engine(8);
    engine.set_fade_timing(1.0, 0.5, 1.0);
    engine.update_time(10.0);
    engine.force_reset();

    let trace = run_reset(&mut engine, 10.0, 1.0 / 60.0);

    let mut phases: Vec<ResetPhase> = trace.iter().map(|(p, _)| *p).collect();
    phases.dedup();
    assert_eq!(
        phases,
        vec![
            ResetPhase::FadingToBlack,
            ResetPhase::HoldingBlackPreReset,
            ResetPhase::HoldingBlackPostReset,
            ResetPhase::FadingFromBlack,
            ResetPhase::Idle,
        ]
    );

    let fades = |phase: ResetPhase| -> Vec<f32> {
        trace.iter().filter(|(p, _)| *p == phase).map(|(_, f)| *f).collect()
    };

    let fade_in = fades(ResetPhase::FadingToBlack);
    assert!(fade_in.windows(2).all(|w| w[1] >= w[0]));

    for phase in [ResetPhase::HoldingBlackPreReset, ResetPhase::HoldingBlackPostReset] {
        assert!(fades(phase).iter().all(|f| *f == 1.0));
    }

    let fade_out = fades(ResetPhase::FadingFromBlack);
    assert!(fade_out.windows(2).all(|w| w[1] <= w[0]));

    assert_eq!(trace.last(), Some(&(ResetPhase::Idle, 0.0)));
    assert!(!engine.is_resetting());
}

#[test]
fn test_reset_side_effects_while_black() {
    let mut engine = engine(8);
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    engine.set_external_reset_callback(move || counter.set(counter.get() + 1));

    for i in 0..8 {
        engine.set_layer(i, &LayerPatch::new().offset(3.0).liquid_offset(4.0));
    }
    engine.set_fade_timing(0.2, 0.4, 0.2);
    engine.update_time(0.0);
    engine.update_time(5.0);
    assert!(engine.simulation_time() > 0.0);
    engine.force_reset();

    let mut now = 5.0;
    while engine.reset_phase() != ResetPhase::HoldingBlackPostReset {
        now += 0.01;
        engine.update_time(now);
    }

    assert_eq!(calls.get(), 1);
    assert_eq!(engine.simulation_time(), 0.0);
    assert_eq!(engine.fade_amount(), 1.0);
    for layer in engine.layers() {
        assert_eq!(layer.offset, 0.0);
        assert_eq!(layer.liquid_offset, 0.0);
    }

    run_reset(&mut engine, now, 0.01);
    assert_eq!(calls.get(), 1);
    for layer in engine.layers() {
        assert!((0.0..10.0).contains(&layer.liquid_offset));
    }
}

#[test]
fn test_reset_jitters_liquid_speed_within_bounds() {
    let mut engine = engine(8);
    let before: Vec<f32> = engine.layers().iter().map(|l| l.liquid_speed).collect();

    engine.set_fade_timing(0.0, 0.0, 0.0);
    engine.update_time(0.0);
    engine.force_reset();
    run_reset(&mut engine, 0.0, 0.0);

    for (old, layer) in before.iter().zip(engine.layers()) {
        let ratio = layer.liquid_speed / old;
        assert!((0.8 - 1e-5..=1.2 + 1e-5).contains(&ratio));
    }
}

#[test]
fn test_reset_recolors_leading_layers() {
    let mut engine = engine(15);
    for i in 0..15 {
        engine.set_layer(i, &LayerPatch::new().tint(Rgb::new(0.123, 0.456, 0.789)));
    }
    engine.set_fade_timing(0.0, 0.0, 0.0);
    engine.force_reset();
    run_reset(&mut engine, 0.0, 0.0);

    let marker = Rgb::new(0.123, 0.456, 0.789);
    let layers = engine.layers();
    assert!(layers[0].tint != marker);
    assert_eq!(layers[14].tint, marker);
}

#[test]
fn test_force_reset_while_active_changes_nothing() {
    let mut engine = engine(4);
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    engine.set_external_reset_callback(move || counter.set(counter.get() + 1));

    engine.update_time(0.0);
    engine.force_reset();
    engine.update_time(0.3);

    let phase = engine.reset_phase();
    let fade = engine.fade_amount();
    engine.force_reset();
    assert_eq!(engine.reset_phase(), phase);
    assert_eq!(engine.fade_amount(), fade);

    run_reset(&mut engine, 0.3, 0.05);
    assert_eq!(calls.get(), 1);
    assert!(!engine.is_resetting());
}

#[test]
fn test_zero_timings_do_not_stall() {
    let mut engine = engine(4);
    engine.set_fade_timing(0.0, 0.0, 0.0);
    engine.update_time(1.0);
    engine.force_reset();
    engine.update_time(1.0);

    let mut updates = 1;
    while engine.is_resetting() && updates < 10 {
        engine.update_time(1.0);
        updates += 1;
    }
    assert!(!engine.is_resetting());
    assert!(updates <= 5);
    assert_eq!(engine.fade_amount(), 0.0);
}

#[test]
fn test_reset_without_callback() {
    let mut engine = engine(4);
    engine.set_fade_timing(0.0, 0.0, 0.0);
    engine.force_reset();
    run_reset(&mut engine, 0.0, 0.0);
    assert!(!engine.is_resetting());
}

#[test]
fn test_callback_last_registration_wins() {
    let mut engine = engine(4);
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let f = first.clone();
    engine.set_external_reset_callback(move || f.set(f.get() + 1));
    let s = second.clone();
    engine.set_external_reset_callback(move || s.set(s.get() + 1));

    engine.set_fade_timing(0.0, 0.0, 0.0);
    engine.force_reset();
    run_reset(&mut engine, 0.0, 0.0);

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

// =============================================================================
// Lights and Resize Tests
// =============================================================================

#[test]
fn test_lights_follow_provider_during_black() {
    let rig = Rc::new(RefCell::new(LightRig::default()));
    let config = BackgroundConfig::default().with_capacity(4).with_seed(2);
    let mut engine = BackgroundEngine::new(config, RecordingSink::new(), rig.clone());

    engine.set_fade_timing(0.0, 10.0, 0.0);
    engine.update_time(0.0);
    engine.force_reset();
    engine.update_time(0.0);
    engine.update_time(0.0);
    assert_eq!(engine.fade_amount(), 1.0);

    rig.borrow_mut().fill.position = Vec3::new(1.0, 2.0, 3.0);
    rig.borrow_mut().ambient.intensity = 0.0;
    engine.update_time(1.0);

    assert_eq!(
        engine.sink().param(names::POINT_LIGHT_POS),
        Some(StoredParam::Vec3([1.0, 2.0, 3.0]))
    );
    assert_eq!(
        engine.sink().param(names::AMBIENT_COLOR),
        Some(StoredParam::Vec3([0.0, 0.0, 0.0]))
    );
}

#[test]
fn test_light_color_times_intensity() {
    let engine = engine(4);
    let sample = engine.light_sample();
    assert_eq!(sample.dir_position, Vec3::new(10.0, 20.0, 10.0));
    assert!((sample.dir_color.x - 2.0).abs() < 1e-6);
    assert!((sample.ambient_color.x - 0.2 * 64.0 / 255.0).abs() < 1e-6);
}

#[test]
fn test_resize_mid_reset() {
    let mut engine = engine(4);
    engine.update_time(0.0);
    engine.force_reset();
    engine.update_time(0.5);

    engine.resize(800.0, 600.0);
    assert!(engine.is_resetting());
    assert_eq!(
        engine.sink().param(names::RESOLUTION),
        Some(StoredParam::Vec2([800.0, 600.0]))
    );

    engine.update_time(0.6);
    assert_eq!(engine.resolution(), [800.0, 600.0]);
}

// =============================================================================
// Uniform Block and Persistence Tests
// =============================================================================

#[test]
fn test_engine_drives_uniform_block() {
    let config = BackgroundConfig::default().with_capacity(8).with_seed(4);
    let mut engine = BackgroundEngine::new(config, UniformBlockSink::default(), LightRig::default());

    engine.set_layer(5, &LayerPatch::new().opacity(0.25));
    engine.set_layer_count(6);
    engine.set_sky_layer(-1);
    engine.update_time(0.0);
    engine.update_time(2.0);

    let block = engine.sink().block();
    assert_eq!(block.layer_count, 6);
    assert_eq!(block.sky_layer, -1);
    assert_eq!(block.time, 2.0);
    assert_eq!(
        engine.sink().param(names::OPACITY).and_then(|p| p.as_floats().map(|v| v[5])),
        Some(0.25)
    );
}

#[test]
fn test_snapshot_survives_json() {
    let mut source = engine(8);
    source.apply_presets();
    source.set_secondary_rate(0.3);

    let json = source.snapshot().to_json().unwrap();
    let mut target = engine(8);
    target.restore(&Snapshot::from_json(&json).unwrap());

    assert_eq!(target.layers(), source.layers());
    assert_eq!(target.secondary_rate(), 0.3);
}
