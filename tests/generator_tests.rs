mod support;

use approx::assert_relative_eq;
use solid_profile::{
    ParameterSet, Preset, Profile, ProfileGenerator, ShapeConfig, Stage,
    float_types::{PI, Real},
    template::{BOUNDARIES, NECK_FAR, NECK_NEAR, POINT_COUNT, RIM, SHAFT_BASE, SHAFT_END, Zone},
};
use std::thread;

fn snapshot(trace: &[(Stage, Profile)], stage: Stage) -> Profile {
    trace
        .iter()
        .find(|(s, _)| *s == stage)
        .map(|(_, p)| *p)
        .expect("stage missing from trace")
}

fn params(
    length: Real,
    circumference: Real,
    shaft_curve: Real,
    shaft_angle: Real,
    head_angle: Real,
) -> ParameterSet {
    ParameterSet {
        length,
        circumference,
        shaft_curve,
        shaft_angle,
        head_angle,
        shaft_expansion: 100.0,
        head_expansion: 100.0,
        ..ParameterSet::default()
    }
}

#[test]
fn default_profile_regression() {
    // Snapshot of the default parameter set (140, 140, 10, 10, 0, 100, 100).
    let profile = ProfileGenerator::default().generate(&ParameterSet::default());
    let expected: [(usize, Real, Real); 9] = [
        (0, 0.0, -22.799939858070317),
        (3, 78.78451026955696, -32.951813402662744),
        (6, 88.46610761705475, -32.41076698966903),
        (9, 91.40006163940936, -42.96331148032327),
        (12, 137.8506143391156, -38.19067846751777),
        (15, 130.57071273825625, -9.796899748072406),
        (18, 123.71749657169757, -10.012439499542126),
        (21, 115.4522868489887, -2.9392895128749643),
        (24, 0.0, 22.799939858070317),
    ];
    for (i, x, y) in expected {
        assert!(support::approx_eq(profile[i].x, x, 1e-9), "x of point {i}: {}", profile[i].x);
        assert!(support::approx_eq(profile[i].y, y, 1e-9), "y of point {i}: {}", profile[i].y);
    }
}

#[test]
fn axis_ends_stay_on_the_axis() {
    let generator = ProfileGenerator::default();
    for preset in Preset::ALL {
        let profile = generator.generate_preset(preset, &ParameterSet::default());
        assert_eq!(profile[SHAFT_BASE].x, 0.0, "{preset:?}");
        assert_eq!(profile[SHAFT_END].x, 0.0, "{preset:?}");
    }
}

#[test]
fn output_is_vertically_centered() {
    let generator = ProfileGenerator::default();
    for set in [
        ParameterSet::default(),
        params(90.0, 80.0, -20.0, -40.0, -30.0),
        params(300.0, 300.0, 60.0, 60.0, 40.0),
    ] {
        let profile = generator.generate(&set);
        assert!(
            support::approx_eq(profile[SHAFT_BASE].y, -profile[SHAFT_END].y, 1e-9),
            "{set:?}"
        );
        assert!(profile.height() > 0.0);
    }
}

#[test]
fn overlap_guard_scenario() {
    // Diameter 140 on the 35 tall template triggers the fallback head width.
    let set = params(90.0, 140.0 * PI, 10.0, 0.0, 0.0);
    let generator = ProfileGenerator::default();

    let head = generator.head_width_factor(&set);
    assert!(head.overridden);

    let trace = generator.generate_traced(&set);
    let stretched = snapshot(&trace, Stage::LengthStretch);
    assert!(support::approx_eq(stretched.length(), 90.0, 1e-9));
    assert!(support::approx_eq(stretched[NECK_NEAR].x, 77.1, 1e-9));
    assert!(stretched[RIM].x - stretched[NECK_NEAR].x > 0.0);

    let profile = generator.generate(&set);
    let damped_secant = (1.0 / (10.0 as Real).to_radians().cos() - 1.0) * 0.5 + 1.0;
    let half_height = 70.0 * damped_secant;
    assert_relative_eq!(profile[SHAFT_BASE].y, -half_height, epsilon = 1e-9);
    assert_relative_eq!(profile[SHAFT_END].y, half_height, epsilon = 1e-9);
    // head re-leveling swings the rim back towards the base
    assert_relative_eq!(profile.length(), 87.06702272381668, epsilon = 1e-9);
    assert!(profile.length() < stretched.length());
    assert!(profile.validate().is_ok());
}

#[test]
fn straight_shaft_keeps_requested_length() {
    let profile = ProfileGenerator::default().generate(&params(90.0, 140.0 * PI, 0.0, 0.0, 0.0));
    assert_relative_eq!(profile.length(), 90.0, epsilon = 1e-9);
    assert_relative_eq!(profile[SHAFT_BASE].y, -70.0, epsilon = 1e-9);
    assert_relative_eq!(profile[SHAFT_END].y, 70.0, epsilon = 1e-9);
}

#[test]
fn zero_angles_make_rotation_stages_identities() {
    let set = params(140.0, 140.0, 0.0, 0.0, 0.0);
    let trace = ProfileGenerator::default().generate_traced(&set);

    let before = snapshot(&trace, Stage::ControlPointReinterpolation);
    for stage in Stage::ALL.iter().copied().filter(|s| s.is_rotation()) {
        support::assert_points_eq(&snapshot(&trace, stage), &before, 1e-9);
    }

    let last = snapshot(&trace, Stage::VerticalCentering);
    let shift = before.height() * 0.5;
    for i in 0..POINT_COUNT {
        assert!(support::approx_eq(last[i].x, before[i].x, 1e-9));
        assert!(support::approx_eq(last[i].y, before[i].y - shift, 1e-9));
    }
    assert!(support::approx_eq(last.length(), 140.0, 1e-9));
}

#[test]
fn unit_scales_only_stretch_and_reinterpolate() {
    // Circumference 35π keeps the template height, so only the length
    // stretch and the shaft handle spacing move anything.
    let set = params(200.0, 35.0 * PI, 0.0, 0.0, 0.0);
    let profile = ProfileGenerator::default().generate(&set);
    let template = Profile::template(ShapeConfig::standard());
    let delta = 200.0 - 129.0;

    for i in Zone::Head.range() {
        assert!(support::approx_eq(profile[i].x, template[i].x + delta, 1e-9), "x of {i}");
    }
    for i in 0..POINT_COUNT {
        if Zone::shaft_indices().any(|s| s == i) {
            continue;
        }
        assert!(support::approx_eq(profile[i].y, template[i].y - 17.5, 1e-9), "y of {i}");
    }
    assert!(support::approx_eq(profile[1].x, 155.0 / 3.0, 1e-9));
    assert!(support::approx_eq(profile[2].x, 310.0 / 3.0, 1e-9));
    assert!(support::approx_eq(profile[22].x, 116.0, 1e-9));
    assert!(support::approx_eq(profile[23].x, 58.0, 1e-9));
}

#[test]
fn guard_keeps_neck_clear_of_the_base() {
    let generator = ProfileGenerator::default();
    for circumference in [50.0, 140.0, 280.0, 284.0, 300.0, 140.0 * PI, 2000.0] {
        let set = params(140.0, circumference, 0.0, 0.0, 0.0);
        let widened = snapshot(&generator.generate_traced(&set), Stage::HeadWidthScale);
        let span = widened.length();
        let neck = widened[NECK_NEAR].x - widened[SHAFT_BASE].x;
        assert!(neck >= span * 0.1 - 1e-9, "circumference {circumference}: neck at {neck}");
        assert!(widened[RIM].x > widened[NECK_NEAR].x);
        assert!(widened[RIM].x > widened[NECK_FAR].x);
    }
}

#[test]
fn boundaries_keep_their_meaning() {
    // The rim stays the furthest anchor from the axis for straight shapes.
    let generator = ProfileGenerator::default();
    for length in [50.0, 140.0, 300.0] {
        let profile = generator.generate(&params(length, 140.0, 0.0, 0.0, 0.0));
        let furthest = BOUNDARIES
            .iter()
            .copied()
            .max_by(|&a, &b| profile[a].x.total_cmp(&profile[b].x));
        assert_eq!(furthest, Some(RIM));
    }
}

#[test]
fn template_is_never_mutated() {
    let generator = ProfileGenerator::default();
    let before = Profile::template(generator.config());
    let _ = generator.generate(&params(300.0, 300.0, 60.0, 60.0, 40.0));
    assert_eq!(Profile::template(generator.config()), before);
}

#[test]
fn generation_is_deterministic_across_threads() {
    let generator = ProfileGenerator::default();
    let sets: Vec<ParameterSet> = (0..8)
        .map(|k| {
            let k = k as Real;
            params(60.0 + 30.0 * k, 80.0 + 20.0 * k, -40.0 + 10.0 * k, 5.0, -5.0)
        })
        .collect();
    let serial: Vec<Profile> = sets.iter().map(|s| generator.generate(s)).collect();

    let concurrent: Vec<Profile> = thread::scope(|scope| {
        let handles: Vec<_> = sets
            .iter()
            .map(|s| scope.spawn(move || generator.generate(s)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, concurrent);
    assert_eq!(generator.generate_many(&sets), serial);
}

#[test]
fn presets_pin_their_slots() {
    let generator = ProfileGenerator::default();
    let set = params(120.0, 150.0, 30.0, -30.0, 20.0);

    let straight = generator.generate_preset(Preset::Straight, &set);
    assert_eq!(straight, generator.generate(&params(120.0, 150.0, 0.0, 0.0, 0.0)));

    let narrow = generator.generate_preset(Preset::NarrowStraight, &set);
    assert!(support::approx_eq(narrow.height(), 80.0 / PI, 1e-9));

    let showcase = generator.generate_preset(Preset::Showcase, &set);
    assert_eq!(showcase, generator.generate_preset(Preset::Showcase, &ParameterSet::default()));
    assert!(showcase.validate().is_ok());
}

#[test]
fn tip_tilt_moves_only_the_tip() {
    let generator = ProfileGenerator::default();
    let level = generator.generate(&params(140.0, 140.0, 0.0, 0.0, 0.0));
    let tilted = generator.generate(&params(140.0, 140.0, 0.0, 0.0, 30.0));
    for i in 0..POINT_COUNT {
        if Zone::Tip.range().contains(i) {
            assert!((level[i] - tilted[i]).norm() > 1e-6, "tip point {i} did not move");
        } else {
            assert_eq!(level[i], tilted[i], "point {i} moved");
        }
    }
}
