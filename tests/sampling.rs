use trento::core::collider::sample_impact_parameter;
use trento::core::random;
use trento::error::Result;
use trento::{
    BlackDisk, Collider, CollisionSettings, EventRecord, ParticipantProfile, Proton, RunConfig,
};

/// Impact parameters are area-weighted: b^2 is uniform on [bmin^2, bmax^2].
/// One-sample Kolmogorov-Smirnov test against the closed-form CDF at the
/// 0.1% level (critical value 1.95 / sqrt(n)).
#[test]
fn impact_parameter_squared_is_uniform() {
    let (b_min, b_max) = (1.0, 4.0);
    let n = 20_000usize;
    let mut rng = random::engine(Some(2015));

    let mut u: Vec<f64> = (0..n)
        .map(|_| {
            let b = sample_impact_parameter(b_min, b_max, &mut rng);
            assert!((b_min..=b_max).contains(&b), "b = {b} out of range");
            (b * b - b_min * b_min) / (b_max * b_max - b_min * b_min)
        })
        .collect();
    u.sort_by(f64::total_cmp);

    let d = u
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let lo = i as f64 / n as f64;
            let hi = (i + 1) as f64 / n as f64;
            (x - lo).abs().max((hi - x).abs())
        })
        .fold(0.0_f64, f64::max);
    let critical = 1.95 / (n as f64).sqrt();
    assert!(d < critical, "KS statistic {d} exceeds {critical}");
}

/// Uniform-in-b sampling would put half the draws below the midpoint;
/// area weighting puts only a quarter of [0, bmax] draws below bmax/2.
#[test]
fn small_impact_parameters_are_suppressed() {
    let mut rng = random::engine(Some(7));
    let n = 40_000;
    let below = (0..n)
        .filter(|_| sample_impact_parameter(0.0, 2.0, &mut rng) < 1.0)
        .count();
    let frac = below as f64 / n as f64;
    assert!((frac - 0.25).abs() < 0.01, "fraction below b_max/2: {frac}");
}

/// p+p with a black disk of radius 1 fm inside b_max = 5 fm: each trial is
/// accepted with probability (1/5)^2, so trials are geometric with mean 25,
/// every accepted b is below 1 fm and exactly one pair collides.
#[test]
fn proton_proton_trigger_statistics() -> Result<()> {
    let settings = CollisionSettings {
        b_min: 0.0,
        b_max: 5.0,
        number_events: 2000,
        track_binary_collisions: true,
        track_trials: true,
    };
    let mut collider = Collider::new(
        Box::new(Proton::new()),
        Box::new(Proton::new()),
        Box::new(BlackDisk::with_distance(1.0)?),
        &settings,
        Some(31415),
    )?;
    let mut records: Vec<EventRecord> = Vec::new();
    collider.run_events(&mut ParticipantProfile::new(), &mut records)?;

    assert_eq!(records.len(), 2000);
    let mut total_trials = 0u64;
    for r in &records {
        assert!(r.collision.impact_parameter < 1.0);
        assert_eq!(r.collision.binary_collisions, 1);
        assert_eq!(r.event.npart, 2);
        assert!(r.collision.trials >= 1);
        total_trials += r.collision.trials;
    }
    let mean = total_trials as f64 / records.len() as f64;
    assert!((22.0..28.0).contains(&mean), "mean trials {mean}");
    Ok(())
}

/// Accepted impact parameters never exceed the derived b_max, and the derived
/// b_max is the sum of radii plus the interaction range.
#[test]
fn derived_bmax_bounds_accepted_events() -> Result<()> {
    let mut config = RunConfig::new("Cu".parse()?, "Au".parse()?);
    config.number_events = 50;
    config.random_seed = Some(99);
    let mut collider = Collider::from_config(&config)?;

    let expected = 4.20 + 6.38 + (6.4 / std::f64::consts::PI).sqrt();
    let params = *collider.params();
    assert!((params.b_max - expected).abs() < 1e-12);
    assert!((params.asymmetry - 4.20 / (4.20 + 6.38)).abs() < 1e-12);

    let mut records: Vec<EventRecord> = Vec::new();
    collider.run_events(&mut ParticipantProfile::new(), &mut records)?;
    for r in &records {
        assert!(r.collision.impact_parameter <= params.b_max);
        assert!(r.event.npart >= 2);
        assert!(r.event.eccentricity.iter().all(|e| (0.0..=1.0).contains(e)));
    }
    Ok(())
}

/// Restricting b to a narrow window keeps every accepted event inside it.
#[test]
fn centrality_window_is_respected() -> Result<()> {
    let mut config = RunConfig::new("Pb".parse()?, "Pb".parse()?);
    config.number_events = 20;
    config.b_min = 8.0;
    config.b_max = 9.0;
    config.random_seed = Some(5);
    let mut collider = Collider::from_config(&config)?;
    let mut records: Vec<EventRecord> = Vec::new();
    collider.run_events(&mut ParticipantProfile::new(), &mut records)?;
    for r in &records {
        let b = r.collision.impact_parameter;
        assert!((8.0..=9.0).contains(&b), "b = {b}");
    }
    Ok(())
}
