//! End-to-end tests for the astral core: configuration, context, trigger
//! registration, and the tick cycle working together.

#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::panic
)]

use astral_core::clock::{ClockError, ClockSource, ManualClock};
use astral_core::config::AstralConfig;
use astral_core::context::AstralContext;
use astral_core::runner::{self, NoOpObserver, RunBounds};
use astral_core::scheduler::{self, CycleError};
use astral_destiny::{DestinyError, MAX_TRIGGERS};
use astral_ephemeris::Ephemeris;
use astral_types::{ExecutionMode, MoonPhase, Planet};

/// 2024-01-07 12:00:00 UTC.
const JAN_7: i64 = 1_704_628_800;

/// 2024-01-08 12:00:00 UTC.
const JAN_8: i64 = 1_704_715_200;

/// 2000-01-06 18:14:00 UTC, the lunar reference new moon.
const REFERENCE_NEW_MOON: i64 = 947_182_440;

struct UnpluggedClock;

impl ClockSource for UnpluggedClock {
    fn now(&mut self) -> Result<i64, ClockError> {
        Err(ClockError::Unavailable {
            reason: "no time source".to_owned(),
        })
    }
}

fn utc_context() -> AstralContext {
    AstralContext::new(Ephemeris::offline())
}

// =============================================================================
// Firing
// =============================================================================

#[test]
fn lucky_day_fires_only_on_its_day() {
    let mut ctx = utc_context();
    ctx.registry_mut()
        .add("t1", "numerology_day == 7", "/usr/bin/t1", ExecutionMode::Native)
        .unwrap();

    let on_day = scheduler::run_cycle(&mut ctx, &mut ManualClock::fixed(JAN_7)).unwrap();
    assert_eq!(on_day.fired_names(), vec!["t1"]);
    assert_eq!(on_day.fired[0].action_target, "/usr/bin/t1");

    let next_day = scheduler::run_cycle(&mut ctx, &mut ManualClock::fixed(JAN_8)).unwrap();
    assert!(next_day.fired.is_empty());
    assert_eq!(ctx.current_tick(), 2);
}

#[test]
fn demo_triggers_over_a_lunar_month() {
    let mut ctx = AstralContext::from_config(&AstralConfig::default_with_triggers()).unwrap();
    let mut clock = ManualClock::stepping(REFERENCE_NEW_MOON, 86_400);

    let mut new_moon_fired = 0;
    let mut full_moon_fired = 0;
    let mut lucky_fired = 0;
    for _ in 0..30 {
        let report = scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
        for name in report.fired_names() {
            match name {
                "new_moon_ritual" => new_moon_fired += 1,
                "full_moon_ritual" => full_moon_fired += 1,
                "lucky_seven" => {
                    assert_eq!(report.snapshot.numerology_day, 7);
                    lucky_fired += 1;
                }
                other => panic!("unexpected trigger {other}"),
            }
        }
    }

    // Each phase window spans about 3.7 days.
    assert!((3..=5).contains(&new_moon_fired), "new: {new_moon_fired}");
    assert!((3..=5).contains(&full_moon_fired), "full: {full_moon_fired}");
    // Jan 7 2000 falls inside the 30 days.
    assert_eq!(lucky_fired, 1);
    assert_eq!(ctx.current_tick(), 30);
}

#[test]
fn planet_clause_matches_the_computed_sign() {
    let mut ctx = utc_context();
    let sign = ctx
        .ephemeris()
        .snapshot_at(JAN_7)
        .planet(Planet::Mars)
        .unwrap()
        .sign;
    let condition = format!("planet[\"Mars\"].sign == \"{sign}\"");
    ctx.registry_mut()
        .add("mars", condition, "/usr/bin/mars", ExecutionMode::ObserverOnly)
        .unwrap();

    let report = scheduler::run_cycle(&mut ctx, &mut ManualClock::fixed(JAN_7)).unwrap();
    assert_eq!(report.fired_names(), vec!["mars"]);
}

#[test]
fn vacuous_condition_fires_every_cycle() {
    let mut ctx = utc_context();
    ctx.registry_mut()
        .add("heartbeat", "whenever the stars allow", "/h", ExecutionMode::Native)
        .unwrap();
    let mut clock = ManualClock::stepping(0, 12_345);
    for _ in 0..10 {
        let report = scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
        assert_eq!(report.fired_names(), vec!["heartbeat"]);
    }
}

#[test]
fn contradictory_condition_never_fires() {
    let mut ctx = utc_context();
    ctx.registry_mut()
        .add(
            "either",
            "moon == \"New\" || moon == \"Full\"",
            "/h",
            ExecutionMode::Native,
        )
        .unwrap();
    let mut clock = ManualClock::stepping(REFERENCE_NEW_MOON, 21_600);
    for _ in 0..200 {
        let report = scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
        assert!(report.fired.is_empty());
    }
}

// =============================================================================
// Atomicity and determinism
// =============================================================================

#[test]
fn failed_clock_leaves_the_tick_alone() {
    let mut ctx = utc_context();
    ctx.registry_mut().add("always", "", "/h", ExecutionMode::Native).unwrap();

    for _ in 0..3 {
        scheduler::run_cycle(&mut ctx, &mut ManualClock::fixed(JAN_7)).unwrap();
    }
    let err = scheduler::run_cycle(&mut ctx, &mut UnpluggedClock).unwrap_err();
    assert!(matches!(err, CycleError::ClockUnavailable { .. }));
    assert_eq!(ctx.current_tick(), 3);
}

#[test]
fn snapshots_are_deterministic() {
    let a = utc_context();
    let b = utc_context();
    for ts in [0, REFERENCE_NEW_MOON, JAN_7, JAN_8, -86_400] {
        assert_eq!(a.ephemeris().snapshot_at(ts), b.ephemeris().snapshot_at(ts));
    }
    assert_eq!(
        a.ephemeris().snapshot_at(REFERENCE_NEW_MOON).moon_phase,
        MoonPhase::New
    );
}

#[test]
fn same_inputs_fire_the_same_triggers() {
    let run = || {
        let mut ctx = AstralContext::from_config(&AstralConfig::default_with_triggers()).unwrap();
        let mut clock = ManualClock::stepping(JAN_7, 86_400);
        (0..45)
            .map(|_| {
                let report = scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
                report
                    .fired_names()
                    .into_iter()
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

// =============================================================================
// Capacity
// =============================================================================

#[test]
fn registry_rejects_the_trigger_past_capacity() {
    let mut ctx = utc_context();
    for i in 0..MAX_TRIGGERS {
        ctx.registry_mut()
            .add(format!("t{i}"), "", "/h", ExecutionMode::Native)
            .unwrap();
    }
    let err = ctx
        .registry_mut()
        .add("one_too_many", "", "/h", ExecutionMode::Native)
        .unwrap_err();
    assert!(matches!(err, DestinyError::CapacityExceeded { .. }));
    assert_eq!(ctx.registry().len(), MAX_TRIGGERS);

    let report = scheduler::run_cycle(&mut ctx, &mut ManualClock::fixed(JAN_7)).unwrap();
    assert_eq!(report.fired.len(), MAX_TRIGGERS);
}

// =============================================================================
// Souls and the bounded loop
// =============================================================================

#[test]
fn souls_born_mid_run_record_the_current_tick() {
    let mut ctx = utc_context();
    let mut clock = ManualClock::stepping(JAN_7, 60);
    scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
    scheduler::run_cycle(&mut ctx, &mut clock).unwrap();

    let id = ctx.souls_mut().create("late_bloomer", "moon == \"Full\"").unwrap();
    assert_eq!(ctx.souls().get(id).unwrap().birth_tick, 2);

    scheduler::run_cycle(&mut ctx, &mut clock).unwrap();
    assert_eq!(ctx.souls().get(id).unwrap().birth_tick, 2);
}

#[tokio::test]
async fn bounded_run_counts_every_cycle() {
    let mut ctx = AstralContext::from_config(&AstralConfig::default_with_triggers()).unwrap();
    let bounds = RunBounds {
        max_ticks: 24,
        tick_interval: std::time::Duration::ZERO,
    };
    let summary = runner::run_bounded(
        &mut ctx,
        &mut ManualClock::stepping(JAN_7, 86_400),
        bounds,
        &mut NoOpObserver,
    )
    .await
    .unwrap();
    assert_eq!(summary.completed, 24);
    assert_eq!(summary.final_tick, 24);
    assert_eq!(ctx.current_tick(), 24);
}
