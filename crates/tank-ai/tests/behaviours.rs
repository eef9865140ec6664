mod common;

use common::{approx, effectors, value_of, Harness};
use glam::Vec3;
use tank_ai::behaviours::{spin, steer_toward_target, target_unit, track, track_behaviour};
use tank_ai::{build_behaviour, BehaviourKind, Effector, TARGET_ON_RIGHT};
use tank_bt::{NodeType, Stops};
use tank_tools::{TraceLog, TRACE_LOG};

const AHEAD_RIGHT: Vec3 = Vec3::new(4.0, 0.0, 10.0);
const AHEAD_LEFT: Vec3 = Vec3::new(-4.0, 0.0, 10.0);
const BEHIND_RIGHT: Vec3 = Vec3::new(2.0, 0.0, -10.0);
const BEHIND_LEFT: Vec3 = Vec3::new(-2.0, 0.0, -10.0);

fn child_names(kind: BehaviourKind) -> Vec<String> {
    build_behaviour::<common::TestWorld>(kind.index())
        .shape()
        .children
        .into_iter()
        .map(|c| c.name)
        .collect()
}

#[test]
fn factory_maps_indices_to_named_trees() {
    for kind in BehaviourKind::ALL {
        assert_eq!(BehaviourKind::from_index(kind.index()), Some(kind));
    }

    let fun = build_behaviour::<common::TestWorld>(0).shape();
    assert_eq!(fun.node_type, NodeType::Sequence);
    assert_eq!(fun.name, "FireAndTurn");
    assert_eq!(child_names(BehaviourKind::Fun), ["Turn(1)", "Fire(0)"]);

    let deadly = build_behaviour::<common::TestWorld>(1).shape();
    assert_eq!(deadly.name, "DeadlyFireAndTurn");
    assert_eq!(
        child_names(BehaviourKind::Deadly),
        ["Move(sin(2t))", "Turn(sin(t))", "Fire(0)"]
    );

    let frightened = build_behaviour::<common::TestWorld>(2).shape();
    assert_eq!(frightened.name, "RetreatAndFire");
    assert_eq!(
        child_names(BehaviourKind::Frightened),
        ["Move(sin(t) - 0.6)", "Fire(0.5)", "TargetUnit every 0.1s"]
    );

    let unpredictable = build_behaviour::<common::TestWorld>(3).shape();
    assert_eq!(unpredictable.node_type, NodeType::Selector);
    assert_eq!(unpredictable.name, "Unpredictable");
    assert_eq!(
        child_names(BehaviourKind::Unpredictable),
        [
            "time % 20 < 4",
            "time % 20 > 16",
            "time % 20 > 10",
            "time % 20 > 5",
            "TargetUnit every 0.1s",
        ]
    );
}

#[test]
fn unknown_index_falls_back_to_idle_turn() {
    for index in [-1, 4, 99] {
        let shape = build_behaviour::<common::TestWorld>(index).shape();
        assert_eq!(shape.node_type, NodeType::Action);
        assert_eq!(shape.name, "Turn(0.1)");
    }

    let mut h = Harness::new(build_behaviour(7));
    assert_eq!(h.frame(0.0), vec![(Effector::Turn, 0.1)]);
    assert_eq!(h.frame(0.02), vec![(Effector::Turn, 0.1)]);
}

#[test]
fn fun_spins_and_fires_every_frame() {
    let mut h = Harness::new(BehaviourKind::Fun.build());
    for frame in 0..3 {
        let commands = h.frame(f64::from(frame) * 0.02);
        assert_eq!(commands, vec![(Effector::Turn, 1.0), (Effector::Fire, 0.0)]);
    }
}

#[test]
fn deadly_weaves_on_sine_curves() {
    let mut h = Harness::new(BehaviourKind::Deadly.build());
    let commands = h.frame(0.5);
    assert_eq!(effectors(&commands), [Effector::Move, Effector::Turn, Effector::Fire]);
    assert!(approx(commands[0].1, 1f32.sin()));
    assert!(approx(commands[1].1, 0.5f32.sin()));
    assert_eq!(commands[2].1, 0.0);
}

#[test]
fn steering_follows_target_side() {
    let mut h = Harness::with_root(steer_toward_target(0.3, Stops::None));

    h.blackboard.set(TARGET_ON_RIGHT, true);
    assert_eq!(h.frame(0.0), vec![(Effector::Turn, 0.3)]);

    h.blackboard.set(TARGET_ON_RIGHT, false);
    assert_eq!(h.frame(0.1), vec![(Effector::Turn, -0.3)]);

    h.blackboard.remove(TARGET_ON_RIGHT);
    assert_eq!(h.frame(0.2), vec![(Effector::Turn, -0.3)]);
}

#[test]
fn target_unit_refreshes_perception_before_steering() {
    let mut h = Harness::with_root(target_unit());

    h.world.target = Some(AHEAD_RIGHT);
    assert_eq!(h.frame(0.0), vec![(Effector::Turn, 0.3)]);

    h.world.target = Some(AHEAD_LEFT);
    assert_eq!(h.frame(0.02), vec![(Effector::Turn, -0.3)]);
}

#[test]
fn target_unit_without_target_turns_left() {
    let mut h = Harness::with_root(target_unit());
    h.world.target = None;
    assert_eq!(h.frame(0.0), vec![(Effector::Turn, -0.3)]);
}

#[test]
fn frightened_backs_away_fires_and_tracks_in_one_frame() {
    let mut h = Harness::new(BehaviourKind::Frightened.build());
    h.world.target = Some(BEHIND_RIGHT);

    let first = h.frame(0.0);
    assert_eq!(
        first,
        vec![
            (Effector::Move, -0.6),
            (Effector::Fire, 0.5),
            (Effector::Turn, 0.3),
        ]
    );

    h.world.target = Some(BEHIND_LEFT);
    let second = h.frame(1.0);
    assert!(approx(value_of(&second, Effector::Move).unwrap(), 1f32.sin() - 0.6));
    assert_eq!(value_of(&second, Effector::Turn), Some(-0.3));
}

fn unpredictable_at(time: f64) -> Vec<(Effector, f32)> {
    let mut h = Harness::new(BehaviourKind::Unpredictable.build());
    h.world.target = Some(AHEAD_RIGHT);
    h.frame(time)
}

#[test]
fn unpredictable_picks_window_by_cycle_time() {
    // time % 20 < 4
    assert_eq!(
        unpredictable_at(2.0),
        vec![(Effector::Turn, 1.0), (Effector::Fire, 0.0)]
    );

    // time % 20 > 16
    let deadly = unpredictable_at(18.0);
    assert_eq!(effectors(&deadly), [Effector::Move, Effector::Turn, Effector::Fire]);
    assert!(approx(deadly[0].1, 36f32.sin()));

    // time % 20 > 10
    let retreat = unpredictable_at(12.0);
    assert_eq!(effectors(&retreat), [Effector::Move, Effector::Fire, Effector::Turn]);
    assert!(approx(retreat[0].1, 12f32.sin() - 0.6));
    assert_eq!(retreat[1].1, 0.5);
    assert_eq!(retreat[2].1, 0.3);

    // time % 20 > 5
    assert_eq!(
        unpredictable_at(7.0),
        vec![(Effector::Move, 1.0), (Effector::Fire, 0.2), (Effector::Turn, 0.3)]
    );

    // otherwise
    assert_eq!(unpredictable_at(4.5), vec![(Effector::Turn, 0.3)]);
}

#[test]
fn unpredictable_window_boundaries_are_strict() {
    assert_eq!(unpredictable_at(4.0), vec![(Effector::Turn, 0.3)]);
    assert_eq!(unpredictable_at(5.0), vec![(Effector::Turn, 0.3)]);
    assert_eq!(value_of(&unpredictable_at(10.0), Effector::Move), Some(1.0));
    assert_eq!(value_of(&unpredictable_at(16.0), Effector::Fire), Some(0.5));
}

#[test]
fn unpredictable_wraps_every_twenty_seconds() {
    assert_eq!(unpredictable_at(22.0), unpredictable_at(2.0));
    assert_eq!(unpredictable_at(47.0), unpredictable_at(7.0));
    assert_eq!(unpredictable_at(24.5), vec![(Effector::Turn, 0.3)]);
}

#[test]
fn track_settles_then_takes_a_random_shot() {
    let mut h = Harness::with_root(track());
    h.world.target = Some(Vec3::new(0.0, 0.0, 12.0));

    assert_eq!(h.frame(0.0), vec![(Effector::Turn, 0.0)]);
    assert!(h.frame(1.0).is_empty());
    assert!(h.frame(1.9).is_empty());

    let shot = h.frame(2.0);
    assert_eq!(effectors(&shot), [Effector::Fire]);
    assert!((0.0..1.0).contains(&shot[0].1));
}

#[test]
fn track_abandons_the_shot_when_the_target_drifts() {
    let mut h = Harness::with_root(track());
    h.blackboard.set(TRACE_LOG, TraceLog::default());
    h.world.target = Some(Vec3::new(0.0, 0.0, 12.0));

    assert_eq!(h.frame(0.0), vec![(Effector::Turn, 0.0)]);

    h.world.target = Some(Vec3::new(10.0, 0.0, 1.0));
    assert!(h.frame(0.1).is_empty());
    assert_eq!(h.frame(0.2), vec![(Effector::Turn, 0.2)]);
    assert_eq!(h.frame(2.0), vec![(Effector::Turn, 0.2)]);

    let log = h.blackboard.get(TRACE_LOG).unwrap();
    assert_eq!(log.with_tag("tank.fire").count(), 0);
    assert_eq!(log.with_tag("bt.condition.abort").count(), 1);
}

#[test]
fn spin_is_a_plain_turn_and_fire() {
    let mut h = Harness::with_root(spin(-0.5, 0.25));
    assert_eq!(h.policy.shape().name, "Spin");
    assert_eq!(h.frame(0.0), vec![(Effector::Turn, -0.5), (Effector::Fire, 0.25)]);
}

#[test]
fn track_tree_outline() {
    let shape = track_behaviour::<common::TestWorld>().shape();
    assert_eq!(shape.node_type, NodeType::Service);
    assert_eq!(shape.name, "Track every 0.2s");

    let aim = shape.find("targetOffCentre <= 0.1").unwrap();
    assert_eq!(aim.node_type, NodeType::BlackboardCondition);
    let settle: Vec<_> = aim.children[0].children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(settle, ["Turn(0)", "2s", "Fire(random)"]);
}
