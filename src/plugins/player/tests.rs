use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{TestRng, run_system_once};

const DT: f32 = 1.0 / 60.0;
const ROOM_WIDTH: f32 = 2000.0;

fn grounded_player(x: f32, t: &Tunables) -> Player {
    let mut p = Player::spawn(x, t);
    p.update(&Intent::default(), ROOM_WIDTH, t, DT);
    p
}

fn held(f: impl FnOnce(&mut Intent)) -> Intent {
    let mut intent = Intent::default();
    f(&mut intent);
    intent
}

#[test]
fn first_tick_shows_jump_then_idle() {
    let t = Tunables::default();
    let mut p = Player::spawn(100.0, &t);

    p.update(&Intent::default(), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Jump);

    p.update(&Intent::default(), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Idle);
    assert_eq!(p.state.label(), "IDLE");
}

#[test]
fn move_right_walks_and_faces_right() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);
    p.facing = Facing::Left;

    p.update(&held(|i| i.move_right = true), ROOM_WIDTH, &t, 0.5);

    assert_eq!(p.state, PlayerState::Move { running: false });
    assert_eq!(p.facing, Facing::Right);
    assert_eq!(p.velocity.x, t.player_speed);
    assert!((p.position.x - (500.0 + t.player_speed * 0.5)).abs() < 1e-3);
}

#[test]
fn run_uses_run_speed_and_label() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);

    p.update(&held(|i| { i.move_left = true; i.run = true; }), ROOM_WIDTH, &t, DT);

    assert_eq!(p.velocity.x, -t.player_run_speed);
    assert_eq!(p.facing, Facing::Left);
    assert_eq!(p.state.label(), "RUN");
}

#[test]
fn right_wins_when_both_directions_held() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);

    p.update(&held(|i| { i.move_left = true; i.move_right = true; }), ROOM_WIDTH, &t, DT);

    assert_eq!(p.velocity.x, t.player_speed);
    assert_eq!(p.facing, Facing::Right);
}

#[test]
fn position_is_clamped_to_room_margins_and_pinned_to_ground() {
    let t = Tunables::default();
    let mut p = grounded_player(60.0, &t);
    p.position.y = -999.0;

    p.update(&held(|i| i.move_left = true), ROOM_WIDTH, &t, 1.0);
    assert_eq!(p.position.x, t.room_margin_left);
    assert_eq!(p.position.y, t.ground_y);

    for _ in 0..200 {
        p.update(&held(|i| { i.move_right = true; i.run = true; }), ROOM_WIDTH, &t, 0.1);
    }
    assert_eq!(p.position.x, ROOM_WIDTH - t.room_margin_right);
}

#[test]
fn defend_stops_motion() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);

    p.update(&held(|i| { i.defend = true; i.move_right = true; }), ROOM_WIDTH, &t, DT);

    assert_eq!(p.state, PlayerState::Defend);
    assert_eq!(p.velocity.x, 0.0);
    assert_eq!(p.position.x, 500.0);
    assert!(p.is_defending());
}

#[test]
fn attack_starts_cooldown_and_ignores_input_until_it_elapses() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);

    p.update(&held(|i| i.attack = true), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Attack { combo: 0, elapsed: 0.0 });
    assert_eq!(p.attack_cooldown.get(), t.player_attack_cooldown);

    // Defend and movement are ignored while the swing is in progress.
    p.update(&held(|i| { i.defend = true; i.move_left = true; }), ROOM_WIDTH, &t, 0.1);
    match p.state {
        PlayerState::Attack { combo: 0, elapsed } => assert!((elapsed - 0.1).abs() < 1e-6),
        other => panic!("expected attack to continue, got {other:?}"),
    }
    assert_eq!(p.facing, Facing::Right);

    // Once the cooldown elapses, input is honoured again.
    p.update(&held(|i| i.defend = true), ROOM_WIDTH, &t, 1.0);
    assert_eq!(p.state, PlayerState::Defend);
}

#[test]
fn attack_hitbox_only_exists_while_attacking_and_sits_in_front() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);
    assert!(p.attack_hitbox().is_none());

    p.update(&held(|i| i.attack = true), ROOM_WIDTH, &t, DT);
    let swing = p.attack_hitbox().expect("attacking player has a swing box");
    assert_eq!(swing.x, 500.0 + FRAME_SIZE * SCALE);
    assert_eq!(swing.width, SWING_REACH);

    p.facing = Facing::Left;
    let swing = p.attack_hitbox().expect("attacking player has a swing box");
    assert_eq!(swing.x, 500.0 - SWING_REACH);
}

#[test]
fn combo_cycles_through_three_variants_with_jittered_ticks() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);
    let mut rng = TestRng::new(0x12345678_9ABCDEF0);

    // A fresh swing is the only tick where the animation cursor reads zero.
    let mut combos = Vec::new();
    while combos.len() < 12 {
        p.update(&held(|i| i.attack = true), ROOM_WIDTH, &t, rng.range_f32(0.001, 0.05));
        if let PlayerState::Attack { combo, elapsed: 0.0 } = p.state {
            combos.push(combo);
        }
    }

    assert_eq!(combos, vec![0, 1, 2, 0, 1, 2, 0, 1, 2, 0, 1, 2]);
}

#[test]
fn hurt_holds_until_recovered() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);

    p.enter_hurt();
    for _ in 0..30 {
        p.update(&held(|i| i.move_right = true), ROOM_WIDTH, &t, DT);
        assert_eq!(p.state, PlayerState::Hurt);
    }
    assert_eq!(p.position.x, 500.0);

    p.recover();
    p.update(&held(|i| i.move_right = true), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Move { running: false });
}

#[test]
fn dead_is_terminal() {
    let t = Tunables::default();
    let mut p = grounded_player(500.0, &t);
    p.vitals.lose(u32::MAX);

    p.update(&held(|i| i.attack = true), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Dead);

    // Nothing revives it: not healing, not recovery, not input.
    p.vitals.heal(50);
    p.recover();
    p.update(&held(|i| { i.move_right = true; i.defend = true; }), ROOM_WIDTH, &t, DT);
    assert_eq!(p.state, PlayerState::Dead);
    assert_eq!(p.state.label(), "DEATH");
    assert_eq!(p.velocity, Vec2::ZERO);
}

#[test]
fn gather_input_maps_keys() {
    let mut world = World::new();
    world.insert_resource(Intent::default());

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowRight);
    keys.press(KeyCode::ShiftLeft);
    keys.press(KeyCode::KeyE);
    world.insert_resource(keys);

    run_system_once(&mut world, super::gather_input);

    let intent = *world.resource::<Intent>();
    assert_eq!(
        intent,
        Intent { move_right: true, run: true, interact: true, ..default() }
    );
}

#[test]
fn gather_input_is_a_no_op_without_keyboard() {
    let mut world = World::new();
    let scripted = Intent { attack: true, ..default() };
    world.insert_resource(scripted);

    run_system_once(&mut world, super::gather_input);

    assert_eq!(*world.resource::<Intent>(), scripted);
}
