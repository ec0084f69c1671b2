//! Tunable gameplay constants.
//!
//! Units are pixels and seconds. Velocities are pixels per second.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub viewport: Vec2,
    /// Top of the player's box; the player is pinned to it.
    pub ground_y: f32,
    pub room_margin_left: f32,
    pub room_margin_right: f32,

    pub player_speed: f32,
    pub player_run_speed: f32,
    pub player_max_health: u32,
    pub player_attack_cooldown: f32,
    pub player_attack_damage: u32,
    pub player_invulnerability: f32,
    pub potion_heal: u32,

    /// Real-time delay before the hurt flag is cleared. Independent of invulnerability.
    pub hurt_clear_delay: f32,
    /// Percentage of incoming damage removed while defending.
    pub defend_mitigation_percent: u32,

    pub boss_max_health: u32,
    pub boss_speed: f32,
    /// Distances at or under this engage; anything farther is chased.
    pub boss_attack_range: f32,
    pub boss_attack_cooldown: f32,
    pub boss_strike_delay: f32,
    pub boss_settle_time: f32,
    pub boss_strike_damage: u32,
    pub boss_invulnerability: f32,

    pub victory_delay: f32,
    pub defeat_delay: f32,

    /// Idle bob speed of collectibles, radians per second.
    pub item_bob_rate: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1200.0, 700.0),
            ground_y: 500.0,
            room_margin_left: 50.0,
            room_margin_right: 100.0,

            player_speed: 180.0,
            player_run_speed: 300.0,
            player_max_health: 100,
            player_attack_cooldown: 0.5,
            player_attack_damage: 20,
            player_invulnerability: 1.0,
            potion_heal: 30,

            hurt_clear_delay: 0.3,
            defend_mitigation_percent: 70,

            boss_max_health: 300,
            boss_speed: 90.0,
            boss_attack_range: 150.0,
            boss_attack_cooldown: 2.0,
            boss_strike_delay: 0.4,
            boss_settle_time: 0.5,
            boss_strike_damage: 15,
            boss_invulnerability: 0.5,

            victory_delay: 2.0,
            defeat_delay: 1.5,

            item_bob_rate: 3.0,
        }
    }
}
