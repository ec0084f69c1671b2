//! Combat plugin.
//!
//! Detection and damage are split:
//!
//! - [`resolve_attack`] is pure: attacker swing box vs. defender bodies.
//! - [`apply_damage`] mutates a single combatant and reports what happened.
//! - [`deliver_hit`] applies a hit inside the simulation and schedules the
//!   follow-ups (hurt expiry, outcome announcement).
//!
//! Delayed follow-ups live in [`effects`] and are drained by the clock stage.
//!
//! ```text
//! SimSet::Combat:
//!   player swing  --resolve_attack-->  bosses in current room  --deliver_hit-->
//! SimSet::Clock (later tick):
//!   StrikeCheck   --resolve_attack-->  player                  --deliver_hit-->
//! ```

pub mod effects;

use bevy::prelude::*;

use crate::common::{actor::Vitals, collision::Hitbox, tunables::Tunables};
use crate::plugins::sim::{SimSet, SimulationContext};
use crate::plugins::ui::UiEvent;

use self::effects::{ActorRef, Effect};

// -----------------------------------------------------------------------------
// Combatant capability
// -----------------------------------------------------------------------------

/// What the resolver needs from an actor.
///
/// Hitboxes are views over the actor's current state; nothing here is cached.
pub trait Combatant {
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Body box, used as the defender side of every overlap test.
    fn hitbox(&self) -> Hitbox;

    /// Swing box. `None` outside the attacking state.
    fn attack_hitbox(&self) -> Option<Hitbox>;

    fn is_defending(&self) -> bool {
        false
    }

    fn is_dead(&self) -> bool;

    /// Seconds of invulnerability granted by a non-lethal, unmitigated hit.
    fn invulnerability_window(&self, tunables: &Tunables) -> f32;

    fn enter_hurt(&mut self);
    fn enter_dead(&mut self);
}

// -----------------------------------------------------------------------------
// Detection
// -----------------------------------------------------------------------------

/// One overlapping defender, by index into the slice handed to [`resolve_attack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub defender: usize,
    pub damage: u32,
}

/// Test the attacker's swing against every defender body.
///
/// No side effects. Dead defenders are still reported; [`apply_damage`] ignores them.
pub fn resolve_attack<A, D>(attacker: &A, damage: u32, defenders: &[D]) -> Vec<Hit>
where
    A: Combatant + ?Sized,
    D: Combatant,
{
    let Some(swing) = attacker.attack_hitbox() else {
        return Vec::new();
    };

    defenders
        .iter()
        .enumerate()
        .filter(|(_, defender)| swing.overlaps(&defender.hitbox()))
        .map(|(defender, _)| Hit { defender, damage })
        .collect()
}

// -----------------------------------------------------------------------------
// Damage
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead target, or an invulnerable one that was not defending.
    Ignored,
    /// Mitigated by defending. No invulnerability, no hurt state.
    Blocked { dealt: u32 },
    Hurt { dealt: u32 },
    /// Health reached zero on this hit. Reported once per actor.
    Killed { dealt: u32 },
}

impl DamageOutcome {
    pub fn dealt(self) -> u32 {
        match self {
            Self::Ignored => 0,
            Self::Blocked { dealt } | Self::Hurt { dealt } | Self::Killed { dealt } => dealt,
        }
    }
}

/// Damage left after defending. Integer floor, so 100 -> 30 and 15 -> 4.
#[inline]
pub fn mitigate(raw: u32, mitigation_percent: u32) -> u32 {
    raw.saturating_mul(100 - mitigation_percent.min(100)) / 100
}

/// Apply `raw` damage to one combatant.
///
/// Defending mitigates even through an invulnerability window and never starts
/// one. Otherwise an invulnerable target discards the hit outright.
pub fn apply_damage<C>(target: &mut C, raw: u32, tunables: &Tunables) -> DamageOutcome
where
    C: Combatant + ?Sized,
{
    if target.is_dead() || target.vitals().is_depleted() {
        return DamageOutcome::Ignored;
    }

    let defending = target.is_defending();
    if !defending && target.vitals().is_invulnerable() {
        return DamageOutcome::Ignored;
    }

    let amount = if defending {
        mitigate(raw, tunables.defend_mitigation_percent)
    } else {
        raw
    };
    let dealt = target.vitals_mut().lose(amount);

    if target.vitals().is_depleted() {
        target.enter_dead();
        return DamageOutcome::Killed { dealt };
    }
    if defending {
        return DamageOutcome::Blocked { dealt };
    }

    let window = target.invulnerability_window(tunables);
    target.vitals_mut().invulnerability.restart(window);
    target.enter_hurt();
    DamageOutcome::Hurt { dealt }
}

/// Apply a hit to an actor of the simulation and schedule what follows.
pub fn deliver_hit(
    ctx: &mut SimulationContext,
    target: ActorRef,
    raw: u32,
    tunables: &Tunables,
) -> DamageOutcome {
    let outcome = match target {
        ActorRef::Player => apply_damage(&mut ctx.player, raw, tunables),
        ActorRef::Boss(boss) => match ctx.rooms.boss_mut(boss) {
            Some(boss) => apply_damage(boss, raw, tunables),
            None => return DamageOutcome::Ignored,
        },
    };

    match outcome {
        DamageOutcome::Ignored => return outcome,
        DamageOutcome::Blocked { .. } => {}
        DamageOutcome::Hurt { .. } => {
            ctx.schedule(tunables.hurt_clear_delay, Effect::ClearHurt(target), Some(target));
        }
        DamageOutcome::Killed { .. } => match target {
            ActorRef::Player => {
                info!("player defeated");
                ctx.schedule(tunables.defeat_delay, Effect::Announce { victory: false }, None);
            }
            ActorRef::Boss(_) => {
                if ctx.rooms.all_bosses_dead() {
                    info!("last boss defeated");
                    ctx.schedule(tunables.victory_delay, Effect::Announce { victory: true }, None);
                }
            }
        },
    }

    debug!(?target, ?outcome, "hit");
    if target == ActorRef::Player {
        let vitals = ctx.player.vitals;
        ctx.emit(UiEvent::HealthChanged {
            current: vitals.health(),
            max: vitals.max_health(),
        });
    }
    outcome
}

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(Update, resolve_player_attack.in_set(SimSet::Combat));
}

fn resolve_player_attack(tunables: Res<Tunables>, mut ctx: ResMut<SimulationContext>) {
    step_combat(&mut ctx, &tunables);
}

/// Combat stage of the tick: the player's swing against the current room's bosses.
///
/// Boss swings are not resolved here; they land through scheduled strike checks.
pub fn step_combat(ctx: &mut SimulationContext, tunables: &Tunables) {
    let room = ctx.current_room;
    let hits = match ctx.rooms.get(room) {
        Some(r) => resolve_attack(&ctx.player, tunables.player_attack_damage, &r.bosses),
        None => return,
    };

    for hit in hits {
        let target = ActorRef::Boss(effects::BossRef { room, index: hit.defender });
        deliver_hit(ctx, target, hit.damage, tunables);
    }
}
