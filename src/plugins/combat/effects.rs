//! Scheduled delayed effects.
//!
//! A delayed follow-up (boss strike landing, hurt expiry, outcome announcement)
//! is a queue entry `{ fire_at, effect, guard }` on the simulation clock.
//! The clock stage drains due entries in fire order, ties in scheduling order.
//!
//! An entry may outlive the situation that scheduled it, so the guard is
//! re-checked right before the effect touches anything:
//! - the epoch must match (a restart invalidates everything queued before it)
//! - the subject actor, if any, must still exist and not be dead
//!
//! Failing entries are dropped, not reported.

use std::slice;

use bevy::prelude::*;

use super::{Combatant, deliver_hit, resolve_attack};
use crate::common::tunables::Tunables;
use crate::plugins::rooms::RoomId;
use crate::plugins::sim::{Outcome, SimulationContext};

/// Stable address of a boss: the room that owns it and its slot there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BossRef {
    pub room: RoomId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorRef {
    Player,
    Boss(BossRef),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Re-test the boss swing against the player at fire time.
    StrikeCheck { boss: BossRef, damage: u32 },
    ClearHurt(ActorRef),
    Announce { victory: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard {
    pub epoch: u32,
    pub subject: Option<ActorRef>,
}

impl Guard {
    pub fn holds(&self, ctx: &SimulationContext) -> bool {
        self.epoch == ctx.epoch
            && self
                .subject
                .is_none_or(|actor| ctx.actor(actor).is_some_and(|c| !c.is_dead()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEffect {
    pub fire_at: f64,
    pub effect: Effect,
    pub guard: Guard,
    seq: u64,
}

#[derive(Debug, Default, Clone)]
pub struct EffectQueue {
    pending: Vec<ScheduledEffect>,
    next_seq: u64,
}

impl EffectQueue {
    pub fn schedule(&mut self, fire_at: f64, effect: Effect, guard: Guard) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledEffect { fire_at, effect, guard, seq });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every entry with `fire_at <= now`, in firing order.
    pub fn drain_due(&mut self, now: f64) -> Vec<ScheduledEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|e| e.fire_at <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due
    }
}

/// Fire everything due at the current clock reading.
///
/// Stops early once an outcome is decided; the simulation is frozen from then on.
pub fn run_due(ctx: &mut SimulationContext, tunables: &Tunables) {
    for entry in ctx.effects.drain_due(ctx.clock) {
        if ctx.is_over() {
            break;
        }
        if !entry.guard.holds(ctx) {
            debug!(effect = ?entry.effect, "dropping stale effect");
            continue;
        }
        fire(ctx, entry.effect, tunables);
    }
}

fn fire(ctx: &mut SimulationContext, effect: Effect, tunables: &Tunables) {
    match effect {
        Effect::StrikeCheck { boss, damage } => {
            // The player left the room while the swing was in the air.
            if boss.room != ctx.current_room {
                debug!(?boss, "strike missed: player left the room");
                return;
            }
            let Some(attacker) = ctx.rooms.boss(boss) else {
                return;
            };
            let landed = !resolve_attack(attacker, damage, slice::from_ref(&ctx.player)).is_empty();
            if landed {
                deliver_hit(ctx, ActorRef::Player, damage, tunables);
            }
        }
        Effect::ClearHurt(ActorRef::Player) => ctx.player.recover(),
        Effect::ClearHurt(ActorRef::Boss(boss)) => {
            if let Some(boss) = ctx.rooms.boss_mut(boss) {
                boss.recover();
            }
        }
        Effect::Announce { victory } => {
            ctx.finish(if victory { Outcome::Victory } else { Outcome::Defeat });
        }
    }
}
