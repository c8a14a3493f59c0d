//! Discrete contact resolution between the protagonist and everything else on the board.
//!
//! Games build a [`CollisionProbe`] from logical cells once per fixed tick, after motion has
//! settled for that tick, and apply the returned outcomes in order. The resolver never mutates
//! game state itself.
//!
//! Rules:
//! - an occupant sharing the protagonist's cell produces exactly one outcome;
//! - a vulnerable hazard is devoured even while shielded;
//! - a harmful hazard damages at most once per tick and never through a shield;
//! - hazards exactly `near_miss_radius` away yield a near miss, every tick they stay there.

use std::collections::BTreeSet;

use crate::types::{EnemyId, GridCell, ObstacleId, PickupId, manhattan};

/// Non-owning handle to whatever produced a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactRef {
    Enemy(EnemyId),
    Obstacle(ObstacleId),
    Pickup(PickupId),
    Goal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Glyph,
    PowerGlyph,
    Rivet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupantRole {
    Pickup(PickupKind),
    Hazard { vulnerable: bool },
    Goal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub contact: ContactRef,
    pub cell: GridCell,
    pub role: OccupantRole,
}

#[derive(Clone, Debug)]
pub struct CollisionProbe {
    pub protagonist: GridCell,
    pub shielded: bool,
    pub near_miss_radius: Option<u32>,
    pub occupants: Vec<Occupant>,
}

impl CollisionProbe {
    pub fn new(protagonist: GridCell) -> Self {
        Self { protagonist, shielded: false, near_miss_radius: None, occupants: Vec::new() }
    }

    pub fn shielded(mut self, shielded: bool) -> Self {
        self.shielded = shielded;
        self
    }

    pub fn near_miss_radius(mut self, radius: u32) -> Self {
        self.near_miss_radius = Some(radius);
        self
    }

    pub fn push(&mut self, contact: ContactRef, cell: GridCell, role: OccupantRole) {
        self.occupants.push(Occupant { contact, cell, role });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionOutcome {
    Collected { contact: ContactRef, kind: PickupKind, cell: GridCell },
    Damaged { contact: ContactRef },
    Devoured { contact: ContactRef },
    GoalReached,
    NearMiss { contact: ContactRef },
}

pub fn resolve_contacts(probe: &CollisionProbe) -> Vec<CollisionOutcome> {
    let mut outcomes = Vec::new();
    let mut consumed: BTreeSet<ContactRef> = BTreeSet::new();
    let mut damaged = false;

    for occupant in &probe.occupants {
        if consumed.contains(&occupant.contact) {
            continue;
        }
        let distance = manhattan(occupant.cell, probe.protagonist);
        let contact = occupant.contact;
        let outcome = if distance == 0 {
            match occupant.role {
                OccupantRole::Pickup(kind) => {
                    Some(CollisionOutcome::Collected { contact, kind, cell: occupant.cell })
                }
                OccupantRole::Hazard { vulnerable: true } => {
                    Some(CollisionOutcome::Devoured { contact })
                }
                OccupantRole::Hazard { vulnerable: false } if !probe.shielded && !damaged => {
                    damaged = true;
                    Some(CollisionOutcome::Damaged { contact })
                }
                OccupantRole::Hazard { .. } => None,
                OccupantRole::Goal => Some(CollisionOutcome::GoalReached),
            }
        } else {
            match occupant.role {
                OccupantRole::Hazard { vulnerable: false }
                    if probe.near_miss_radius == Some(distance) =>
                {
                    Some(CollisionOutcome::NearMiss { contact })
                }
                _ => None,
            }
        };
        if let Some(outcome) = outcome {
            consumed.insert(occupant.contact);
            outcomes.push(outcome);
        }
    }
    outcomes
}
