//! Click resolution: pick up, place, craft, or reject.
//!
//! [`interact`] is the whole rule set. It takes the player and the world by
//! mutable reference, applies at most one change, and reports what happened
//! as an [`InteractionOutcome`]. Rejections never mutate the player or any
//! cell value.
//!
//! Resolution order:
//!
//! 1. A won game rejects everything.
//! 2. Targets beyond the interaction radius (Chebyshev) are rejected.
//! 3. Empty inventory: pick up the cell's token, if any.
//! 4. Holding a token: place into an empty cell, craft onto an equal token,
//!    reject anything else.

use gridcraft_types::{CellId, InteractionOutcome, PlayerState, RejectionReason, TokenValue};
use gridcraft_world::WorldStore;

/// Fixed rules governing clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRules {
    /// Largest Chebyshev distance from the player at which clicks succeed.
    pub interaction_radius: u32,
    /// Crafting a value at or above this wins the game.
    pub win_threshold: TokenValue,
}

impl Default for InteractionRules {
    fn default() -> Self {
        Self {
            interaction_radius: 3,
            win_threshold: TokenValue(16),
        }
    }
}

/// Resolve a click on `target`.
///
/// The target cell is looked up through [`WorldStore::get`], so an
/// untouched cell is recorded with its spawned content even when the click
/// is rejected for a value reason. Out-of-range and post-win clicks do not
/// touch the store at all.
pub fn interact(
    player: &mut PlayerState,
    world: &mut WorldStore,
    target: CellId,
    rules: &InteractionRules,
) -> InteractionOutcome {
    if player.won {
        return InteractionOutcome::Rejected(RejectionReason::GameWon);
    }

    let distance = player.position.chebyshev_distance(target);
    if distance > rules.interaction_radius {
        return InteractionOutcome::Rejected(RejectionReason::TooFar {
            distance,
            radius: rules.interaction_radius,
        });
    }

    match (player.inventory, world.get(target)) {
        (None, Some(value)) => {
            player.inventory = Some(value);
            world.clear(target);
            InteractionOutcome::PickedUp {
                cell: target,
                value,
            }
        }
        (None, None) => InteractionOutcome::Rejected(RejectionReason::NothingToPickUp),
        (Some(held), None) => {
            world.set(target, held);
            player.inventory = None;
            InteractionOutcome::Placed {
                cell: target,
                value: held,
            }
        }
        (Some(held), Some(found)) if held == found => craft(player, world, target, held, rules),
        (Some(held), Some(found)) => {
            InteractionOutcome::Rejected(RejectionReason::ValueMismatch { held, found })
        }
    }
}

fn craft(
    player: &mut PlayerState,
    world: &mut WorldStore,
    target: CellId,
    held: TokenValue,
    rules: &InteractionRules,
) -> InteractionOutcome {
    let Some(value) = held.doubled() else {
        return InteractionOutcome::Rejected(RejectionReason::ValueOverflow);
    };

    world.set(target, value);
    player.inventory = None;

    let won = value >= rules.win_threshold;
    if won {
        player.mark_won();
    }

    InteractionOutcome::Crafted {
        cell: target,
        value,
        won,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gridcraft_world::SpawnRules;

    use super::*;

    fn empty_world() -> WorldStore {
        WorldStore::new(0, SpawnRules::new(0.0, TokenValue::BASE).unwrap())
    }

    fn full_world() -> WorldStore {
        WorldStore::new(0, SpawnRules::new(1.0, TokenValue::BASE).unwrap())
    }

    fn player_at_origin(inventory: Option<u64>) -> PlayerState {
        PlayerState {
            position: CellId::ORIGIN,
            inventory: inventory.map(TokenValue),
            won: false,
        }
    }

    #[test]
    fn pick_up_moves_token_into_inventory() {
        let mut world = full_world();
        let mut player = player_at_origin(None);

        let outcome = interact(
            &mut player,
            &mut world,
            CellId::ORIGIN,
            &InteractionRules::default(),
        );

        assert_eq!(
            outcome,
            InteractionOutcome::PickedUp {
                cell: CellId::ORIGIN,
                value: TokenValue(1),
            }
        );
        assert_eq!(player.inventory, Some(TokenValue(1)));
        assert_eq!(world.get(CellId::ORIGIN), None);
    }

    #[test]
    fn nothing_to_pick_up_from_empty_cell() {
        let mut world = empty_world();
        let mut player = player_at_origin(None);

        let outcome = interact(
            &mut player,
            &mut world,
            CellId::new(1, 1),
            &InteractionRules::default(),
        );

        assert_eq!(outcome, InteractionOutcome::Rejected(RejectionReason::NothingToPickUp));
        assert_eq!(player.inventory, None);
    }

    #[test]
    fn place_into_empty_cell() {
        let mut world = empty_world();
        let mut player = player_at_origin(Some(4));
        let target = CellId::new(-2, 3);

        let outcome = interact(&mut player, &mut world, target, &InteractionRules::default());

        assert_eq!(
            outcome,
            InteractionOutcome::Placed {
                cell: target,
                value: TokenValue(4),
            }
        );
        assert_eq!(player.inventory, None);
        assert_eq!(world.get(target), Some(TokenValue(4)));
    }

    #[test]
    fn craft_equal_values_doubles() {
        let mut world = empty_world();
        let target = CellId::new(1, 0);
        world.set(target, TokenValue(2));
        let mut player = player_at_origin(Some(2));

        let outcome = interact(&mut player, &mut world, target, &InteractionRules::default());

        assert_eq!(
            outcome,
            InteractionOutcome::Crafted {
                cell: target,
                value: TokenValue(4),
                won: false,
            }
        );
        assert_eq!(world.get(target), Some(TokenValue(4)));
        assert_eq!(player.inventory, None);
        assert!(!player.won);
    }

    #[test]
    fn craft_reaching_threshold_wins() {
        let mut world = empty_world();
        let target = CellId::new(0, 1);
        world.set(target, TokenValue(8));
        let mut player = player_at_origin(Some(8));

        let outcome = interact(&mut player, &mut world, target, &InteractionRules::default());

        assert_eq!(
            outcome,
            InteractionOutcome::Crafted {
                cell: target,
                value: TokenValue(16),
                won: true,
            }
        );
        assert!(player.won);
    }

    #[test]
    fn craft_at_higher_threshold() {
        let rules = InteractionRules {
            interaction_radius: 3,
            win_threshold: TokenValue(32),
        };
        let mut world = empty_world();
        let target = CellId::new(0, 1);
        world.set(target, TokenValue(8));
        let mut player = player_at_origin(Some(8));
        assert!(matches!(
            interact(&mut player, &mut world, target, &rules),
            InteractionOutcome::Crafted { won: false, .. }
        ));

        world.set(CellId::new(1, 1), TokenValue(16));
        player.inventory = Some(TokenValue(16));
        assert!(matches!(
            interact(&mut player, &mut world, CellId::new(1, 1), &rules),
            InteractionOutcome::Crafted { won: true, .. }
        ));
    }

    #[test]
    fn mismatch_changes_nothing() {
        let mut world = empty_world();
        let target = CellId::new(0, 2);
        world.set(target, TokenValue(4));
        let mut player = player_at_origin(Some(2));

        let outcome = interact(&mut player, &mut world, target, &InteractionRules::default());

        assert_eq!(
            outcome,
            InteractionOutcome::Rejected(RejectionReason::ValueMismatch {
                held: TokenValue(2),
                found: TokenValue(4),
            })
        );
        assert_eq!(world.get(target), Some(TokenValue(4)));
        assert_eq!(player.inventory, Some(TokenValue(2)));
    }

    #[test]
    fn distance_three_succeeds_four_rejects() {
        let rules = InteractionRules::default();

        let mut world = full_world();
        let mut player = player_at_origin(None);
        assert!(interact(&mut player, &mut world, CellId::new(3, -3), &rules).is_success());

        let mut player = player_at_origin(None);
        let far = CellId::new(4, 0);
        assert_eq!(
            interact(&mut player, &mut world, far, &rules),
            InteractionOutcome::Rejected(RejectionReason::TooFar {
                distance: 4,
                radius: 3,
            })
        );
        assert_eq!(player.inventory, None);
        assert!(!world.is_recorded(far));
    }

    #[test]
    fn won_game_rejects_everything() {
        let mut world = full_world();
        let mut player = player_at_origin(Some(1));
        player.won = true;
        let before = world.clone();

        for target in [CellId::ORIGIN, CellId::new(1, 1), CellId::new(9, 9)] {
            assert_eq!(
                interact(&mut player, &mut world, target, &InteractionRules::default()),
                InteractionOutcome::Rejected(RejectionReason::GameWon)
            );
        }
        assert_eq!(player.inventory, Some(TokenValue(1)));
        assert!(player.won);
        assert_eq!(world, before);
    }

    #[test]
    fn overflow_is_rejected() {
        let mut world = empty_world();
        let big = TokenValue(u64::MAX);
        world.set(CellId::ORIGIN, big);
        let mut player = player_at_origin(Some(u64::MAX));

        let outcome = interact(
            &mut player,
            &mut world,
            CellId::ORIGIN,
            &InteractionRules::default(),
        );

        assert_eq!(outcome, InteractionOutcome::Rejected(RejectionReason::ValueOverflow));
        assert_eq!(world.get(CellId::ORIGIN), Some(big));
        assert_eq!(player.inventory, Some(big));
    }
}
