//! Discretionary actions of the current player.
//!
//! Each action may succeed at most once per round. A rejected attempt
//! changes nothing except the history log, and may be retried.

use tracing::debug;

use super::engine::Session;
use super::rejection::Rejection;
use super::round::{AccessPoint, Expansion, Purchase};
use crate::core::{Action, ActionKind, ActionRecord, PlayerId, Randomness};
use crate::economy::PropertyId;

/// Permit draws up to this value build at the listed price.
const PERMIT_LIST_PRICE: u8 = 50;
/// Draws up to this value deny the permit.
const PERMIT_DENIED: u8 = 70;
/// Draws up to this value build for free. Higher draws cost double.
const PERMIT_FREE: u8 = 85;

impl<R: Randomness> Session<R> {
    /// Take the bank's relief grant.
    ///
    /// Only in a round where the player passed a treasury tile, and only if
    /// relief was not already granted this round (including automatically
    /// during toll settlement). Returns the amount granted.
    pub fn request_relief(&mut self) -> Result<i64, Rejection> {
        let result = self.try_request_relief();
        self.record(Action::RequestRelief, result)
    }

    /// Buy a property fronting the current tile.
    ///
    /// Unowned properties cost their bank price, paid to the bank. A property
    /// held by another player can be bought out at its forced price, paid to
    /// that player, as long as it is still unconstructed.
    pub fn acquire_property(&mut self, id: PropertyId) -> Result<Purchase, Rejection> {
        let result = self.try_acquire_property(id);
        self.record(Action::AcquireProperty(id), result)
    }

    /// Build the next construction tier of an owned property.
    ///
    /// A permit draw in `1..=100` sets the price: up to 50 pays the tier cost,
    /// 51 to 70 denies the permit, 71 to 85 builds for free and anything
    /// higher pays double.
    pub fn expand_construction(&mut self, id: PropertyId) -> Result<Expansion, Rejection> {
        let result = self.try_expand_construction(id);
        self.record(Action::ExpandConstruction(id), result)
    }

    /// Place an access point for an owned, constructed property on the first
    /// free acquire or expand tile fronting it, in cycle order.
    pub fn acquire_access_point(&mut self, id: PropertyId) -> Result<AccessPoint, Rejection> {
        let result = self.try_acquire_access_point(id);
        self.record(Action::AcquireAccessPoint(id), result)
    }

    fn try_request_relief(&mut self) -> Result<i64, Rejection> {
        let player = self.begin(ActionKind::RequestRelief)?;
        if !self.relief_available() {
            return Err(Rejection::ReliefNotEligible);
        }
        Ok(self.grant_relief(player))
    }

    fn try_acquire_property(&mut self, id: PropertyId) -> Result<Purchase, Rejection> {
        let player = self.begin(ActionKind::AcquireProperty)?;
        let property = self
            .properties
            .get(id)
            .ok_or(Rejection::UnknownProperty(id))?;

        let fronting = self.positions[player].is_some_and(|tile| {
            self.board
                .adjacent_properties(tile)
                .iter()
                .any(|&(_, adjacent)| adjacent == id)
        });
        if !fronting {
            return Err(Rejection::NotAdjacent(id));
        }

        let seller = property.owner();
        match seller {
            Some(owner) if owner == player => return Err(Rejection::AlreadyOwned(id)),
            Some(_) if property.is_constructed() => {
                return Err(Rejection::ConstructedElsewhere(id))
            }
            _ => {}
        }

        let cost = property.price_for_transfer();
        self.ensure_funds(player, cost)?;

        self.move_funds(Some(player), seller, cost);
        self.move_property(id, player);
        debug!(%player, property = %id, cost, ?seller, "property acquired");

        Ok(Purchase {
            property: id,
            cost,
            seller,
        })
    }

    fn try_expand_construction(&mut self, id: PropertyId) -> Result<Expansion, Rejection> {
        let player = self.begin(ActionKind::ExpandConstruction)?;
        let property = self
            .properties
            .get(id)
            .ok_or(Rejection::UnknownProperty(id))?;
        if property.owner() != Some(player) {
            return Err(Rejection::NotOwner(id));
        }
        let tier_cost = property
            .next_expansion_cost()
            .ok_or(Rejection::FullyBuilt(id))?;

        let draw = self.rng.construction_draw().clamp(1, 100);
        let cost = match draw {
            d if d <= PERMIT_LIST_PRICE => tier_cost,
            d if d <= PERMIT_DENIED => return Err(Rejection::PermitDenied { draw }),
            d if d <= PERMIT_FREE => 0,
            _ => tier_cost * 2,
        };
        self.ensure_funds(player, cost)?;

        let Some(property) = self.properties.get_mut(id) else {
            return Err(Rejection::UnknownProperty(id));
        };
        property.upgrade();
        let level = property.level().unwrap_or_default();
        self.move_funds(Some(player), None, cost);
        debug!(%player, property = %id, draw, cost, level, "construction expanded");

        Ok(Expansion {
            property: id,
            cost,
            level,
            draw,
        })
    }

    fn try_acquire_access_point(&mut self, id: PropertyId) -> Result<AccessPoint, Rejection> {
        let player = self.begin(ActionKind::AcquireAccessPoint)?;
        let property = self
            .properties
            .get(id)
            .ok_or(Rejection::UnknownProperty(id))?;
        if property.owner() != Some(player) {
            return Err(Rejection::NotOwner(id));
        }
        if !property.is_constructed() {
            return Err(Rejection::NotConstructed(id));
        }
        let cost = property.def().access_price;
        self.ensure_funds(player, cost)?;

        let (tile, direction) = self
            .board
            .fronts(id)
            .iter()
            .copied()
            .filter(|&t| {
                let tile = self.board.tile(t);
                tile.access.is_none() && tile.kind.accepts_access()
            })
            .find_map(|t| {
                self.board
                    .grid()
                    .direction_toward(t, id)
                    .map(|direction| (t, direction))
            })
            .ok_or(Rejection::NoFreeFrontTile(id))?;

        self.move_funds(Some(player), None, cost);
        self.board.set_access(tile, Some(direction));
        debug!(%player, property = %id, %tile, ?direction, cost, "access point placed");

        Ok(AccessPoint {
            property: id,
            tile,
            direction,
            cost,
        })
    }

    /// Common gate: an open round whose player has not yet used `kind`.
    fn begin(&self, kind: ActionKind) -> Result<PlayerId, Rejection> {
        let round = self.open_round()?;
        if round.used(kind) {
            return Err(Rejection::AlreadyUsed(kind));
        }
        Ok(round.player)
    }

    fn ensure_funds(&self, player: PlayerId, needed: i64) -> Result<(), Rejection> {
        let available = self.players[player].funds();
        if available < needed {
            return Err(Rejection::InsufficientFunds { needed, available });
        }
        Ok(())
    }

    /// Log the attempt and close the action for the round on success.
    fn record<T>(&mut self, action: Action, result: Result<T, Rejection>) -> Result<T, Rejection> {
        let Some(player) = self.current else {
            return result;
        };
        self.history.push(ActionRecord::new(
            player,
            action,
            self.rounds_played,
            result.is_ok(),
        ));

        match &result {
            Ok(_) => {
                if let Some(round) = self.round.as_mut() {
                    round.mark_used(action.kind());
                }
            }
            Err(reason) => debug!(%player, ?action, %reason, "action rejected"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Direction};
    use crate::rules::fixture::{at, give, scripted};
    use crate::rules::Phase;

    fn funds<R: Randomness>(session: &Session<R>, player: u8) -> i64 {
        session.player(PlayerId::new(player)).unwrap().funds()
    }

    #[test]
    fn test_actions_need_a_round() {
        let mut session = scripted(2, []);

        assert_eq!(session.request_relief(), Err(Rejection::NoRoundInProgress));
        assert_eq!(
            session.acquire_property(PropertyId::new(1)),
            Err(Rejection::NoRoundInProgress)
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_request_relief_after_treasury() {
        let mut session = scripted(2, [4]);
        session.advance_round().unwrap();

        assert_eq!(session.request_relief(), Ok(1000));
        assert_eq!(funds(&session, 0), 13_000);
        assert_eq!(
            session.request_relief(),
            Err(Rejection::AlreadyUsed(ActionKind::RequestRelief))
        );
        assert!(!session.eligibility().request_relief);
    }

    #[test]
    fn test_request_relief_without_treasury() {
        let mut session = scripted(2, [1]);
        session.advance_round().unwrap();

        assert_eq!(session.request_relief(), Err(Rejection::ReliefNotEligible));
        assert_eq!(funds(&session, 0), 12_000);

        let last = session.history().last().unwrap();
        assert!(!last.accepted);
        assert_eq!(last.action, Action::RequestRelief);
    }

    #[test]
    fn test_acquire_from_bank() {
        let mut session = scripted(2, [1]);
        session.advance_round().unwrap();

        let purchase = session.acquire_property(PropertyId::new(1)).unwrap();

        assert_eq!(purchase.cost, 1000);
        assert_eq!(purchase.seller, None);
        assert_eq!(funds(&session, 0), 11_000);
        assert_eq!(
            session.property(PropertyId::new(1)).unwrap().owner(),
            Some(PlayerId::new(0))
        );
        assert!(session.player(PlayerId::new(0)).unwrap().owns(PropertyId::new(1)));
        assert_eq!(session.available_properties(), 1);
        assert_eq!(
            session.acquire_property(PropertyId::new(1)),
            Err(Rejection::AlreadyUsed(ActionKind::AcquireProperty))
        );
    }

    #[test]
    fn test_forced_buyout_pays_previous_owner() {
        let mut session = scripted(2, [1]);
        give(&mut session, PlayerId::new(1), PropertyId::new(1), None);
        session.advance_round().unwrap();

        let purchase = session.acquire_property(PropertyId::new(1)).unwrap();

        assert_eq!(purchase.cost, 1500);
        assert_eq!(purchase.seller, Some(PlayerId::new(1)));
        assert_eq!(funds(&session, 0), 10_500);
        assert_eq!(funds(&session, 1), 13_500);
        assert!(!session.player(PlayerId::new(1)).unwrap().owns(PropertyId::new(1)));
    }

    #[test]
    fn test_acquire_rejections() {
        let mut session = scripted(2, [1]);
        give(&mut session, PlayerId::new(1), PropertyId::new(1), Some(0));
        session.advance_round().unwrap();

        assert_eq!(
            session.acquire_property(PropertyId::new(9)),
            Err(Rejection::UnknownProperty(PropertyId::new(9)))
        );
        assert_eq!(
            session.acquire_property(PropertyId::new(2)),
            Err(Rejection::NotAdjacent(PropertyId::new(2)))
        );
        assert_eq!(
            session.acquire_property(PropertyId::new(1)),
            Err(Rejection::ConstructedElsewhere(PropertyId::new(1)))
        );
        assert_eq!(funds(&session, 0), 12_000);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn test_acquire_already_owned() {
        let mut session = scripted(2, [1]);
        give(&mut session, PlayerId::new(0), PropertyId::new(1), None);
        session.advance_round().unwrap();

        assert_eq!(
            session.acquire_property(PropertyId::new(1)),
            Err(Rejection::AlreadyOwned(PropertyId::new(1)))
        );
    }

    #[test]
    fn test_acquire_insufficient_funds() {
        let config = crate::core::SessionConfig::new()
            .with_player_count(2)
            .with_starting_funds(999)
            .fixed_turn_order();
        let mut session = Session::new(
            config,
            crate::rules::fixture::grid(),
            crate::rules::fixture::property_defs(),
            crate::core::ScriptedRng::new(0).with_dice([1]),
        )
        .unwrap();
        session.advance_round().unwrap();

        assert_eq!(
            session.acquire_property(PropertyId::new(1)),
            Err(Rejection::InsufficientFunds { needed: 1000, available: 999 })
        );
        assert_eq!(session.property(PropertyId::new(1)).unwrap().owner(), None);
    }

    #[test]
    fn test_expand_draw_bands() {
        let cases = [(1, 500), (50, 500), (71, 0), (85, 0), (86, 1000), (100, 1000)];
        for (draw, cost) in cases {
            let mut session = scripted(2, [2]);
            give(&mut session, PlayerId::new(0), PropertyId::new(1), None);
            session.rng_mut().push_draw(draw);
            session.advance_round().unwrap();

            let expansion = session.expand_construction(PropertyId::new(1)).unwrap();

            assert_eq!(expansion.cost, cost, "draw {draw}");
            assert_eq!(expansion.level, 0);
            assert_eq!(funds(&session, 0), 12_000 - cost);
        }
    }

    #[test]
    fn test_expand_permit_denied_leaves_state() {
        for draw in [51, 65, 70] {
            let mut session = scripted(2, [2]);
            give(&mut session, PlayerId::new(0), PropertyId::new(1), None);
            session.rng_mut().push_draw(draw);
            session.rng_mut().push_draw(10);
            session.advance_round().unwrap();

            assert_eq!(
                session.expand_construction(PropertyId::new(1)),
                Err(Rejection::PermitDenied { draw })
            );
            assert_eq!(funds(&session, 0), 12_000);
            assert!(!session.property(PropertyId::new(1)).unwrap().is_constructed());

            // A denied permit does not close the action.
            assert!(session.expand_construction(PropertyId::new(1)).is_ok());
        }
    }

    #[test]
    fn test_expand_rejections() {
        let mut session = scripted(2, [2]);
        give(&mut session, PlayerId::new(1), PropertyId::new(2), None);
        give(&mut session, PlayerId::new(0), PropertyId::new(1), Some(1));
        session.advance_round().unwrap();

        assert_eq!(
            session.expand_construction(PropertyId::new(2)),
            Err(Rejection::NotOwner(PropertyId::new(2)))
        );
        assert_eq!(
            session.expand_construction(PropertyId::new(1)),
            Err(Rejection::FullyBuilt(PropertyId::new(1)))
        );
    }

    #[test]
    fn test_expand_double_cost_unaffordable() {
        let config = crate::core::SessionConfig::new()
            .with_player_count(2)
            .with_starting_funds(700)
            .fixed_turn_order();
        let mut session = Session::new(
            config,
            crate::rules::fixture::grid(),
            crate::rules::fixture::property_defs(),
            crate::core::ScriptedRng::new(0).with_dice([2]).with_draws([90]),
        )
        .unwrap();
        give(&mut session, PlayerId::new(0), PropertyId::new(1), None);
        session.advance_round().unwrap();

        assert_eq!(
            session.expand_construction(PropertyId::new(1)),
            Err(Rejection::InsufficientFunds { needed: 1000, available: 700 })
        );
        assert!(!session.property(PropertyId::new(1)).unwrap().is_constructed());
    }

    #[test]
    fn test_access_point_first_free_front() {
        let mut session = scripted(2, [2]);
        give(&mut session, PlayerId::new(0), PropertyId::new(1), Some(0));
        session.advance_round().unwrap();

        let point = session.acquire_access_point(PropertyId::new(1)).unwrap();

        assert_eq!(point.tile, at(&session, 0, 1));
        assert_eq!(point.direction, Direction::South);
        assert_eq!(point.cost, 200);
        assert_eq!(funds(&session, 0), 11_800);
        assert_eq!(session.board().access_target(point.tile), Some(PropertyId::new(1)));
        assert_eq!(session.access_points(PlayerId::new(0)), 1);
    }

    #[test]
    fn test_access_point_skips_taken_and_office_tiles() {
        let mut session = scripted(2, [2]);
        give(&mut session, PlayerId::new(0), PropertyId::new(1), Some(0));
        for coord in [(0, 1), (0, 2), (2, 2), (2, 1)] {
            let tile = at(&session, coord.0, coord.1);
            let direction = if coord.0 == 0 { Direction::South } else { Direction::North };
            session.board.set_access(tile, Some(direction));
        }
        session.advance_round().unwrap();

        // Only the office at (1, 0) is left, and offices take no access point.
        assert_eq!(
            session.acquire_access_point(PropertyId::new(1)),
            Err(Rejection::NoFreeFrontTile(PropertyId::new(1)))
        );
        assert_eq!(funds(&session, 0), 12_000);
    }

    #[test]
    fn test_access_point_rejections() {
        let mut session = scripted(2, [2]);
        give(&mut session, PlayerId::new(0), PropertyId::new(1), None);
        session.advance_round().unwrap();

        assert_eq!(
            session.acquire_access_point(PropertyId::new(2)),
            Err(Rejection::NotOwner(PropertyId::new(2)))
        );
        assert_eq!(
            session.acquire_access_point(PropertyId::new(1)),
            Err(Rejection::NotConstructed(PropertyId::new(1)))
        );
        assert_eq!(
            session.acquire_access_point(PropertyId::new(7)),
            Err(Rejection::UnknownProperty(PropertyId::new(7)))
        );
    }

    #[test]
    fn test_flags_reset_next_round() {
        let mut session = scripted(2, [4, 1, 6]);
        session.advance_round().unwrap();
        session.request_relief().unwrap();
        session.advance_round().unwrap();
        session.advance_round().unwrap();

        assert_eq!(session.phase(), Phase::Resolved);
        assert_eq!(session.position_coord(PlayerId::new(0)), Some(Coord::new(2, 0)));
        assert!(session.eligibility().request_relief);
        assert_eq!(session.request_relief(), Ok(1000));
        assert_eq!(session.history().iter().filter(|r| r.accepted).count(), 2);
    }
}
