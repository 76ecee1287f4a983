//! The turn engine.
//!
//! A [`Session`] owns the board, the property registry, every player account
//! and the injected [`Randomness`]. Each call to [`Session::advance_round`]
//! runs one round to completion:
//!
//! 1. Hand the turn to the next active player in rotation.
//! 2. Roll the dice and walk that many tiles along the cycle, continuing past
//!    any tile another active player stands on.
//! 3. Settle the toll of an access point on the destination, granting
//!    treasury relief or eliminating the player when funds fall short.
//!
//! Between rounds the current player may attempt the discretionary actions
//! defined in [`actions`](super::actions).

use smallvec::SmallVec;
use tracing::{debug, info, instrument};

use super::rejection::Rejection;
use super::round::{
    Eligibility, Phase, PlayerSummary, RoundReport, RoundState, TollOutcome, TraversedPath,
};
use crate::board::{Board, Coord, Grid, PathKind, PathTileId};
use crate::core::{
    ActionKind, ActionRecord, ConfigError, GameRng, PlayerId, PlayerMap, Randomness,
    SessionConfig,
};
use crate::economy::{Player, Property, PropertyDef, PropertyId, PropertyRegistry};

/// A game in progress.
#[derive(Debug)]
pub struct Session<R: Randomness = GameRng> {
    pub(super) config: SessionConfig,
    pub(super) board: Board,
    pub(super) properties: PropertyRegistry,
    pub(super) players: PlayerMap<Player>,
    /// `None` once eliminated.
    pub(super) positions: PlayerMap<Option<PathTileId>>,
    pub(super) turn_order: Vec<PlayerId>,
    pub(super) current: Option<PlayerId>,
    pub(super) phase: Phase,
    pub(super) rounds_played: u32,
    pub(super) round: Option<RoundState>,
    pub(super) winner: Option<PlayerId>,
    pub(super) history: Vec<ActionRecord>,
    pub(super) rng: R,
}

impl<R: Randomness> Session<R> {
    /// Build a session from a grid and property definitions.
    ///
    /// Fails when the table configuration is invalid, a grid cell names an
    /// undefined property, the path tiles do not form one cycle, or the cycle
    /// has no more tiles than there are players.
    pub fn new(
        config: SessionConfig,
        grid: Grid,
        defs: impl IntoIterator<Item = PropertyDef>,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let properties = PropertyRegistry::from_defs(defs)?;
        if let Some((coord, property)) = grid
            .property_cells()
            .find(|&(_, id)| !properties.contains(id))
        {
            return Err(ConfigError::UnknownProperty { coord, property });
        }

        let board = Board::build(grid)?;
        if board.cycle_len() <= config.player_count {
            return Err(ConfigError::CycleTooShort {
                cycle_len: board.cycle_len(),
                players: config.player_count,
            });
        }

        let mut turn_order: Vec<PlayerId> = PlayerId::all(config.player_count).collect();
        if config.shuffle_turn_order {
            rng.shuffle_players(&mut turn_order);
        }

        let funds = config.starting_funds;
        let start = board.start();
        debug!(
            players = config.player_count,
            cycle_len = board.cycle_len(),
            properties = properties.len(),
            "session created"
        );

        Ok(Self {
            players: PlayerMap::new(config.player_count, |id| Player::new(id, funds)),
            positions: PlayerMap::with_value(config.player_count, Some(start)),
            config,
            board,
            properties,
            turn_order,
            current: None,
            phase: Phase::AwaitingRoll,
            rounds_played: 0,
            round: None,
            winner: None,
            history: Vec::new(),
            rng,
        })
    }

    /// Play one round: rotate, roll, move and settle the toll.
    #[instrument(level = "debug", skip(self), fields(round = self.rounds_played + 1))]
    pub fn advance_round(&mut self) -> Result<RoundReport, Rejection> {
        if self.winner.is_some() {
            return Err(Rejection::GameOver);
        }

        let player = self.next_player();
        let dice = self.rng.roll_dice().clamp(1, 6);
        let path = self.walk(player, dice);
        let destination = path
            .last()
            .copied()
            .ok_or(Rejection::PlayerEliminated(player))?;

        self.rounds_played += 1;
        self.current = Some(player);
        self.positions[player] = Some(destination);
        self.phase = Phase::Moved;

        let board = &self.board;
        let landed = board.tile(destination).kind;
        let traversed = path.to_vec();
        let round = RoundState::new(self.rounds_played, player, dice, path, landed, |t| {
            board.tile(t).kind
        });
        debug!(
            %player,
            dice,
            destination = %board.coord(destination),
            ?landed,
            "moved"
        );
        self.round = Some(round);

        let (toll, relief_granted) = self.settle_toll(player, destination, dice);
        if self.winner.is_none() {
            self.phase = Phase::Resolved;
        }

        Ok(RoundReport {
            round: self.rounds_played,
            player,
            dice,
            path: traversed,
            destination,
            relief_granted,
            toll,
            winner: self.winner,
        })
    }

    /// Next active player after the current one in turn order.
    fn next_player(&self) -> PlayerId {
        let seats = self.turn_order.len();
        let after = self
            .current
            .and_then(|c| self.turn_order.iter().position(|&p| p == c))
            .map_or(0, |i| i + 1);

        (0..seats)
            .map(|k| self.turn_order[(after + k) % seats])
            .find(|&p| self.players[p].is_active())
            .unwrap_or(self.turn_order[after % seats])
    }

    /// Tiles entered by `player` for a roll of `dice`.
    ///
    /// Stepping continues past the last pip while the tile is held by another
    /// active player. The cycle is longer than the table, so a free tile is
    /// always reached.
    fn walk(&self, player: PlayerId, dice: u8) -> TraversedPath {
        let mut path = TraversedPath::new();
        let Some(mut tile) = self.positions[player] else {
            return path;
        };

        let mut steps = 0u8;
        while steps < dice || self.occupied_by_other(tile, player) {
            match self.board.next(tile) {
                Some(next) => tile = next,
                None => break,
            }
            path.push(tile);
            steps = steps.saturating_add(1);
        }
        path
    }

    fn occupied_by_other(&self, tile: PathTileId, player: PlayerId) -> bool {
        self.positions
            .iter()
            .any(|(other, pos)| other != player && *pos == Some(tile))
    }

    fn settle_toll(
        &mut self,
        player: PlayerId,
        tile: PathTileId,
        dice: u8,
    ) -> (TollOutcome, Option<i64>) {
        let Some(property) = self.board.access_target(tile) else {
            return (TollOutcome::None, None);
        };
        let Some((owner, amount)) = self.properties.get(property).and_then(|p| {
            p.owner()
                .filter(|&owner| owner != player)
                .map(|owner| (owner, p.toll(dice)))
        }) else {
            return (TollOutcome::None, None);
        };

        let mut relief = None;
        if !self.players[player].can_afford(amount) && self.relief_available() {
            relief = Some(self.grant_relief(player));
        }

        if self.players[player].can_afford(amount) {
            self.move_funds(Some(player), Some(owner), amount);
            debug!(%player, %owner, %property, amount, "toll paid");
            (
                TollOutcome::Paid {
                    property,
                    to: owner,
                    amount,
                },
                relief,
            )
        } else {
            let transferred = self.eliminate(player, owner);
            (
                TollOutcome::Eliminated {
                    property,
                    creditor: owner,
                    transferred,
                },
                relief,
            )
        }
    }

    /// Whether this round still allows a relief grant.
    pub(super) fn relief_available(&self) -> bool {
        self.round
            .as_ref()
            .is_some_and(|r| r.passed_treasury && !r.used(ActionKind::RequestRelief))
    }

    pub(super) fn grant_relief(&mut self, player: PlayerId) -> i64 {
        let amount = self.config.relief_amount;
        self.move_funds(None, Some(player), amount);
        if let Some(round) = self.round.as_mut() {
            round.mark_used(ActionKind::RequestRelief);
        }
        debug!(%player, amount, "relief granted");
        amount
    }

    /// Move funds between accounts. `None` on either side is the bank.
    pub(super) fn move_funds(&mut self, from: Option<PlayerId>, to: Option<PlayerId>, amount: i64) {
        if let Some(payer) = from {
            self.players[payer].pay(amount);
        }
        if let Some(payee) = to {
            self.players[payee].earn(amount);
        }
    }

    /// Hand a property to `buyer`, releasing it from any previous owner.
    pub(super) fn move_property(&mut self, id: PropertyId, buyer: PlayerId) {
        let Some(property) = self.properties.get_mut(id) else {
            return;
        };
        if let Some(seller) = property.owner() {
            self.players[seller].release(id);
        }
        property.set_owner(Some(buyer));
        self.players[buyer].acquire(id);
    }

    /// Remove `player` from the game, paying everything left to `creditor`.
    ///
    /// Owned properties return to the bank unconstructed and their access
    /// points are cleared. Returns the amount transferred.
    fn eliminate(&mut self, player: PlayerId, creditor: PlayerId) -> i64 {
        let transferred = self.players[player].funds();
        self.move_funds(Some(player), Some(creditor), transferred);

        for id in self.players[player].retire() {
            let tiles: SmallVec<[PathTileId; 8]> = self.board.access_points(id).collect();
            for tile in tiles {
                self.board.set_access(tile, None);
            }
            if let Some(property) = self.properties.get_mut(id) {
                property.tear_down();
            }
        }
        self.positions[player] = None;
        info!(%player, %creditor, transferred, "player eliminated");

        let mut active = self.players.values().filter(|p| p.is_active()).map(Player::id);
        if let (Some(last), None) = (active.next(), active.next()) {
            self.winner = Some(last);
            self.phase = Phase::Finished;
            info!(winner = %last, rounds = self.rounds_played, "game decided");
        }
        transferred
    }

    /// The round open for discretionary actions.
    pub(super) fn open_round(&self) -> Result<&RoundState, Rejection> {
        if self.winner.is_some() {
            return Err(Rejection::GameOver);
        }
        let round = match (&self.round, self.phase) {
            (Some(round), Phase::Resolved) => round,
            _ => return Err(Rejection::NoRoundInProgress),
        };
        if !self.players[round.player].is_active() {
            return Err(Rejection::PlayerEliminated(round.player));
        }
        Ok(round)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyRegistry {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(id)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// All players in seat order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Players still in the game, in seat order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .values()
            .filter(|p| p.is_active())
            .map(Player::id)
            .collect()
    }

    /// Player whose round is in progress. `None` before the first round.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    #[must_use]
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// Rounds played so far.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.rounds_played
    }

    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Dice result of the latest round.
    #[must_use]
    pub fn dice(&self) -> Option<u8> {
        self.round.as_ref().map(|r| r.dice)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<PathTileId> {
        self.positions.get(id).copied().flatten()
    }

    #[must_use]
    pub fn position_coord(&self, id: PlayerId) -> Option<Coord> {
        self.position(id).map(|t| self.board.coord(t))
    }

    /// Every discretionary action attempt, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Number of properties still held by the bank.
    #[must_use]
    pub fn available_properties(&self) -> usize {
        self.properties.unowned_count()
    }

    /// Access points collecting tolls for `player`.
    #[must_use]
    pub fn access_points(&self, player: PlayerId) -> usize {
        self.properties
            .owned_by(player)
            .map(|p| self.board.access_points(p.id()).count())
            .sum()
    }

    #[must_use]
    pub fn player_summaries(&self) -> Vec<PlayerSummary> {
        self.players
            .values()
            .map(|p| PlayerSummary {
                id: p.id(),
                active: p.is_active(),
                funds: p.funds(),
                peak_funds: p.peak_funds(),
                position: self.position_coord(p.id()),
                owned_properties: p.owned_count(),
                access_points: self.access_points(p.id()),
            })
            .collect()
    }

    /// Actions the current round offers.
    ///
    /// All false before the first round, after elimination of the current
    /// player, and once the game is over.
    #[must_use]
    pub fn eligibility(&self) -> Eligibility {
        let Ok(round) = self.open_round() else {
            return Eligibility::default();
        };
        let Some(tile) = round.destination() else {
            return Eligibility::default();
        };

        let unused = |kind| !round.used(kind);
        let on_expand = round.landed == PathKind::Expand;
        let unconstructed_neighbor = || {
            self.board
                .adjacent_properties(tile)
                .iter()
                .any(|&(_, id)| self.properties.get(id).is_some_and(|p| !p.is_constructed()))
        };

        Eligibility {
            request_relief: round.passed_treasury && unused(ActionKind::RequestRelief),
            acquire_property: round.landed == PathKind::Acquire
                && unused(ActionKind::AcquireProperty)
                && unconstructed_neighbor(),
            expand_construction: on_expand && unused(ActionKind::ExpandConstruction),
            acquire_access_point: (round.passed_office || on_expand)
                && unused(ActionKind::AcquireAccessPoint),
        }
    }

    /// The injected randomness, for queuing scripted values mid-game.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
