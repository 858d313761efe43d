//! Turn sequencing against an I/O collaborator.
//!
//! The referee owns no state of its own beyond the bot. It starts each turn,
//! asks the [`Collaborator`] for the human's decisions, lets the bot move on
//! computer turns, and stops once a tower is stable.

use crate::actions::{GameAction, GameEvent, MainPileDecision, MoveChoice};
use crate::bot::Bot;
use crate::game::{GameError, GamePhase, GameState, Player};
use crate::pile::Brick;
use crate::tower::Tower;
use rand::Rng;
use thiserror::Error;

/// The front end that reads human decisions and displays the game.
///
/// Inputs are expected to be well formed already: a collaborator only
/// returns numbers and menu choices it has parsed.
pub trait Collaborator {
    type Error: std::error::Error + 'static;

    /// Opening choice of a human turn
    fn read_move_choice(&mut self) -> Result<MoveChoice, Self::Error>;

    /// Tower brick to replace. Asked again until the brick is in the tower.
    fn read_brick_selection(&mut self) -> Result<Brick, Self::Error>;

    /// Whether to use or discard the peeked main pile brick
    fn read_main_pile_decision(&mut self) -> Result<MainPileDecision, Self::Error>;

    fn show_turn(&mut self, turn: u32, discard_top: Brick) -> Result<(), Self::Error>;

    fn show_tower(&mut self, tower: &Tower) -> Result<(), Self::Error>;

    fn show_main_top(&mut self, brick: Brick) -> Result<(), Self::Error>;

    /// The selected brick is not in the human's tower
    fn reject_selection(&mut self, _brick: Brick) -> Result<(), Self::Error> {
        Ok(())
    }

    fn announce_winner(&mut self, winner: Player) -> Result<(), Self::Error>;

    /// Everything that happened since the last call
    fn on_events(&mut self, _events: &[GameEvent]) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Errors that stop the referee loop
#[derive(Debug, Error)]
pub enum RefereeError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Collaborator failed: {0}")]
    Collaborator(#[source] E),
}

/// Runs games between a collaborator-driven human and the bot
#[derive(Debug, Clone, Copy, Default)]
pub struct Referee {
    bot: Bot,
}

impl Referee {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Referee whose bot matches the game's slot layout
    pub fn for_game(game: &GameState) -> Self {
        Self::new(Bot::new(&game.config))
    }

    /// Play turns until someone wins
    pub fn run<C, R>(
        &self,
        game: &mut GameState,
        io: &mut C,
        rng: &mut R,
    ) -> Result<Player, RefereeError<C::Error>>
    where
        C: Collaborator,
        R: Rng + ?Sized,
    {
        loop {
            if let Some(winner) = self.play_turn(game, io, rng)? {
                return Ok(winner);
            }
        }
    }

    /// Play a single turn. Returns the winner if the game ended instead.
    pub fn play_turn<C, R>(
        &self,
        game: &mut GameState,
        io: &mut C,
        rng: &mut R,
    ) -> Result<Option<Player>, RefereeError<C::Error>>
    where
        C: Collaborator,
        R: Rng + ?Sized,
    {
        let events = game.start_turn(rng)?;
        io.on_events(&events).map_err(RefereeError::Collaborator)?;

        if let Some(winner) = game.winner() {
            io.announce_winner(winner)
                .map_err(RefereeError::Collaborator)?;
            return Ok(Some(winner));
        }

        io.show_turn(game.turn_number, game.discard_top()?)
            .map_err(RefereeError::Collaborator)?;

        let events = match game.current_player() {
            Player::Computer => game.play_computer_turn(&self.bot)?,
            Player::Human => Self::human_turn(game, io)?,
        };
        io.on_events(&events).map_err(RefereeError::Collaborator)?;

        Ok(None)
    }

    fn human_turn<C: Collaborator>(
        game: &mut GameState,
        io: &mut C,
    ) -> Result<Vec<GameEvent>, RefereeError<C::Error>> {
        io.show_tower(&game.human_tower)
            .map_err(RefereeError::Collaborator)?;

        let choice = io.read_move_choice().map_err(RefereeError::Collaborator)?;
        let mut events = game.apply_action(choice.into())?;

        if let GamePhase::HumanPeeked { brick } = game.phase {
            io.show_main_top(brick).map_err(RefereeError::Collaborator)?;
            let decision = io
                .read_main_pile_decision()
                .map_err(RefereeError::Collaborator)?;
            events.extend(game.apply_action(decision.into())?);
        }

        while matches!(game.phase, GamePhase::HumanPlacing { .. }) {
            let target = io
                .read_brick_selection()
                .map_err(RefereeError::Collaborator)?;
            match game.apply_action(GameAction::Replace(target)) {
                Ok(placed) => events.extend(placed),
                Err(GameError::InvalidSelection(brick)) => {
                    io.reject_selection(brick)
                        .map_err(RefereeError::Collaborator)?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(events)
    }
}
