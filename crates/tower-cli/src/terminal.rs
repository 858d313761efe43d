//! Line-based terminal front end.

use std::io::{BufRead, Write};
use thiserror::Error;
use tower_core::{
    Brick, BrickSource, Collaborator, GameEvent, MainPileDecision, MoveChoice, Player, Tower,
};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    InputClosed,
}

/// Prompts on `output` and reads answers line by line from `input`
pub struct Terminal<R, W> {
    input: R,
    output: W,
    /// Discard top shown at the start of the current turn, for the menu
    discard_top: Option<Brick>,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            discard_top: None,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn banner(&mut self) -> Result<(), TerminalError> {
        writeln!(self.output, "===========================================")?;
        writeln!(self.output, "Hi! Welcome to Tower Blaster!")?;
        writeln!(self.output, "===========================================")?;
        writeln!(self.output, "Dealing bricks")?;
        Ok(())
    }

    /// Read one trimmed line
    fn prompt(&mut self) -> Result<String, TerminalError> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TerminalError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until the answer parses as a number
    fn read_number(&mut self) -> Result<Brick, TerminalError> {
        loop {
            let line = self.prompt()?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "\n'{line}' IS NOT A NUMBER!")?,
            }
        }
    }

    /// Keep asking until the answer is one of `1..=options`
    fn read_menu(&mut self, options: Brick) -> Result<Brick, TerminalError> {
        loop {
            let choice = self.read_number()?;
            if (1..=options).contains(&choice) {
                return Ok(choice);
            }
            writeln!(self.output, "\n'{choice}' IS NOT A VALID OPTION!")?;
        }
    }
}

impl<R: BufRead, W: Write> Collaborator for Terminal<R, W> {
    type Error = TerminalError;

    fn read_move_choice(&mut self) -> Result<MoveChoice, TerminalError> {
        match self.discard_top {
            Some(top) => writeln!(self.output, "1.) Use top brick of discard pile ({top})")?,
            None => writeln!(self.output, "1.) Use top brick of discard pile")?,
        }
        writeln!(self.output, "2.) Check top brick of main pile\n")?;

        Ok(match self.read_menu(2)? {
            1 => MoveChoice::UseDiscard,
            _ => MoveChoice::PeekMain,
        })
    }

    fn read_brick_selection(&mut self) -> Result<Brick, TerminalError> {
        writeln!(self.output, "\nInsert the brick you want to replace")?;
        self.read_number()
    }

    fn read_main_pile_decision(&mut self) -> Result<MainPileDecision, TerminalError> {
        writeln!(self.output, "1.) Use brick\n2.) Discard brick\n")?;

        Ok(match self.read_menu(2)? {
            1 => MainPileDecision::Use,
            _ => MainPileDecision::Discard,
        })
    }

    fn show_turn(&mut self, turn: u32, discard_top: Brick) -> Result<(), TerminalError> {
        self.discard_top = Some(discard_top);
        writeln!(self.output, "Turn: {turn}")?;
        writeln!(self.output, "Top brick of discard pile:\t{discard_top}")?;
        Ok(())
    }

    fn show_tower(&mut self, tower: &Tower) -> Result<(), TerminalError> {
        writeln!(self.output, "\nYour tower:\t{:?}\n", tower.bricks())?;
        Ok(())
    }

    fn show_main_top(&mut self, brick: Brick) -> Result<(), TerminalError> {
        writeln!(self.output, "The brick at the top of the main pile is {brick}")?;
        Ok(())
    }

    fn reject_selection(&mut self, brick: Brick) -> Result<(), TerminalError> {
        writeln!(self.output, "\n{brick} is not in your tower")?;
        Ok(())
    }

    fn announce_winner(&mut self, winner: Player) -> Result<(), TerminalError> {
        match winner {
            Player::Computer => writeln!(self.output, "\nHurray! PC wins!\n")?,
            Player::Human => writeln!(self.output, "\nCongratulations! You win!!!\n")?,
        }
        Ok(())
    }

    fn on_events(&mut self, events: &[GameEvent]) -> Result<(), TerminalError> {
        for event in events {
            match event {
                GameEvent::TurnStarted { turn, player, .. } => {
                    info!(turn, %player, "turn started");
                }
                GameEvent::BrickPlaced {
                    player: Player::Computer,
                    brick,
                    source,
                    slot,
                    displaced,
                } => {
                    let pile = match source {
                        BrickSource::Main => "main",
                        BrickSource::Discard => "discard",
                    };
                    info!(brick, pile, slot, displaced, "computer placed a brick");
                }
                GameEvent::MainPileRefilled { transferred } => {
                    info!(transferred, "main pile rebuilt from discard pile");
                }
                other => debug!(event = ?other, "game event"),
            }
        }
        Ok(())
    }
}
