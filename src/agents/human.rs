use std::cell::RefCell;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::rc::Rc;

use crate::action::Action;
use crate::cards::Card;
use crate::display;
use crate::game::TableEvent;
use crate::variants::draw::parse_discards;

use super::{DecisionError, DecisionView, PlayerAgent};

/// Where a human seat reads its answers, one line at a time.
pub trait LineSource {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl<R: BufRead> LineSource for R {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// One buffered reader handed to several seats, so each line goes to
/// whichever seat asks next rather than to whichever reader buffered it.
#[derive(Debug)]
pub struct SharedInput<R>(Rc<RefCell<R>>);

impl<R> Clone for SharedInput<R> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<R: BufRead> SharedInput<R> {
    pub fn new(reader: R) -> Self {
        Self(Rc::new(RefCell::new(reader)))
    }
}

impl SharedInput<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> LineSource for SharedInput<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(&mut *self.0.borrow_mut(), buf)
    }
}

/// A line-oriented human seat: prompts on `output`, reads answers from `input`.
#[derive(Debug)]
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl HumanAgent<SharedInput<BufReader<Stdin>>, Stdout> {
    /// Prompt on the terminal, reading from a stdin handle shared by every
    /// human seat.
    pub fn stdio(input: &SharedInput<BufReader<Stdin>>, color: bool) -> Self {
        Self::new(input.clone(), io::stdout()).with_color(color)
    }
}

impl<R: LineSource, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, DecisionError> {
        self.output.flush().map_err(io_error)?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Err(DecisionError::InputClosed),
            Ok(_) => Ok(line.trim().to_string()),
            Err(e) => Err(io_error(e)),
        }
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            log::warn!("failed to write to player: {e}");
        }
    }
}

fn io_error(e: io::Error) -> DecisionError {
    DecisionError::Io(e.to_string())
}

impl<R: LineSource, W: Write> PlayerAgent for HumanAgent<R, W> {
    fn decide(&mut self, view: &DecisionView<'_>) -> Result<Action, DecisionError> {
        let prompt = display::decision_prompt(view, self.color);
        write!(self.output, "{prompt}").map_err(io_error)?;
        let line = self.read_line()?;
        Ok(line.parse::<Action>()?)
    }

    fn discard(&mut self, hand: &[Card]) -> Result<Vec<usize>, DecisionError> {
        let shown = display::numbered_hand(hand, self.color);
        write!(self.output, "Your hand: {shown}\nPositions to discard (blank keeps all): ")
            .map_err(io_error)?;
        let line = self.read_line()?;
        Ok(parse_discards(&line, hand.len())?)
    }

    fn rejected(&mut self, error: &DecisionError) {
        self.say(&format!("  ! {error}; try again"));
    }

    fn observe(&mut self, event: &TableEvent) {
        for line in display::event_lines(event, self.color) {
            self.say(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionParseError;
    use crate::game::Street;
    use std::io::Cursor;

    fn view<'a>(hole: &'a [Card]) -> DecisionView<'a> {
        DecisionView {
            seat: 1,
            name: "You",
            street: Street::Preflop,
            hole_cards: hole,
            board: &[],
            pot: 30,
            current_bet: 20,
            contribution: 10,
            stack: 990,
        }
    }

    #[test]
    fn reads_one_action_per_line() {
        let hole = crate::cards::parse_cards("As Kd").unwrap();
        let mut human = HumanAgent::new(Cursor::new("raise 40\nbogus\n"), Vec::new());
        assert_eq!(human.decide(&view(&hole)), Ok(Action::Raise(40)));
        assert!(matches!(
            human.decide(&view(&hole)),
            Err(DecisionError::Parse(ActionParseError::InvalidAction(_)))
        ));
        assert_eq!(human.decide(&view(&hole)), Err(DecisionError::InputClosed));
        let out = String::from_utf8(human.into_output()).unwrap();
        assert!(out.contains("to call 10"), "{out}");
    }

    #[test]
    fn discards_use_one_based_positions() {
        let hand = crate::cards::parse_cards("2c 7d 9h Js Kc").unwrap();
        let mut human = HumanAgent::new(Cursor::new("1 2\n"), Vec::new());
        assert_eq!(human.discard(&hand), Ok(vec![0, 1]));
    }

    #[test]
    fn rejection_is_reported() {
        let mut human = HumanAgent::new(Cursor::new(""), Vec::new());
        human.rejected(&DecisionError::InputClosed);
        let out = String::from_utf8(human.into_output()).unwrap();
        assert!(out.contains("input closed"));
    }

    #[test]
    fn seats_sharing_input_take_lines_in_turn() {
        let shared = SharedInput::new(Cursor::new("call\ncheck\nfold\n"));
        let mut first = HumanAgent::new(shared.clone(), Vec::new());
        let mut second = HumanAgent::new(shared, Vec::new());
        let hole = crate::cards::parse_cards("As Kd").unwrap();
        assert_eq!(first.decide(&view(&hole)), Ok(Action::Call));
        assert_eq!(second.decide(&view(&hole)), Ok(Action::Check));
        assert_eq!(first.decide(&view(&hole)), Ok(Action::Fold));
        assert_eq!(second.decide(&view(&hole)), Err(DecisionError::InputClosed));
    }
}
