use crate::ai::Difficulty;
use crate::error::GameError;
use crate::game::{Opponent, Outcome, Player, Session};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

pub struct App {
    session: Session,
    selected_column: usize,
    /// Tier used when switching to a computer opponent.
    difficulty: Difficulty,
    should_quit: bool,
    message: Option<String>,
    thinking_since: Option<Instant>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let difficulty = match session.opponent() {
            Opponent::Computer(difficulty) => difficulty,
            Opponent::Human => Difficulty::default(),
        };
        App {
            selected_column: session.board().center_column(),
            session,
            difficulty,
            should_quit: false,
            message: None,
            thinking_since: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Advance the computer's turn. Its move is shown once the configured
    /// thinking delay has passed.
    fn tick(&mut self, now: Instant) {
        if !self.session.computer_to_move() {
            self.thinking_since = None;
            return;
        }

        let started = *self.thinking_since.get_or_insert(now);
        if now.duration_since(started) < self.session.config().ui.think_delay() {
            return;
        }

        self.thinking_since = None;
        match self.session.play_computer() {
            Ok(_) => self.report_outcome(),
            Err(e) => {
                log::error!("computer move failed: {e}");
                self.message = Some(format!("Computer could not move: {e}"));
            }
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let last_column = self.session.board().columns() - 1;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < last_column {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                self.message = Some(match self.session.restart() {
                    Ok(()) => format!(
                        "Round restarted, {} begins",
                        self.player_label(self.session.current_player())
                    ),
                    Err(e) => e.to_string(),
                });
            }
            KeyCode::Char('n') => {
                self.start_new_game(self.session.opponent());
            }
            KeyCode::Char('c') => {
                let opponent = match self.session.opponent() {
                    Opponent::Human => Opponent::Computer(self.difficulty),
                    Opponent::Computer(_) => Opponent::Human,
                };
                self.start_new_game(opponent);
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.difficulty = Difficulty::ALL[index];
                self.start_new_game(Opponent::Computer(self.difficulty));
            }
            _ => {}
        }
    }

    fn start_new_game(&mut self, opponent: Opponent) {
        self.message = Some(match self.session.new_game(opponent) {
            Ok(()) => format!("New game vs {}", self.player_label(Player::Yellow)),
            Err(e) => e.to_string(),
        });
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        if self.session.computer_to_move() {
            self.message = Some("Wait for the computer's move".to_string());
            return;
        }

        match self.session.play_column(self.selected_column) {
            Ok(_) => self.report_outcome(),
            Err(GameError::GameOver) => {
                self.message = Some("Game over! Press 'r' to play again.".to_string());
            }
            Err(GameError::InvalidColumn { .. }) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn report_outcome(&mut self) {
        if let Some(outcome) = self.session.outcome() {
            self.message = Some(match outcome {
                Outcome::Win(player) => format!("{} won!", self.player_label(player)),
                Outcome::Tie => "Tie game".to_string(),
            });
        }
    }

    /// Display name of a side, depending on the opponent.
    pub fn player_label(&self, player: Player) -> String {
        match (self.session.opponent(), player) {
            (Opponent::Computer(_), Player::Red) => "You".to_string(),
            (Opponent::Computer(difficulty), Player::Yellow) => format!("Computer ({difficulty})"),
            (Opponent::Human, player) => player.name().to_string(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, self, self.selected_column, &self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::time::Duration;

    fn app(opponent: Opponent, delay_ms: u64) -> App {
        let mut config = AppConfig::default();
        config.ui.think_delay_ms = delay_ms;
        App::new(Session::new(config, opponent).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = app(Opponent::Human, 0);
        assert_eq!(app.selected_column, 3);
        for _ in 0..10 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.selected_column, 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left);
        }
        assert_eq!(app.selected_column, 0);
    }

    #[test]
    fn test_computer_waits_for_delay() {
        let mut app = app(Opponent::Computer(Difficulty::Easy), 500);
        press(&mut app, KeyCode::Enter);
        assert!(app.session().computer_to_move());

        // Ignored while the computer is thinking.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().board().move_count(), 1);

        let start = Instant::now();
        app.tick(start);
        app.tick(start + Duration::from_millis(100));
        assert_eq!(app.session().board().move_count(), 1);

        app.tick(start + Duration::from_millis(600));
        assert_eq!(app.session().board().move_count(), 2);
        assert_eq!(app.session().current_player(), Player::Red);
    }

    #[test]
    fn test_difficulty_keys_start_new_game() {
        let mut app = app(Opponent::Human, 0);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.session().opponent(), Opponent::Computer(Difficulty::Hard));
        assert_eq!(app.session().board().move_count(), 0);
        assert_eq!(app.player_label(Player::Yellow), "Computer (Hard)");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.session().opponent(), Opponent::Human);
        assert_eq!(app.player_label(Player::Yellow), "Yellow");
    }

    #[test]
    fn test_quit() {
        let mut app = app(Opponent::Human, 0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
