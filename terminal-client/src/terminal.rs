use std::io::{self, Stdout, Write};

use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use neon_snake_common::games::snake::{Cell, GameEvent, GamePresenter, GameSnapshot, SessionPhase};
use neon_snake_common::log;

const CELL_WIDTH: u16 = 2;
const BOARD_TOP: u16 = 1;
const FILLED: &str = "██";
const EMPTY: &str = "  ";

const SNAKE_HEAD_COLOR: Color = Color::White;
const SNAKE_BODY_COLOR: Color = Color::Green;
const SNAKE_BOOSTED_COLOR: Color = Color::Cyan;
const FOOD_COLOR: Color = Color::Magenta;
const POWER_UP_COLOR: Color = Color::Yellow;
const OBSTACLE_COLOR: Color = Color::DarkRed;
const BORDER_COLOR: Color = Color::DarkCyan;

/// Raw mode and the alternate screen for as long as the guard lives.
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Draws frames with crossterm. The game-over box stays up until the next
/// session starts.
pub struct TerminalPresenter<W: Write> {
    out: W,
    message: Option<Vec<String>>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, message: None }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }

    fn render(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        let width = u16::try_from(snapshot.field_size.width.max(0)).unwrap_or(u16::MAX);
        let height = u16::try_from(snapshot.field_size.height.max(0)).unwrap_or(u16::MAX);
        let board_width = width.saturating_mul(CELL_WIDTH).saturating_add(2);

        let boost = if snapshot.power_up_active { "  BOOST" } else { "" };
        let status = format!(
            "NEON SNAKE  Score: {}  Best: {}{}",
            snapshot.score, snapshot.best_score, boost
        );
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(BORDER_COLOR),
            Print(status)
        )?;

        let horizontal = format!("+{}+", "-".repeat(width as usize * CELL_WIDTH as usize));
        queue!(self.out, cursor::MoveTo(0, BOARD_TOP), Print(&horizontal))?;

        let head = snapshot.snake.first().copied();
        let body_color = if snapshot.power_up_active {
            SNAKE_BOOSTED_COLOR
        } else {
            SNAKE_BODY_COLOR
        };

        for y in 0..height {
            queue!(
                self.out,
                cursor::MoveTo(0, (BOARD_TOP + 1).saturating_add(y)),
                SetForegroundColor(BORDER_COLOR),
                Print('|')
            )?;
            for x in 0..width {
                let cell = Cell::new(x as i32, y as i32);
                let color = if head == Some(cell) {
                    Some(SNAKE_HEAD_COLOR)
                } else if snapshot.snake.contains(&cell) {
                    Some(body_color)
                } else if snapshot.food == Some(cell) {
                    Some(FOOD_COLOR)
                } else if snapshot.power_up == Some(cell) {
                    Some(POWER_UP_COLOR)
                } else if snapshot.obstacles.binary_search(&cell).is_ok() {
                    Some(OBSTACLE_COLOR)
                } else {
                    None
                };
                match color {
                    Some(color) => queue!(self.out, SetForegroundColor(color), Print(FILLED))?,
                    None => queue!(self.out, Print(EMPTY))?,
                }
            }
            queue!(self.out, SetForegroundColor(BORDER_COLOR), Print('|'))?;
        }

        queue!(
            self.out,
            cursor::MoveTo(0, (BOARD_TOP + 1).saturating_add(height)),
            Print(&horizontal),
            ResetColor
        )?;

        if snapshot.phase == SessionPhase::GameOver
            && let Some(lines) = &self.message
        {
            let lines = lines.clone();
            self.render_message(&lines, board_width, height)?;
        }

        self.out.flush()
    }

    fn render_message(&mut self, lines: &[String], board_width: u16, board_height: u16) -> io::Result<()> {
        let inner_width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) + 4;
        let box_width = inner_width as u16;
        let box_height = lines.len() as u16 + 2;
        let left = board_width.saturating_sub(box_width) / 2;
        let top = BOARD_TOP + 1 + board_height.saturating_sub(box_height) / 2;

        queue!(self.out, SetBackgroundColor(Color::DarkMagenta), SetForegroundColor(Color::White))?;
        for row in 0..box_height {
            let text = match row.checked_sub(1).and_then(|i| lines.get(i as usize)) {
                Some(line) => format!("{:^width$}", line, width = inner_width),
                None => " ".repeat(inner_width),
            };
            queue!(self.out, cursor::MoveTo(left, top + row), Print(text))?;
        }
        queue!(self.out, ResetColor)
    }
}

impl<W: Write> GamePresenter for TerminalPresenter<W> {
    fn draw_frame(&mut self, snapshot: &GameSnapshot) {
        if let Err(e) = self.render(snapshot) {
            log!("Failed to draw frame {}: {}", snapshot.tick, e);
        }
    }

    fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted { .. } => {
                self.message = None;
                if let Err(e) = queue!(self.out, terminal::Clear(ClearType::All)) {
                    log!("Failed to clear screen: {}", e);
                }
            }
            GameEvent::GameOver {
                score,
                best_score,
                new_best,
            } => {
                let best_line = if *new_best {
                    format!("New best score: {}", best_score)
                } else {
                    format!("Best score: {}", best_score)
                };
                self.message = Some(vec![
                    "GAME OVER".to_string(),
                    format!("Score: {}", score),
                    best_line,
                    String::new(),
                    "Enter to play again, Esc to quit".to_string(),
                ]);
            }
            GameEvent::Collided { cell, reason } => {
                log!("Snake {} at ({}, {})", reason, cell.x, cell.y);
            }
            _ => {}
        }
    }
}
