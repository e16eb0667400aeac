//! Terminal front-end
//!
//! The input and render collaborators around the simulation core:
//! keys map to abstract move intents, the grid is drawn from core
//! state. No game rules live here.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::entities::EntityId;
use crate::game::{Game, GameStatus};
use crate::grid::Direction;

pub struct App {
    /// Index into the game's bomb list for manual detonation
    selected_bomb: usize,
}

impl App {
    pub fn new() -> Self {
        Self { selected_bomb: 0 }
    }

    /// Handle one key press; returns true when the app should quit
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up | KeyCode::Char('w') => game.submit_move(Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => game.submit_move(Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => game.submit_move(Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => game.submit_move(Direction::Right),
            KeyCode::Tab => {
                if !game.bombs().is_empty() {
                    self.selected_bomb = (self.selected_bomb + 1) % game.bombs().len();
                }
            }
            KeyCode::Char('b') => {
                if let Some(id) = self.selected_bomb_id(game) {
                    game.detonate_bomb(id);
                }
            }
            KeyCode::Char('r') | KeyCode::Char(' ') => {
                if game.is_ended() {
                    if let Err(e) = game.restart() {
                        // Past the end of the level table: the campaign is done
                        log::info!("Run complete: {}", e);
                        return Ok(true);
                    }
                    self.selected_bomb = 0;
                }
            }
            _ => {}
        }

        // Bombs explode and zombies die under us; keep the selection valid
        if self.selected_bomb >= game.bombs().len() {
            self.selected_bomb = 0;
        }

        for event in game.take_events() {
            log::debug!("Event: {:?}", event);
        }
        Ok(false)
    }

    fn selected_bomb_id(&self, game: &Game) -> Option<EntityId> {
        game.bombs().get(self.selected_bomb).map(|b| b.id)
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(0)])
            .split(frame.area());

        frame.render_widget(Paragraph::new(self.status_line(game)), chunks[0]);
        frame.render_widget(self.grid_widget(game), chunks[1]);
    }

    fn status_line(&self, game: &Game) -> Line<'static> {
        let status = match game.status() {
            GameStatus::Playing => format!(
                "Level {}  zombies {}  bombs {}  [arrows move, Tab/b detonate, q quit]",
                game.level(),
                game.zombies().len(),
                game.bombs().len(),
            ),
            GameStatus::Won => "You made it home! Press r for the next level".to_string(),
            GameStatus::Lost => "The dead got you. Press r to start over".to_string(),
        };
        let style = match game.status() {
            GameStatus::Playing => Style::default(),
            GameStatus::Won => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            GameStatus::Lost => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        Line::from(Span::styled(status, style))
    }

    fn grid_widget(&self, game: &Game) -> Paragraph<'static> {
        let bounds = game.bounds();
        let mut cells =
            vec![vec![Span::styled(". ", Style::default().fg(Color::DarkGray)); bounds.width as usize]; bounds.height as usize];

        let mut put = |x: i32, y: i32, glyph: &'static str, style: Style| {
            cells[y as usize][x as usize] = Span::styled(glyph, style);
        };

        let home = game.home().position;
        put(home.x, home.y, "H ", Style::default().fg(Color::Cyan));

        for (index, bomb) in game.bombs().iter().enumerate() {
            let style = if index == self.selected_bomb {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            put(bomb.position.x, bomb.position.y, "o ", style);
        }

        for zombie in game.zombies() {
            put(zombie.position.x, zombie.position.y, "Z ", Style::default().fg(Color::Red));
        }

        let player = game.player().position;
        let player_style = if game.player().alive {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        put(player.x, player.y, "@ ", player_style);

        let lines: Vec<Line> = cells.into_iter().map(Line::from).collect();
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Homebound"))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
