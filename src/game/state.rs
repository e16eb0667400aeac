//! Game state machine
//!
//! The `Game` aggregate is the sole owner of every entity on the grid.
//! It resolves one externally submitted move intent at a time: player
//! step, noise propagation, zombie pursuit, collision passes, and the
//! win/lose transition, all synchronously before the next intent is
//! accepted.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::LevelTable;
use crate::entities::{Entity, EntityId, EntityKind};
use crate::error::GameError;
use crate::game::ai::approach_step;
use crate::game::events::GameEvent;
use crate::game::spawn::random_free_position;
use crate::grid::{Bounds, Direction, Position};

/// Lifecycle of one level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// The game aggregate
pub struct Game {
    bounds: Bounds,
    levels: LevelTable,
    /// 1-based level counter; 0 only between a loss and the restart
    level: u32,
    status: GameStatus,
    /// Game-over latch: while set, move intents and collision passes
    /// are no-ops until restart
    ended: bool,
    player: Entity,
    home: Entity,
    zombies: Vec<Entity>,
    bombs: Vec<Entity>,
    rng: StdRng,
    events: Vec<GameEvent>,
    next_id: EntityId,
}

impl Game {
    /// Create a game and start level 1
    pub fn new(bounds: Bounds, levels: LevelTable) -> Result<Self, GameError> {
        Self::with_seed(bounds, levels, rand::random())
    }

    /// Create a game with a fixed RNG seed, for reproducible runs
    pub fn with_seed(bounds: Bounds, levels: LevelTable, seed: u64) -> Result<Self, GameError> {
        let mut game = Self {
            bounds,
            levels,
            level: 0,
            status: GameStatus::Playing,
            ended: false,
            player: Entity::new(0, EntityKind::Player, Position::new(0, 0)),
            home: Entity::new(0, EntityKind::Home, Position::new(0, 0)),
            zombies: Vec::new(),
            bombs: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        game.start_level()?;
        Ok(game)
    }

    /// Apply a directional move intent from the input collaborator
    ///
    /// Silently ignored once the game is over. The whole intent
    /// resolves before this returns: the player steps and is clamped
    /// to bounds, collisions are checked, then the noise of the step
    /// pulls every zombie one pace closer, re-checking collisions
    /// after each pace.
    pub fn submit_move(&mut self, direction: Direction) {
        if self.ended {
            log::debug!("Ignoring {:?} while {:?}", direction, self.status);
            return;
        }

        let (dx, dy) = direction.delta();
        self.player.position = self.player.position.offset(dx, dy).clamped(self.bounds);
        self.events.push(GameEvent::EntityMoved {
            id: self.player.id,
            kind: EntityKind::Player,
            position: self.player.position,
        });

        let mut noises = VecDeque::new();
        self.check_collisions(&mut noises);
        noises.push_back(self.player.position);
        self.process_noises(noises);
    }

    /// Detonate a bomb by hand, luring every zombie one pace toward
    /// the blast. Ignored once the game is over or when the id names
    /// no live bomb.
    pub fn detonate_bomb(&mut self, id: EntityId) {
        if self.ended {
            log::debug!("Ignoring detonation while {:?}", self.status);
            return;
        }

        let mut noises = VecDeque::new();
        self.explode_bomb(id, &mut noises);
        self.process_noises(noises);
    }

    /// Start the next round after a win or a loss
    ///
    /// No effect while a level is still in progress. Disposes every
    /// entity and respawns from the next level's spec: the level after
    /// a win, level 1 after a loss.
    pub fn restart(&mut self) -> Result<(), GameError> {
        if !self.ended {
            return Ok(());
        }
        self.start_level()
    }

    /// Enter the next level: bump the counter, look up its spec, respawn
    fn start_level(&mut self) -> Result<(), GameError> {
        self.level += 1;
        let spec = self
            .levels
            .get(self.level)
            .ok_or(GameError::InvalidConfiguration {
                level: self.level,
                table_len: self.levels.len(),
            })?;

        self.zombies.clear();
        self.bombs.clear();
        self.status = GameStatus::Playing;
        self.ended = false;

        self.player = self.spawn(EntityKind::Player, Position::new(0, 0));
        self.home = self.spawn(
            EntityKind::Home,
            Position::new(self.bounds.width - 1, self.bounds.height - 1),
        );

        for _ in 0..spec.zombies {
            let occupied = self.occupied_cells();
            let position = random_free_position(&occupied, self.bounds, &mut self.rng)?;
            let zombie = self.spawn(EntityKind::Zombie, position);
            self.zombies.push(zombie);
        }
        for _ in 0..spec.bombs {
            let occupied = self.occupied_cells();
            let position = random_free_position(&occupied, self.bounds, &mut self.rng)?;
            let bomb = self.spawn(EntityKind::Bomb, position);
            self.bombs.push(bomb);
        }

        self.events.push(GameEvent::LevelChanged { level: self.level });
        log::info!(
            "Level {} started: {} zombies, {} bombs",
            self.level,
            spec.zombies,
            spec.bombs
        );
        Ok(())
    }

    /// One step of every zombie per queued noise, with a collision
    /// pass after each step. Explosions raise further noises, which
    /// queue behind the current one. Stops dead once the game is over.
    fn process_noises(&mut self, mut noises: VecDeque<Position>) {
        while let Some(noise) = noises.pop_front() {
            if self.ended {
                return;
            }

            let ids: Vec<EntityId> = self.zombies.iter().map(|z| z.id).collect();
            for id in ids {
                if self.ended {
                    return;
                }
                // Killed by an earlier pace in this same pass
                let Some(from) = self.zombie_position(id) else {
                    continue;
                };

                let (dx, dy) = approach_step(from, noise, &mut self.rng);
                let to = from.offset(dx, dy).clamped(self.bounds);
                if let Some(zombie) = self.zombies.iter_mut().find(|z| z.id == id) {
                    zombie.position = to;
                }
                self.events.push(GameEvent::EntityMoved {
                    id,
                    kind: EntityKind::Zombie,
                    position: to,
                });
                self.check_collisions(&mut noises);
            }
        }
    }

    /// One collision pass over the whole grid
    ///
    /// Order is load-bearing: bombs against the player first, then
    /// bombs against zombies (one move can kill the player and a
    /// zombie through different bombs), then zombies against the
    /// player, and only if none of those hit, the player against
    /// home. Lose always takes precedence over win within a pass.
    fn check_collisions(&mut self, noises: &mut VecDeque<Position>) {
        if self.ended {
            return;
        }

        // Snapshot the bombs present when the pass starts; explosions
        // during the pass neither add nor revive bombs.
        let bombs: Vec<(EntityId, Position)> =
            self.bombs.iter().map(|b| (b.id, b.position)).collect();

        for &(bomb_id, bomb_pos) in &bombs {
            if bomb_pos == self.player.position {
                self.lose();
                self.kill_player();
                self.explode_bomb(bomb_id, noises);
            }
        }

        for &(bomb_id, bomb_pos) in &bombs {
            let doomed: Vec<EntityId> = self
                .zombies
                .iter()
                .filter(|z| z.position == bomb_pos)
                .map(|z| z.id)
                .collect();
            for zombie_id in doomed {
                self.kill_zombie(zombie_id);
                self.explode_bomb(bomb_id, noises);
            }
        }

        if self.zombies.iter().any(|z| z.touches(&self.player)) {
            self.lose();
        } else if self.home.touches(&self.player) {
            self.win();
        }
    }

    fn win(&mut self) {
        if self.ended {
            return;
        }
        self.status = GameStatus::Won;
        self.events.push(GameEvent::GameWon);
        log::info!("Level {} won", self.level);
        self.end_game();
    }

    fn lose(&mut self) {
        if self.ended {
            return;
        }
        self.status = GameStatus::Lost;
        // Back to square one: the restart after a loss re-enters at level 1
        self.level = 0;
        self.events.push(GameEvent::GameLost);
        log::info!("Game lost");
        self.end_game();
    }

    /// Idempotent game-over latch; a second call before restart is a no-op
    fn end_game(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
    }

    fn kill_player(&mut self) {
        if !self.player.alive {
            return;
        }
        self.player.alive = false;
        self.events.push(GameEvent::EntityDied {
            id: self.player.id,
            kind: EntityKind::Player,
        });
    }

    fn kill_zombie(&mut self, id: EntityId) {
        if let Some(index) = self.zombies.iter().position(|z| z.id == id) {
            let zombie = self.zombies.remove(index);
            self.events.push(GameEvent::EntityDied {
                id: zombie.id,
                kind: EntityKind::Zombie,
            });
        }
    }

    /// Remove a bomb and raise a noise at its cell. No-op when the id
    /// names no live bomb, so double explosions in one pass are safe.
    fn explode_bomb(&mut self, id: EntityId, noises: &mut VecDeque<Position>) {
        if let Some(index) = self.bombs.iter().position(|b| b.id == id) {
            let bomb = self.bombs.remove(index);
            self.events.push(GameEvent::BombExploded {
                id: bomb.id,
                position: bomb.position,
            });
            noises.push_back(bomb.position);
        }
    }

    fn spawn(&mut self, kind: EntityKind, position: Position) -> Entity {
        let id = self.next_id;
        self.next_id += 1;
        let entity = Entity::new(id, kind, position);
        log::debug!("Spawned {} {} at ({}, {})", kind.name(), id, position.x, position.y);
        self.events.push(GameEvent::EntitySpawned { id, kind, position });
        entity
    }

    fn occupied_cells(&self) -> Vec<Position> {
        let mut cells = vec![self.player.position, self.home.position];
        cells.extend(self.zombies.iter().map(|z| z.position));
        cells.extend(self.bombs.iter().map(|b| b.position));
        cells
    }

    fn zombie_position(&self, id: EntityId) -> Option<Position> {
        self.zombies.iter().find(|z| z.id == id).map(|z| z.position)
    }

    // ------------------------------------------------------------------
    // Read access for the render collaborator
    // ------------------------------------------------------------------

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once the current round is over and a restart is expected
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn home(&self) -> &Entity {
        &self.home
    }

    pub fn zombies(&self) -> &[Entity] {
        &self.zombies
    }

    pub fn bombs(&self) -> &[Entity] {
        &self.bombs
    }

    /// Drain the buffered notifications accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LevelSpec;
    use std::collections::HashSet;

    fn table(levels: &[(u32, u32)]) -> LevelTable {
        LevelTable {
            levels: levels
                .iter()
                .map(|&(zombies, bombs)| LevelSpec { zombies, bombs })
                .collect(),
        }
    }

    fn game(width: i32, height: i32, levels: &[(u32, u32)]) -> Game {
        Game::with_seed(Bounds::new(width, height), table(levels), 7).expect("game should start")
    }

    #[test]
    fn test_spawn_cells_are_distinct() {
        let game = game(14, 14, &[(9, 7)]);

        assert_eq!(game.player().position, Position::new(0, 0));
        assert_eq!(game.home().position, Position::new(13, 13));
        assert_eq!(game.zombies().len(), 9);
        assert_eq!(game.bombs().len(), 7);

        let mut cells = HashSet::new();
        cells.insert(game.player().position);
        cells.insert(game.home().position);
        cells.extend(game.zombies().iter().map(|z| z.position));
        cells.extend(game.bombs().iter().map(|b| b.position));
        assert_eq!(cells.len(), 2 + 9 + 7, "two entities share a spawn cell");
    }

    #[test]
    fn test_player_moves_are_clamped() {
        let mut game = game(3, 3, &[(0, 0)]);

        game.submit_move(Direction::Up);
        game.submit_move(Direction::Left);
        assert_eq!(game.player().position, Position::new(0, 0));

        game.submit_move(Direction::Right);
        game.submit_move(Direction::Right);
        game.submit_move(Direction::Right);
        assert_eq!(game.player().position, Position::new(2, 0));
    }

    #[test]
    fn test_noise_pulls_zombie_one_pace() {
        let mut game = game(7, 7, &[(1, 0)]);
        game.zombies[0].position = Position::new(6, 0);

        game.submit_move(Direction::Down);

        // Player stepped to (0, 1); the zombie hears it and closes in
        // along its dominant x axis
        assert_eq!(game.zombies()[0].position, Position::new(5, 0));
        let moved_zombies = game
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::EntityMoved { kind: EntityKind::Zombie, .. }))
            .count();
        assert_eq!(moved_zombies, 1);
    }

    #[test]
    fn test_scenario_dominant_y_axis() {
        // Zombie at (0, 2), noise at the player corner (0, 0): dy
        // dominates, so the zombie steps to (0, 1)
        let mut game = game(3, 3, &[(1, 0)]);
        game.zombies[0].position = Position::new(0, 2);

        game.process_noises(VecDeque::from([Position::new(0, 0)]));

        assert_eq!(game.zombies()[0].position, Position::new(0, 1));
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_stepping_on_bomb_loses() {
        let mut game = game(3, 3, &[(0, 1)]);
        game.bombs[0].position = Position::new(1, 0);

        game.submit_move(Direction::Right);

        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.is_ended());
        assert!(!game.player().alive);
        assert!(game.bombs().is_empty());
        assert_eq!(game.level(), 0, "a loss resets the level counter");

        let events = game.take_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameLost).count(), 1);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EntityDied { kind: EntityKind::Player, .. }
        )));
        assert!(events.iter().any(|e| matches!(e, GameEvent::BombExploded { .. })));
    }

    #[test]
    fn test_reaching_home_wins_and_keeps_level() {
        let mut game = game(3, 3, &[(0, 0), (0, 0)]);
        game.player.position = Position::new(2, 1);

        game.submit_move(Direction::Down);

        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.level(), 1, "a win preserves the level counter");

        game.restart().expect("next level exists");
        assert_eq!(game.level(), 2);
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(!game.is_ended());
    }

    #[test]
    fn test_zombie_catching_player_loses() {
        let mut game = game(4, 4, &[(1, 0)]);
        game.zombies[0].position = Position::new(2, 2);
        game.player.position = Position::new(2, 1);

        game.submit_move(Direction::Down);

        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.level(), 0);
    }

    #[test]
    fn test_lose_takes_precedence_over_win() {
        // The zombie is camping the home cell; stepping onto it is a
        // loss, never a win
        let mut game = game(3, 3, &[(1, 0)]);
        game.zombies[0].position = Position::new(2, 2);
        game.player.position = Position::new(2, 1);

        game.submit_move(Direction::Down);

        assert_eq!(game.status(), GameStatus::Lost);
        let events = game.take_events();
        assert!(!events.contains(&GameEvent::GameWon));
    }

    #[test]
    fn test_two_bombs_hit_player_and_zombie_in_one_pass() {
        let mut game = game(5, 5, &[(1, 2)]);
        game.bombs[0].position = Position::new(1, 0);
        game.bombs[1].position = Position::new(3, 3);
        game.zombies[0].position = Position::new(3, 3);

        game.submit_move(Direction::Right);

        // One pass, both effects: the player is gone and so is the
        // zombie sitting on the other bomb
        assert_eq!(game.status(), GameStatus::Lost);
        assert!(game.zombies().is_empty());
        assert!(game.bombs().is_empty());
        let events = game.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EntityDied { kind: EntityKind::Zombie, .. }
        )));
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameLost).count(), 1);
    }

    #[test]
    fn test_zombie_lured_into_bomb_explodes_it() {
        let mut game = game(7, 7, &[(1, 1)]);
        game.zombies[0].position = Position::new(3, 0);
        game.bombs[0].position = Position::new(2, 0);

        game.submit_move(Direction::Down);

        // The zombie chased the noise at (0, 1) straight onto the bomb
        assert_eq!(game.status(), GameStatus::Playing);
        assert!(game.zombies().is_empty());
        assert!(game.bombs().is_empty());
    }

    #[test]
    fn test_detonation_lures_zombies() {
        let mut game = game(7, 7, &[(1, 1)]);
        game.zombies[0].position = Position::new(0, 6);
        game.bombs[0].position = Position::new(2, 2);
        let bomb_id = game.bombs()[0].id;

        game.detonate_bomb(bomb_id);

        assert!(game.bombs().is_empty());
        assert_eq!(game.zombies()[0].position, Position::new(0, 5));
        assert_eq!(game.player().position, Position::new(0, 0), "detonation is not a player move");
    }

    #[test]
    fn test_end_game_is_idempotent() {
        let mut game = game(3, 3, &[(0, 0)]);
        game.win();
        let status = game.status();

        game.end_game();
        game.win();
        game.lose();

        assert_eq!(game.status(), status);
        assert_eq!(game.level(), 1);
        let events = game.take_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::GameWon).count(), 1);
        assert!(!events.contains(&GameEvent::GameLost));
    }

    #[test]
    fn test_input_ignored_once_ended() {
        let mut game = game(3, 3, &[(0, 1)]);
        game.win();
        let player_pos = game.player().position;
        let bomb_id = game.bombs()[0].id;
        game.take_events();

        game.submit_move(Direction::Right);
        game.detonate_bomb(bomb_id);

        assert_eq!(game.player().position, player_pos);
        assert_eq!(game.bombs().len(), 1);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_restart_during_play_is_a_no_op() {
        let mut game = game(3, 3, &[(0, 0)]);
        game.restart().expect("no-op restart");
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn test_restart_after_loss_returns_to_level_one() {
        let mut game = game(4, 4, &[(1, 0), (1, 0)]);
        game.zombies[0].position = Position::new(0, 1);

        game.submit_move(Direction::Down);
        assert_eq!(game.status(), GameStatus::Lost);

        game.restart().expect("level 1 exists");
        assert_eq!(game.level(), 1);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_start_past_table_end_errors() {
        let mut game = game(3, 3, &[(0, 0)]);
        game.player.position = Position::new(2, 1);
        game.submit_move(Direction::Down);
        assert_eq!(game.status(), GameStatus::Won);

        let err = game.restart().unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration {
                level: 2,
                table_len: 1,
            }
        );
    }

    #[test]
    fn test_overcrowded_level_fails_fast() {
        let result = Game::with_seed(Bounds::new(2, 2), table(&[(9, 0)]), 7);
        assert!(matches!(
            result,
            Err(GameError::UnplaceableEntity { .. })
        ));
    }
}
