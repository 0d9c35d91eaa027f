use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};
use rand::Rng;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn unchanged(state: &GameState) -> Self {
        Self {
            terminated: state.status == GameStatus::GameOver,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // The initial snake never fills the grid (the CLI rejects grids that small)
        let food = self
            .spawn_food(&snake)
            .expect("fresh grid has at least one free cell");

        GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
            self.config.wrap,
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        // Paused and finished games are frozen: no movement, no counters
        if state.status != GameStatus::Running {
            return StepResult::unchanged(state);
        }

        // Update direction based on action (prevent 180-degree turns)
        match action {
            Action::Move(new_direction) => {
                if !state.snake.direction.is_opposite(new_direction) {
                    state.snake.direction = new_direction;
                }
            }
            Action::Continue => {
                // Keep current direction
            }
        }

        // Calculate the next head cell under the current boundary policy
        let direction = state.snake.direction;
        let new_head = if state.wrap {
            state
                .snake
                .head()
                .wrapped_in_direction(direction, state.grid_width, state.grid_height)
        } else {
            state.snake.head().moved_in_direction(direction)
        };

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = GameStatus::GameOver;
            state.steps += 1;

            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            match self.spawn_food(&state.snake) {
                Some(food) => state.food = food,
                // Snake covers the whole grid: nowhere left to go
                None => state.status = GameStatus::GameOver,
            }
        }

        StepResult {
            terminated: state.status == GameStatus::GameOver,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        // Wall collision only exists with wrapping off; wrapped heads are
        // always in bounds by construction
        if !state.wrap && !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        let growing = pos == state.food;
        if state.snake.would_collide(pos, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random position not occupied by the snake, or None
    /// if the snake covers every cell
    fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        if snake.len() >= self.config.grid_width * self.config.grid_height {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..self.config.grid_width) as i32;
            let y = self.rng.gen_range(0..self.config.grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.contains(pos) {
                return Some(pos);
            }
        }
    }
}
