use std::time::{Duration, Instant};

/// Stats for the current terminal session. A restart begins a new game but
/// keeps the session totals.
pub struct GameMetrics {
    game_started: Instant,
    games_played: u32,
    high_score: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            games_played: 0,
            high_score: 0,
        }
    }

    /// Called when a fresh game begins (restart key)
    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
    }

    /// Called once per finished game
    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Wall-clock time of the current game
    pub fn elapsed(&self) -> Duration {
        self.game_started.elapsed()
    }

    /// Current game time as mm:ss
    pub fn format_elapsed(&self) -> String {
        format_duration(self.elapsed())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score(), 10);
        assert_eq!(metrics.games_played(), 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score(), 10); // Should not decrease
        assert_eq!(metrics.games_played(), 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score(), 15); // Should update
        assert_eq!(metrics.games_played(), 3);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));

        assert!(metrics.elapsed().as_millis() >= 50);

        metrics.on_game_start();
        assert!(metrics.elapsed().as_millis() < 50);
    }
}
