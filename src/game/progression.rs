/// Food needed to gain one level
pub const SCORE_PER_LEVEL: u32 = 3;
/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;
/// Logical updates the eating feedback stays up after being shown
pub const FEEDBACK_TICKS: u32 = 5;

/// Level reached with `score` food eaten
pub fn level_for(score: u32) -> u32 {
    (score / SCORE_PER_LEVEL).min(MAX_LEVEL)
}

/// Raw ticks per logical update at `level`; lower is faster
pub fn tick_rate_for(level: u32) -> u32 {
    MAX_LEVEL + 1 - level.min(MAX_LEVEL)
}

/// Score, level and the "ate food" feedback window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressionTracker {
    score: u32,
    eating_triggered: bool,
    feedback_visible: bool,
    feedback_timer: u32,
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one food and arm the feedback for the next logical update
    pub fn on_food_eaten(&mut self) {
        self.score += 1;
        self.eating_triggered = true;
    }

    /// Run once per logical update, after the snake moved.
    ///
    /// An armed trigger shows the feedback and restarts the countdown. Without
    /// a trigger the countdown runs down and the feedback hides at zero.
    pub fn advance_feedback(&mut self) {
        if self.eating_triggered {
            self.eating_triggered = false;
            self.feedback_visible = true;
            self.feedback_timer = FEEDBACK_TICKS;
        } else if self.feedback_timer == 0 {
            self.feedback_visible = false;
        } else {
            self.feedback_timer -= 1;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        level_for(self.score)
    }

    pub fn tick_rate(&self) -> u32 {
        tick_rate_for(self.level())
    }

    pub fn is_feedback_visible(&self) -> bool {
        self.feedback_visible
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
