//! Score and level bookkeeping.

use rr_core::GameConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    score: u32,
    level: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self { score: 0, level: 1 }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Raise the level to whatever the current score has earned and return
    /// each level newly reached, lowest first.
    pub fn advance_levels(&mut self, config: &GameConfig) -> Vec<u32> {
        let earned = config.level_for_score(self.score);
        if earned <= self.level {
            return Vec::new();
        }
        let reached: Vec<u32> = (self.level + 1..=earned).collect();
        self.level = earned;
        reached
    }
}
