//! Running score, collect streaks and kill combos for one run.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreContext {
    score: u64,
    streak: u32,
    best: u64,
    combo: u32,
}

impl ScoreContext {
    /// `best` is the persisted best score for the game, consumed once at session start.
    pub fn new(best: u64) -> Self {
        Self { best, ..Self::default() }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Extends the streak and awards `base` plus the streak bonus for every earlier link.
    pub fn record_collect(&mut self, base: u64, streak_bonus: u64) -> u64 {
        self.streak += 1;
        self.award(base + streak_bonus * u64::from(self.streak - 1))
    }

    pub fn break_streak(&mut self) {
        self.streak = 0;
    }

    /// Doubles with every kill inside the same combo window.
    pub fn record_kill(&mut self, base: u64) -> u64 {
        let points = base << self.combo.min(16);
        self.combo += 1;
        self.award(points)
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
    }

    pub fn award(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        points
    }

    /// Folds the run into the best score. Returns true when a new best was set.
    pub fn finalize(&mut self) -> bool {
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_bonus_grows_with_each_collect() {
        let mut score = ScoreContext::new(0);
        assert_eq!(score.record_collect(100, 50), 100);
        assert_eq!(score.record_collect(100, 50), 150);
        assert_eq!(score.record_collect(100, 50), 200);
        assert_eq!(score.score(), 450);
        score.break_streak();
        assert_eq!(score.record_collect(100, 50), 100);
        assert_eq!(score.streak(), 1);
    }

    #[test]
    fn kills_double_within_a_combo_window() {
        let mut score = ScoreContext::new(0);
        let awarded: Vec<u64> = (0..4).map(|_| score.record_kill(100)).collect();
        assert_eq!(awarded, vec![100, 200, 400, 800]);
        score.reset_combo();
        assert_eq!(score.record_kill(100), 100);
    }

    #[test]
    fn finalize_only_reports_a_beaten_best() {
        let mut score = ScoreContext::new(500);
        score.award(400);
        assert!(!score.finalize());
        assert_eq!(score.best(), 500);
        score.award(200);
        assert!(score.finalize());
        assert_eq!(score.best(), 600);
    }
}
