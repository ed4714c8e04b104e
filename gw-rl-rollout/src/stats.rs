use crate::EpisodeSummary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RolloutStats {
    pub episodes: usize,
    pub truncated: usize,
    pub mean_reward: f64,
    pub min_reward: f64,
    pub max_reward: f64,
    pub mean_steps: f64,
}

impl RolloutStats {
    pub fn from_summaries<O>(summaries: &[EpisodeSummary<O>]) -> Option<Self> {
        if summaries.is_empty() {
            return None;
        }

        let episodes = summaries.len();
        let rewards = summaries.iter().map(|s| s.total_reward);
        Some(RolloutStats {
            episodes,
            truncated: summaries.iter().filter(|s| s.truncated).count(),
            mean_reward: rewards.clone().sum::<f64>() / episodes as f64,
            min_reward: rewards.clone().fold(f64::INFINITY, f64::min),
            max_reward: rewards.fold(f64::NEG_INFINITY, f64::max),
            mean_steps: summaries.iter().map(|s| s.steps).sum::<usize>() as f64 / episodes as f64,
        })
    }
}
