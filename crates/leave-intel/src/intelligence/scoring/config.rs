/// Fixed heuristic scoring table. The weights are tuned constants, not a probability model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub base_probability: i32,
    pub min_probability: i32,
    pub max_probability: i32,
    pub long_duration_days: u32,
    pub long_duration_penalty: i32,
    pub confidence_threshold: f64,
    pub low_confidence_penalty: i32,
    pub unspecified_type_penalty: i32,
    pub magistrate_bonus: i32,
    pub stated_motive_bonus: i32,
    pub balance_check_days: u32,
    pub base_resolution_days: i32,
    pub magistrate_resolution_days: i32,
    pub long_duration_resolution_days: i32,
    pub review_resolution_days: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_probability: 85,
            min_probability: 10,
            max_probability: 95,
            long_duration_days: 15,
            long_duration_penalty: 15,
            confidence_threshold: 0.8,
            low_confidence_penalty: 10,
            unspecified_type_penalty: 20,
            magistrate_bonus: 10,
            stated_motive_bonus: 5,
            balance_check_days: 10,
            base_resolution_days: 3,
            magistrate_resolution_days: -1,
            long_duration_resolution_days: 2,
            review_resolution_days: 1,
        }
    }
}
