use kybnmr::engine::config::MatchPolicy;

pub struct DefaultsConfig {
    pub energy_threshold: f64,
    pub distance_threshold: f64,
    pub match_policy: MatchPolicy,
    pub append: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            energy_threshold: 0.25,
            distance_threshold: 0.10,
            match_policy: MatchPolicy::FirstMatch,
            append: false,
        }
    }
}
