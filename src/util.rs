pub fn decay_factor(t_diff: f64, tau: f64) -> f64 {
    (-t_diff / tau).exp()
}
