use crate::{params::StpSynapseParams, util::decay_factor};

/// Facilitation time constants below this threshold switch facilitation off
/// entirely: the release probability falls back to its baseline before every
/// spike instead of dividing by a vanishing tau_fac.
pub const TAU_FAC_DISABLED_BELOW: f64 = 1.0e-10;

/// Kinetic state of one plastic connection. Owned exclusively by that
/// connection and advanced only by [`StpState::on_pre_syn_spike`].
#[derive(Debug, Clone)]
pub struct StpState {
    pub weight: f64,
    pub u_baseline: f64,
    pub u: f64,
    pub x: f64,
    pub tau_rec: f64,
    pub tau_fac: f64,
    pub t_last_spike: f64,
}

impl StpState {
    pub fn new(params: &StpSynapseParams) -> Self {
        Self {
            weight: params.weight,
            u_baseline: params.u_baseline,
            u: params.u_baseline,
            x: 1.0,
            tau_rec: params.tau_rec,
            tau_fac: params.tau_fac,
            t_last_spike: 0.0,
        }
    }

    /// Advances the state to `t_spike` (ms) and returns the effective weight
    /// to deliver for this spike.
    ///
    /// Timestamps must be non-decreasing per connection. The step order is
    /// load-bearing: resources and release probability decay from their
    /// pre-spike values, facilitation then raises `u`, the delivered weight
    /// uses the raised `u` against the not-yet-depleted `x`, and depletion
    /// comes last. Valid parameters keep `u` and `x` in [0, 1] without
    /// clamping: both decays are convex combinations toward in-range
    /// targets, facilitation steps `u` toward 1, and depletion multiplies
    /// `x` by `1 - u`.
    pub fn on_pre_syn_spike(&mut self, t_spike: f64) -> f64 {
        debug_assert!(t_spike >= self.t_last_spike);

        let h = t_spike - self.t_last_spike;
        let x_decay = decay_factor(h, self.tau_rec);
        let u_decay = if self.tau_fac < TAU_FAC_DISABLED_BELOW {
            0.0
        } else {
            decay_factor(h, self.tau_fac)
        };

        self.x = 1.0 + (self.x - 1.0) * x_decay;
        self.u = self.u_baseline + (self.u - self.u_baseline) * u_decay;
        self.u += self.u_baseline * (1.0 - self.u);

        let effective_weight = self.weight * self.x * self.u;

        self.x -= self.u * self.x;
        self.t_last_spike = t_spike;

        effective_weight
    }
}

impl Default for StpState {
    fn default() -> Self {
        Self::new(&StpSynapseParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn first_spike_from_defaults() {
        let mut state = StpState::default();
        let effective_weight = state.on_pre_syn_spike(0.0);

        // h = 0, tau_fac off: u resets to 0.5, facilitates to 0.75
        assert_approx_eq!(f64, effective_weight, 0.75);
        assert_approx_eq!(f64, state.u, 0.75);
        assert_approx_eq!(f64, state.x, 0.25);
        assert_approx_eq!(f64, state.t_last_spike, 0.0);
    }

    #[test]
    fn second_spike_one_recovery_time_constant_later() {
        let mut state = StpState::default();
        state.on_pre_syn_spike(0.0);
        let effective_weight = state.on_pre_syn_spike(800.0);

        let expected_x = 1.0 - 0.75 * (-1.0f64).exp();
        assert_approx_eq!(f64, effective_weight, 0.75 * expected_x);
        assert_approx_eq!(f64, state.u, 0.75);
        assert_approx_eq!(f64, state.x, 0.25 * expected_x);
    }

    #[test]
    fn coincident_spikes_skip_decay() {
        let params = StpSynapseParams {
            weight: 1.0,
            u_baseline: 0.2,
            tau_rec: 100.0,
            tau_fac: 50.0,
        };

        let mut state = StpState::new(&params);
        state.on_pre_syn_spike(10.0);
        let u_before = state.u;
        let x_before = state.x;

        // h = 0: both decay factors are exactly 1
        state.on_pre_syn_spike(10.0);
        assert_approx_eq!(f64, state.u, u_before + 0.2 * (1.0 - u_before));
        assert_approx_eq!(f64, state.x, x_before * (1.0 - state.u));
    }

    #[test]
    fn facilitating_sequence() {
        let params = StpSynapseParams {
            weight: 2.0,
            u_baseline: 0.1,
            tau_rec: 100.0,
            tau_fac: 50.0,
        };

        let mut state = StpState::new(&params);

        let first = state.on_pre_syn_spike(0.0);
        assert_approx_eq!(f64, first, 2.0 * 0.19);
        assert_approx_eq!(f64, state.x, 0.81);

        let second = state.on_pre_syn_spike(25.0);
        let expected_x = 1.0 - 0.19 * (-0.25f64).exp();
        let decayed_u = 0.1 + 0.09 * (-0.5f64).exp();
        let expected_u = decayed_u + 0.1 * (1.0 - decayed_u);
        assert_approx_eq!(f64, second, 2.0 * expected_x * expected_u);
        assert!(second > first);
    }

    #[test]
    fn full_recovery_between_distant_spikes() {
        let mut state = StpState::default();
        state.on_pre_syn_spike(0.0);
        state.on_pre_syn_spike(1.0);

        // many recovery time constants later, x is back at 1 and u at the
        // baseline before the facilitation step
        let effective_weight = state.on_pre_syn_spike(1.0e7);
        assert_approx_eq!(f64, effective_weight, 0.75, epsilon = 1e-9);
    }

    #[test]
    fn disabled_facilitation_has_no_memory() {
        let mut state = StpState::default();

        for t in [0.0, 5.0, 10.0, 300.0] {
            state.on_pre_syn_spike(t);
            // u always resets to U and facilitates to U + U * (1 - U)
            assert_approx_eq!(f64, state.u, 0.75);
        }
    }

    #[test]
    fn tau_fac_just_below_threshold_is_off() {
        let params = StpSynapseParams {
            tau_fac: 0.9e-10,
            ..StpSynapseParams::default()
        };

        let mut state = StpState::new(&params);
        state.on_pre_syn_spike(0.0);
        state.on_pre_syn_spike(0.0);
        assert_approx_eq!(f64, state.u, 0.75);
    }

    #[test]
    fn saturated_u_baseline_depletes_fully() {
        let params = StpSynapseParams {
            weight: 1.0,
            u_baseline: 1.0,
            tau_rec: 100.0,
            tau_fac: 0.0,
        };

        let mut state = StpState::new(&params);
        let effective_weight = state.on_pre_syn_spike(0.0);

        assert_approx_eq!(f64, effective_weight, 1.0);
        assert_approx_eq!(f64, state.x, 0.0);
        assert_approx_eq!(f64, state.u, 1.0);
    }
}
