use std::mem;

use log::trace;
use simple_error::SimpleError;

use crate::params::{
    self, ConnectionParams, StatusUpdate, StpSynapseParams, SynapseKindParams, SynapseStatus,
};
use crate::short_term_plasticity::StpState;

/// Outgoing event delivered to the target node for each transmitted spike.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeEvent {
    pub weight: f64,
    pub delay_steps: usize,
    pub receiver_port: usize,
}

/// Delivery entry point of a downstream node.
pub trait SpikeHandler {
    fn handle_spike(&mut self, event: SpikeEvent);
}

/// Capability set shared by all synapse kinds.
pub trait Connection {
    fn target_nid(&self) -> usize;
    fn delay_steps(&self) -> usize;
    fn receiver_port(&self) -> usize;

    /// Processes a presynaptic spike at `t_spike` (ms) and emits the
    /// resulting event to `target`. Timestamps must be non-decreasing per
    /// connection.
    fn send(&mut self, t_spike: f64, target: &mut dyn SpikeHandler);
}

pub fn create(params: &ConnectionParams) -> Result<Box<dyn Connection + Send>, SimpleError> {
    match &params.synapse_params {
        SynapseKindParams::Static { weight } => Ok(Box::new(StaticConnection::new(
            params.target_nid,
            params.delay_steps,
            params.receiver_port,
            *weight,
        ))),
        SynapseKindParams::ShortTermPlasticity(stp_params) => Ok(Box::new(StpConnection::new(
            params.target_nid,
            params.delay_steps,
            params.receiver_port,
            stp_params,
        )?)),
    }
}

/// Fields shared across synapse kinds, outside the plasticity core.
#[derive(Debug, Clone)]
struct ConnectionBase {
    target_nid: usize,
    delay_steps: usize,
    receiver_port: usize,
}

impl ConnectionBase {
    fn apply_update(&mut self, update: &StatusUpdate) {
        if let Some(delay_steps) = update.delay_steps {
            self.delay_steps = delay_steps;
        }

        if let Some(receiver_port) = update.receiver_port {
            self.receiver_port = receiver_port;
        }
    }
}

/// Connection with short-term depression and facilitation dynamics.
#[derive(Debug, Clone)]
pub struct StpConnection {
    base: ConnectionBase,
    state: StpState,
}

impl StpConnection {
    pub fn new(
        target_nid: usize,
        delay_steps: usize,
        receiver_port: usize,
        stp_params: &StpSynapseParams,
    ) -> Result<Self, SimpleError> {
        params::validate_stp_synapse_params(stp_params)?;

        Ok(Self {
            base: ConnectionBase {
                target_nid,
                delay_steps,
                receiver_port,
            },
            state: StpState::new(stp_params),
        })
    }

    pub fn get_status(&self) -> SynapseStatus {
        SynapseStatus {
            weight: self.state.weight,
            u_baseline: self.state.u_baseline,
            u: self.state.u,
            x: self.state.x,
            tau_rec: self.state.tau_rec,
            tau_fac: self.state.tau_fac,
            delay_steps: self.base.delay_steps,
            receiver_port: self.base.receiver_port,
            size_of: mem::size_of::<Self>(),
        }
    }

    /// Applies a partial override set. Each field is written before it is
    /// validated: on a violation the offending value stays in place, the
    /// error names the field and its bound, and the remaining fields of the
    /// update are not applied. A failed update leaves the connection in
    /// need of correction before further use.
    pub fn set_status(&mut self, update: &StatusUpdate) -> Result<(), SimpleError> {
        if let Some(weight) = update.weight {
            self.state.weight = weight;
        }

        if let Some(u_baseline) = update.u_baseline {
            self.state.u_baseline = u_baseline;
            params::validate_u_baseline(u_baseline)?;
        }

        if let Some(u) = update.u {
            self.state.u = u;
            params::validate_u(u)?;
        }

        if let Some(tau_rec) = update.tau_rec {
            self.state.tau_rec = tau_rec;
            params::validate_tau_rec(tau_rec)?;
        }

        if let Some(tau_fac) = update.tau_fac {
            self.state.tau_fac = tau_fac;
            params::validate_tau_fac(tau_fac)?;
        }

        if let Some(x) = update.x {
            self.state.x = x;
            params::validate_x(x)?;
        }

        self.base.apply_update(update);

        Ok(())
    }
}

impl Connection for StpConnection {
    fn target_nid(&self) -> usize {
        self.base.target_nid
    }

    fn delay_steps(&self) -> usize {
        self.base.delay_steps
    }

    fn receiver_port(&self) -> usize {
        self.base.receiver_port
    }

    fn send(&mut self, t_spike: f64, target: &mut dyn SpikeHandler) {
        let effective_weight = self.state.on_pre_syn_spike(t_spike);

        trace!(
            "delivering spike to nid {} at t = {} ms, effective weight {}",
            self.base.target_nid,
            t_spike,
            effective_weight
        );

        target.handle_spike(SpikeEvent {
            weight: effective_weight,
            delay_steps: self.base.delay_steps,
            receiver_port: self.base.receiver_port,
        });
    }
}

/// Connection without plasticity; delivers the bare weight on every spike.
#[derive(Debug, Clone)]
pub struct StaticConnection {
    base: ConnectionBase,
    weight: f64,
}

impl StaticConnection {
    pub fn new(target_nid: usize, delay_steps: usize, receiver_port: usize, weight: f64) -> Self {
        Self {
            base: ConnectionBase {
                target_nid,
                delay_steps,
                receiver_port,
            },
            weight,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

impl Connection for StaticConnection {
    fn target_nid(&self) -> usize {
        self.base.target_nid
    }

    fn delay_steps(&self) -> usize {
        self.base.delay_steps
    }

    fn receiver_port(&self) -> usize {
        self.base.receiver_port
    }

    fn send(&mut self, t_spike: f64, target: &mut dyn SpikeHandler) {
        trace!(
            "delivering spike to nid {} at t = {} ms, weight {}",
            self.base.target_nid,
            t_spike,
            self.weight
        );

        target.handle_spike(SpikeEvent {
            weight: self.weight,
            delay_steps: self.base.delay_steps,
            receiver_port: self.base.receiver_port,
        });
    }
}
