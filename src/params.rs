use serde::{Deserialize, Serialize};
use simple_error::SimpleError;

/// Parameters of the short-term plasticity kinetic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StpSynapseParams {
    /// Base synaptic strength, arbitrary sign and magnitude.
    pub weight: f64,
    /// Utilization increment per presynaptic spike, also the resting value
    /// the release probability decays back to. Must be in [0, 1].
    #[serde(rename = "U")]
    pub u_baseline: f64,
    /// Recovery time constant of depleted resources in ms.
    pub tau_rec: f64,
    /// Facilitation time constant in ms. Zero switches facilitation off.
    pub tau_fac: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SynapseKindParams {
    Static { weight: f64 },
    ShortTermPlasticity(StpSynapseParams),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub target_nid: usize,
    pub delay_steps: usize,
    pub receiver_port: usize,
    pub synapse_params: SynapseKindParams,
}

impl ConnectionParams {
    pub fn defaults_for_target(target_nid: usize) -> Self {
        Self {
            target_nid,
            delay_steps: 1,
            receiver_port: 0,
            synapse_params: SynapseKindParams::default(),
        }
    }
}

/// Partial override set accepted by `set_status`. Fields left at `None` are
/// not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusUpdate {
    pub weight: Option<f64>,
    #[serde(rename = "U")]
    pub u_baseline: Option<f64>,
    pub u: Option<f64>,
    pub x: Option<f64>,
    pub tau_rec: Option<f64>,
    pub tau_fac: Option<f64>,
    pub delay_steps: Option<usize>,
    pub receiver_port: Option<usize>,
}

/// Full view of a connection's state as named key-value fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynapseStatus {
    pub weight: f64,
    #[serde(rename = "U")]
    pub u_baseline: f64,
    pub u: f64,
    pub x: f64,
    pub tau_rec: f64,
    pub tau_fac: f64,
    pub delay_steps: usize,
    pub receiver_port: usize,
    pub size_of: usize,
}

impl Default for StpSynapseParams {
    fn default() -> Self {
        Self {
            weight: 1.0,
            u_baseline: 0.5,
            tau_rec: 800.0,
            tau_fac: 0.0,
        }
    }
}

impl Default for SynapseKindParams {
    fn default() -> Self {
        SynapseKindParams::ShortTermPlasticity(StpSynapseParams::default())
    }
}

pub fn validate_synapse_params(synapse_params: &SynapseKindParams) -> Result<(), SimpleError> {
    match synapse_params {
        SynapseKindParams::Static { .. } => Ok(()),
        SynapseKindParams::ShortTermPlasticity(stp_params) => {
            validate_stp_synapse_params(stp_params)
        }
    }
}

pub fn validate_stp_synapse_params(stp_params: &StpSynapseParams) -> Result<(), SimpleError> {
    validate_u_baseline(stp_params.u_baseline)?;
    validate_tau_rec(stp_params.tau_rec)?;
    validate_tau_fac(stp_params.tau_fac)?;

    Ok(())
}

pub(crate) fn validate_u_baseline(value: f64) -> Result<(), SimpleError> {
    if value < 0.0 || value > 1.0 {
        return Err(SimpleError::new("U must be in [0, 1]"));
    }

    Ok(())
}

pub(crate) fn validate_u(value: f64) -> Result<(), SimpleError> {
    if value < 0.0 || value > 1.0 {
        return Err(SimpleError::new("u must be in [0, 1]"));
    }

    Ok(())
}

pub(crate) fn validate_x(value: f64) -> Result<(), SimpleError> {
    if value < 0.0 || value > 1.0 {
        return Err(SimpleError::new("x must be in [0, 1]"));
    }

    Ok(())
}

pub(crate) fn validate_tau_rec(value: f64) -> Result<(), SimpleError> {
    if value <= 0.0 {
        return Err(SimpleError::new("tau_rec must be strictly positive"));
    }

    Ok(())
}

pub(crate) fn validate_tau_fac(value: f64) -> Result<(), SimpleError> {
    if value < 0.0 {
        return Err(SimpleError::new("tau_fac must not be negative"));
    }

    Ok(())
}
