use serde::Deserialize;
use vesicle::params::SynapseKindParams;

#[derive(Debug, Deserialize)]
pub struct ScenarioParams {
    pub num_connections_per_set: usize,
    pub t_stop_ms: usize,
    pub mean_spiking_connections_per_ms: f64,
    pub synapse_sets: Vec<SynapseKindParams>,
}

pub fn get_scenario_params() -> ScenarioParams {
    let params_yaml_str = r#"
num_connections_per_set: 400
t_stop_ms: 50000
mean_spiking_connections_per_ms: 50.0
synapse_sets:
- !ShortTermPlasticity
  weight: 1.0
  U: 0.5
  tau_rec: 800.0
  tau_fac: 0.0
- !ShortTermPlasticity
  weight: 1.0
  U: 0.1
  tau_rec: 130.0
  tau_fac: 530.0
- !ShortTermPlasticity
  weight: -0.6
  U: 0.25
  tau_rec: 700.0
  tau_fac: 20.0
- !Static
  weight: 0.85
"#;

    serde_yaml::from_str(params_yaml_str).unwrap()
}
