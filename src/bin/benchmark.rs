use std::time::Instant;

use rand::{prelude::Distribution, rngs::StdRng, seq::SliceRandom, SeedableRng};
use statrs::distribution::Poisson;
use vesicle::connection::{self, Connection, SpikeEvent, SpikeHandler};
use vesicle::params::ConnectionParams;

#[path = "../scenario_params.rs"]
mod scenario_params;

struct ChecksumHandler {
    transmission_count: usize,
    weight_checksum: f64,
}

impl SpikeHandler for ChecksumHandler {
    fn handle_spike(&mut self, event: SpikeEvent) {
        self.transmission_count += 1;
        self.weight_checksum += event.weight * (event.receiver_port + 1) as f64;
    }
}

fn main() {
    let scenario = scenario_params::get_scenario_params();

    let mut connections: Vec<Box<dyn Connection + Send>> = Vec::new();

    for synapse_params in &scenario.synapse_sets {
        for target_nid in 0..scenario.num_connections_per_set {
            let params = ConnectionParams {
                target_nid,
                delay_steps: 1,
                receiver_port: 0,
                synapse_params: synapse_params.clone(),
            };

            connections.push(connection::create(&params).unwrap());
        }
    }

    let connection_indices: Vec<usize> = (0..connections.len()).collect();
    let mut rng = StdRng::seed_from_u64(0);
    let num_spiking_dist = Poisson::new(scenario.mean_spiking_connections_per_ms).unwrap();

    let mut handler = ChecksumHandler {
        transmission_count: 0,
        weight_checksum: 0.0,
    };

    let wall_start = Instant::now();

    for t in 0..scenario.t_stop_ms {
        let num_spiking = num_spiking_dist.sample(&mut rng) as usize;

        for idx in connection_indices.choose_multiple(&mut rng, num_spiking) {
            connections[*idx].send(t as f64, &mut handler);
        }
    }

    let wall_time = wall_start.elapsed();
    let transmission_throughput = handler.transmission_count as f64 / wall_time.as_secs_f64();

    eprintln!("Transmissions: {}", handler.transmission_count);
    eprintln!(
        "Transmission processing throughput: {:.3e} ({:.3} ns per transmission)",
        transmission_throughput,
        1e9 / transmission_throughput
    );
    eprintln!("Weight checksum: {}", handler.weight_checksum);
}
