pub mod connection;
pub mod params;
pub mod short_term_plasticity;

mod util;
