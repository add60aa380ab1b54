//! dnswatch application layer: ports to the outside world and the use cases
//! the background jobs and the terminal front end drive.
pub mod ports;
pub mod services;
pub mod use_cases;
