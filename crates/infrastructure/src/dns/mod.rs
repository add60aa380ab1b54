pub mod forwarding;
pub mod querier;
pub mod reverse;
pub mod transport;

pub use querier::HickoryDnsQuerier;
pub use reverse::ip_to_reverse_domain;
