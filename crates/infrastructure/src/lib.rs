//! dnswatch infrastructure: the hickory-proto resolver adapter, JSON file
//! history storage and the domain list reader.
pub mod dns;
pub mod repositories;
pub mod system;
