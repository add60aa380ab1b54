pub mod blink;
pub mod collection;
pub mod runner;

pub use blink::BlinkJob;
pub use collection::CollectionJob;
pub use runner::JobRunner;
