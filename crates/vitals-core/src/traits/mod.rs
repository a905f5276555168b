pub mod sink;

pub use sink::{AlertDelivery, AlertSink};
