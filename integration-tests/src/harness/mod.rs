pub mod tracing;
pub mod upstream;

pub use tracing::{CapturedEvent, init_test_tracing};
pub use upstream::{Behaviour, WsUpstream};
