//! Test fixtures for the certificate verification crates.

mod chain;
mod counting;
mod scenario;

pub use chain::MemChain;
pub use counting::{CountingProofSystem, ResourceCounter, Tracked};
pub use scenario::{Scenario, ScenarioBuilder, bt_output, regular_output};
use zendoo_common::logging::{self, LoggerConfig};

/// Installs a test subscriber once per process; later calls are no-ops.
pub fn init_test_logging() {
    let _ = logging::try_init(LoggerConfig::for_tests("zendoo-tests"));
}
