//! # Dot-Scaling
//!
//! Dot product kernels written three ways, timed across geometric input
//! sizes, with the growth of their cost classified against a family of
//! complexity curves.

pub mod complexity;
pub mod error;
pub mod math;
pub mod registry;
pub mod report;
pub mod utils;

/// Re-export tui from utils
pub use utils::tui;

/// Re-export the suite driver from utils::runner
pub use utils::runner::{run_suite, RunOptions};

/// Re-export commonly used items
pub mod prelude {
    pub use crate::complexity::{Complexity, ComplexityHint, ComplexityReport};
    pub use crate::error::{ConfigError, ReportError};
    pub use crate::math::dot_product;
    pub use crate::registry::{build_registry, BenchmarkRegistry, Registration, SizeRange};
    pub use crate::report::SuiteReport;
    pub use crate::utils::runner::{run_suite, RunOptions};
    pub use crate::utils::timer::{PinStrategy, TimingConfig};
}
