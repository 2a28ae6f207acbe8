#![allow(dead_code)]

pub mod fixtures;
pub mod png_assertions;

use cardfit::{CardGenerator, ExecutorImpl, GeneratorBuilder};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A generator that only ever uses the built-in fixed-metric face, so
/// measurements do not depend on the fonts installed on the test host.
pub fn test_generator() -> CardGenerator {
    init_logging();
    GeneratorBuilder::new().with_system_fonts(false).build()
}

pub fn sequential_generator() -> CardGenerator {
    init_logging();
    GeneratorBuilder::new()
        .with_system_fonts(false)
        .with_executor(ExecutorImpl::sequential())
        .build()
}
