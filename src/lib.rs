//! Golden file testing harness
//!
//! Facade over [`golden_core`]. Typical use from a `cargo test` integration
//! test:
//!
//! ```no_run
//! use golden::{CheckRecorder, Discovery, GoldenConfig, GoldenError};
//!
//! # async fn example() -> golden::GoldenResult<()> {
//! let recorder = CheckRecorder::new("fixtures");
//! let config = GoldenConfig::from_env()?.with_base_path(env!("CARGO_MANIFEST_DIR"));
//! let update = config.update;
//! let discovery = Discovery::new(config, recorder.handle());
//!
//! discovery
//!     .run_dir("tests/test-fixtures", update, |case| async move {
//!         let input = case.input().text().await?;
//!         Ok::<_, GoldenError>(input.to_uppercase())
//!     })
//!     .await?;
//! recorder.assert_passed();
//! # Ok(())
//! # }
//! ```

pub use golden_core::*;
