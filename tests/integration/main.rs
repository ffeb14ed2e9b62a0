//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the frame loop against
//! mock adapters.  No terminal or audio device is required.

mod mock_surface;
mod run_loop_tests;
mod scenario_tests;
