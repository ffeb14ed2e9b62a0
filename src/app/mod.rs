//! Application core: pure domain orchestration, zero I/O.
//!
//! The service classifies each frame's channel snapshot, maps it to
//! indicator colours and the alarm flag, and hands the result to the
//! outside world through the **port traits** defined in [`ports`].  That
//! keeps this layer fully testable without a terminal or sound card.

pub mod events;
pub mod ports;
pub mod service;
