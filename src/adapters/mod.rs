//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                     |
//! |------------|--------------------|---------------------------------|
//! | `terminal` | InputPort          | crossterm mouse + keys          |
//! |            | PresentationPort   | ratatui diagram                 |
//! | `headless` | InputPort          | scripted channel values         |
//! |            | PresentationPort   | JSON lines on a writer          |
//! | `tone`     | TonePort           | cpal default output / silence   |
//! | `log_sink` | EventSink          | `log` facade                    |
//! | `time`     | ClockPort          | `std::time::Instant`            |

pub mod headless;
pub mod log_sink;
pub mod terminal;
pub mod time;
pub mod tone;
