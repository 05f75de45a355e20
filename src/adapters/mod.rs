//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                 |
//! |------------|------------|-----------------------------|
//! | `hardware` | OutputPort | Two indicator LEDs (GPIO)   |
//! | `log_sink` | EventSink  | Serial log output           |

pub mod hardware;
pub mod log_sink;
