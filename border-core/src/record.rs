//! Records of diagnostics emitted by environments and evaluators.
//!
//! ```rust
//! use border_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some process in reality
//! let reward = -1f32;
//! let act = vec![0.5f32, -0.5];
//!
//! let mut record = Record::empty();
//! record.insert("reward", RecordValue::Scalar(reward));
//! record.insert("act", RecordValue::Array1(act));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
mod base;

pub use base::{Record, RecordValue};
