//! Statistics helpers for training reports.
//!
//! # Example
//!
//! ```
//! use pokerga_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [0.1, 0.4, 0.2, 0.3];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 0.4);
//! ```

pub mod descriptive;
