//! # Chained Hash Map
//!
//! A Rust implementation of a hash table resolving collisions by separate chaining.
//!
//! `ChainedHashMap` keeps a power-of-two array of slots. Each slot is either empty or
//! owns the chain of entries whose keys hashed to it. Once an insertion would bring the
//! number of entries up to 75% of the slot count, the table doubles and every entry is
//! moved to its new slot.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new hash map with 16 slots
//! let mut map = ChainedHashMap::new();
//! assert_eq!(map.capacity(), 16);
//!
//! // Insert values
//! assert_eq!(map.put("apple".to_string(), 1), None);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values, getting the previous one back
//! assert_eq!(map.put("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.size(), 1);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! for i in 0..11 {
//!     map.put(i, i * i);
//! }
//! assert_eq!(map.capacity(), 16);
//!
//! // The twelfth key reaches the threshold of 12 and doubles the table
//! map.put(11, 121);
//! assert_eq!(map.capacity(), 32);
//! assert_eq!(map.get(&7), Some(&49));
//! ```

/// Module implementing the single-threaded chained hash map
mod chained_hashmap;

pub mod config;
pub mod demo;
pub mod logger;

pub use chained_hashmap::{ChainedHashMap, Iter};
pub use config::{ConfigError, DemoConfig};
