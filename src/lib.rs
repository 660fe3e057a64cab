//! # Courtside
//!
//! Team performance analytics for basketball training data.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (sessions, records, derived stats)
//! - **calculate**: Team trends, player rankings, athlete metrics
//! - **chart**: Presentation-agnostic chart shaping (labels, axes, trend lines)
//! - **storage**: Filesystem persistence (JSONL)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod chart;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
