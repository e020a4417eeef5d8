//! ahara: compatibility scoring and plan assembly engine for
//! personalized multi-day nutrition plans.
//!
//! The pipeline is a synchronous, side-effect-free computation:
//! subject profile + context -> compatibility scorer (over the
//! immutable knowledge base) -> ranking engine -> plan assembler ->
//! aggregation reporter. All components take the knowledge base by
//! reference and exchange plain value types, so concurrent callers need
//! no locking.

pub mod composite;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod persist;
pub mod planner;
pub mod profile;
pub mod ranking;
pub mod report;
pub mod scoring;
