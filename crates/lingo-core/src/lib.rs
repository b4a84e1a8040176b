//! lingo-core: exercise normalization, answer collection and scoring.
//!
//! This crate turns loosely-structured exercise payloads into a canonical
//! view, collects typed user answers against it, and scores an attempt.
//! Everything here is synchronous and performs no network I/O.

pub mod answers;
pub mod config;
pub mod error;
pub mod model;
pub mod progress;
pub mod resolver;
pub mod scoring;
pub mod statistics;
pub mod timer;
