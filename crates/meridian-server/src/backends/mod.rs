//! Collaborator backend implementations.
//!
//! The production resolver lives in the upstream config-resolution service;
//! this module provides the in-memory implementations used by the standalone
//! binary and the test harness.

pub mod memory;

pub use memory::{
    ClusterWatchKeyAssembler, MemoryGrayRules, MemoryNamespaceIndex, MemoryResolver, Seed,
};
