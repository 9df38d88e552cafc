//! # Infrastructure Layer
//!
//! Adapters to the outside world: the relational store.

pub mod persistence;
