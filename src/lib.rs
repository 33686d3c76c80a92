//! Deterministic budget- and diversity-constrained portfolio selection.
//!
//! `portfolio-core` picks, from a catalog of candidate projects, the subset with
//! the best (rating, participants, -budget) objective that stays within a
//! budget cap and keeps every theme and country under a proportional quota.
//! The search is a dynamic program over (count, budget, diversity profile)
//! states, bounded by a configurable state ceiling. Identical inputs always
//! produce identical selections.

pub mod catalog;
pub mod config;
pub mod report;
pub mod search;
pub mod selection;
pub mod types;
