//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Real Las Vegas points of interest (from OpenStreetMap) with tags and ratings
//! - Builders for candidates and preference profiles

#![allow(dead_code)]

pub mod las_vegas_pois;

pub use las_vegas_pois::*;
