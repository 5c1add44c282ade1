//! Calculation logic for the tax code engine.
//!
//! This module contains the free-pay allowance calculation and the penny
//! rounding helpers it is built on.

mod allowance;
mod rounding;

pub use allowance::{ALLOWANCE_BLOCK_SIZE, WEEKLY_BLOCK_VALUE, calculate_allowance};
pub use rounding::{ceil_to_penny, floor_to_pound};
