#![no_std]

//! ESP32-S3 board glue for the Horizon watchface.

extern crate alloc;

pub mod battery;
pub mod companion;
pub mod haptics;
pub mod platform;
pub mod render;
