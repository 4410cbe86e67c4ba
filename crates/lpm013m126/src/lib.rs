#![cfg_attr(not(test), no_std)]

//! LPM013M126 (JDI 1.28" 176x176 8-color memory LCD) driver primitives.
//!
//! The panel is line-addressed over SPI, Sharp-memory-LCD style, but takes
//! 3-bit RGB payloads and a plain-binary gate address. This crate carries
//! the wire protocol, a packed 3bpp framebuffer, and an optional
//! `embedded-graphics` `DrawTarget`; board code owns the SPI streaming.

mod color;
mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use color::Rgb111;
pub use framebuffer::FrameBuffer;
