//! The renderer boundary and what the crate ships behind it.
//!
//! Scenes never talk to a concrete rasterizer: they stream instance
//! transforms through the [`batch::InstanceBatcher`] into a
//! [`backend::RenderBackend`], which owns clearing, draw execution, and pixel
//! readback. The built-in [`cpu::CpuBackend`] is always available.

pub mod backend;
pub mod batch;
pub mod cpu;
