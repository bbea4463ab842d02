//! spincrate
//!
//! A minimal, cross-platform tutorial scene renderer built on wgpu. It loads
//! a vertex/fragment shader pair, builds a single textured cube with its
//! uniform buffers, and renders it once per frame with an autonomous 45°/s
//! spin that a touch or mouse drag can override. Resources are created by a
//! one-time asynchronous load chain and guarded by an atomic readiness gate;
//! rendering is a no-op until loading completes.
//!
//! High-level modules
//! - `app`: winit event loop hosting the scene (native and WASM)
//! - `assets`: loading of the fixed shader and texture files
//! - `cube`: the fixed cube mesh (8 vertices, 36 indices, input layout)
//! - `device`: central GPU and window context (device/queue/surface)
//! - `lighting`: the scene's fixed lighting constants
//! - `pipeline`: the one render pipeline and its bind group layouts
//! - `scene`: the scene renderer (resource lifecycle + per-frame draw)
//! - `texture`: GPU texture wrapper and creation utilities
//! - `timer`: frame timing source
//! - `transforms`: model/view/projection state and drag tracking
//!

pub mod app;
pub mod assets;
pub mod cube;
pub mod device;
pub mod lighting;
pub mod pipeline;
pub mod scene;
pub mod texture;
pub mod timer;
pub mod transforms;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::event::WindowEvent;
pub use wgpu::*;
