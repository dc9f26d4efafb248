//! rodio-backed implementation of the playback device capability.

mod device;
mod sink;

pub use device::RodioDevice;
