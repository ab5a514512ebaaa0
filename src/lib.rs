//! Orc Siege core: entity data, animation state machine and the per-frame
//! simulation. The terminal front-end lives in the binary.

pub mod animation;
pub mod compute;
pub mod constants;
pub mod entities;
