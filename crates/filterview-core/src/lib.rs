pub mod config;
pub mod consts;
pub mod error;
pub mod faves;
pub mod geometry;
pub mod preview;
pub mod source;
pub mod timer;
