#![doc = include_str!("../README.md")]

pub mod checksum;
pub mod classifier;
pub mod convert_loop;
pub mod diagnostics;
pub mod easy;
pub mod error;
pub mod ktest;
pub mod models;
pub mod nic;
pub mod repair;
pub mod sink;
pub mod utilities;

pub use checksum::*;
pub use convert_loop::*;
pub use repair::*;
pub use sink::*;
