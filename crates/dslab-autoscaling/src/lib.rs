#![doc = include_str!("../readme.md")]

pub mod broker;
pub mod core;
pub mod datacenter;
pub mod simulation;

pub use colored;
