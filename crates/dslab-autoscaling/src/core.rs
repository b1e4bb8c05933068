//! Core abstractions: VM model, factory and scaling policy.

pub mod cloudlet_scheduler;
pub mod config;
pub mod context;
pub mod error;
pub mod load_model;
pub mod log;
pub mod overload;
pub mod scaling;
pub mod vm;
pub mod vm_factory;
