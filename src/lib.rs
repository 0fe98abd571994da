//! Workspace facade crate.
//!
//! Host applications can depend on `media-browse-core` and reach the whole
//! data-transfer stack through [`core_service`] instead of wiring each
//! workspace crate individually.

pub use core_service;
