//! # Core Library
//!
//! Wire DTOs for the backend media API, the endpoint catalog that
//! preserves its exact paths and query shapes, and the repository layer:
//! cache-first-then-network reads, network-only writes, and at most one
//! in-flight task per repository instance.

pub mod endpoints;
pub mod models;
pub mod repositories;

pub use models::*;
pub use repositories::{
    HttpMediaRepository, HttpMyListRepository, HttpSeasonsRepository, HttpSectionsRepository,
    HttpUserRepository, MediaRepository, MyListRepository, SeasonsRepository, SectionsRepository,
    UserRepository,
};
