//! # Use case layer
//!
//! Narrow, resource-scoped facades over the repository layer. Each use case
//! exposes a single `execute` taking a closed request enum; every variant
//! carries its inputs and callbacks and maps onto exactly one repository
//! method. No logic lives here beyond the dispatch.

pub mod media;
pub mod my_list;
pub mod seasons;
pub mod sections;
pub mod user;

pub use media::{MediaUseCase, MediaUseCaseRequest};
pub use my_list::{MyListUseCase, MyListUseCaseRequest};
pub use seasons::{SeasonsUseCase, SeasonsUseCaseRequest};
pub use sections::{SectionsUseCase, SectionsUseCaseRequest};
pub use user::{UserUseCase, UserUseCaseRequest};
