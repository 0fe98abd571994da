//! # Repository layer
//!
//! Repositories combine the data-transfer service with an optional
//! persistent response store:
//!
//! - reads are cache-first-then-network: a cached record (possibly stale)
//!   is surfaced immediately through the `cached` hook, then the network
//!   result arrives through `completion` and overwrites the cache entry
//! - writes go straight to the network; cache-relevant writes persist or
//!   invalidate their entry before completing
//! - each repository instance holds at most one live task; starting a new
//!   operation cancels the prior one, and a cancelled operation never
//!   fires a callback
//!
//! Repositories surface the `DataTransferError` taxonomy unchanged; they
//! add no error kinds of their own.

pub mod media;
pub mod my_list;
pub mod seasons;
pub mod sections;
mod support;
pub mod user;

pub use media::{HttpMediaRepository, MediaRepository};
pub use my_list::{HttpMyListRepository, MyListRepository};
pub use seasons::{HttpSeasonsRepository, SeasonsRepository};
pub use sections::{HttpSectionsRepository, SectionsRepository};
pub use user::{HttpUserRepository, UserRepository};
