//! Infrastructure layer - storage, hashing, file and logging implementations

pub mod image;
pub mod logging;
pub mod storage;
pub mod user;
