//! Image infrastructure - where uploaded files are written

mod disk_store;

pub use disk_store::{generate_file_name, DiskImageStore};
