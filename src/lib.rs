#![doc = include_str!("../README.md")]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod de;
pub mod error;
pub mod shape;

mod data;
pub use data::*;

pub use de::obj::{decode_mesh, decode_object};
pub use error::{Error, Warning};
