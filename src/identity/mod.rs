// src/identity/mod.rs
mod product;

pub use product::{ProductError, ProductHeader};
