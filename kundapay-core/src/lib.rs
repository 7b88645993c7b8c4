#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod corridor;
pub mod entities;
pub mod framework;
pub mod processors;
pub mod quote;
pub mod repository;
