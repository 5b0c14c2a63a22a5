//! Infrastructure layer: concrete implementations of the domain seams and the
//! wire-level DTOs.

pub mod connection;
pub mod dto;
pub mod notifier;
pub mod repository;
