//! DTOs shared by the browse endpoint and its clients.

pub mod browse;
