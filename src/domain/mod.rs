//! Domain values shared by the catalog query service and the browse controller.

pub mod category;
pub mod filter;
pub mod product;
pub mod settings;
pub mod types;
