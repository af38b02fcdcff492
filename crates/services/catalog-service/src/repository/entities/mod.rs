//! SeaORM entities for the catalog tables.

pub mod category;
pub mod media;
pub mod product;
