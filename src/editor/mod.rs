pub mod controller;
pub mod product;
pub mod snapshot;
