//! darkroad: damage-potential scoring and crafting-cost aggregation over the
//! medal and accessory catalogs, with a local JSON API and CLI around them.

pub mod cli;
pub mod craft;
pub mod data;
pub mod scoring;
pub mod server;
