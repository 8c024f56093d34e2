pub mod animation;
pub mod annotation;
pub mod config;
pub mod consts;
pub mod drawing;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod heatmap;
pub mod layers;
pub mod provider;
pub mod risk_map;
pub mod search;
pub mod viewport;
