pub mod angles;
pub mod config;
pub mod effects;
pub mod heel;
pub mod hull;
pub mod models;
pub mod navigation;
pub mod physics;
pub mod sail;
pub mod vector;
pub mod wind;
