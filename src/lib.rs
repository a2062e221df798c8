pub mod constants;
pub mod geometry;
pub mod hit;
pub mod models;
pub mod selection;
pub mod storage;
