pub mod compare;
pub mod export;
pub mod models;
pub mod normalize;
pub mod sample;
