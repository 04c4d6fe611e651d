pub mod render;
pub mod transcript;
pub mod turn;
