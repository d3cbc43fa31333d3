pub mod arxiv;
pub mod http;
pub mod itch;
pub mod normalize;
