pub mod keywords;
pub mod listing;
pub mod normalize;
pub mod pipeline;
