//! Text rendering for the quiz terminal front-end

pub mod render;
pub mod widgets;
