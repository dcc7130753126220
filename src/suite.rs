pub mod colors;
pub mod compare;
pub mod plan;
pub mod reference;
