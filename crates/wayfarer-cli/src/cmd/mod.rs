pub mod ask;
pub mod plan;
pub mod show;
pub mod track;
