pub mod editing_rhythm;
pub mod timeline;
