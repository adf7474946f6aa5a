pub mod annotate;
pub mod status;
