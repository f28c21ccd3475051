pub mod convert;
pub mod dto;
