//! Job positions and the candidates screened against them.

pub mod handlers;
