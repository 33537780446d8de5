// Copyright 2026 Cornell University
// released under MIT License

pub mod backends;
pub mod diagnostic;
pub mod emit;
pub mod errors;
pub mod grouping;
pub mod ir;
pub mod request;
