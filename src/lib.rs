//! Single-screen arcade shooter: a paddle fires bullets and laser volleys at
//! three kinds of descending enemies.
//!
//! The library holds the deterministic core (`entities` + `compute`) and the
//! bits the terminal shell needs to feed it (`input`, `config`).

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
