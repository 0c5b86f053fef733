#![no_std]

extern crate alloc;

pub use gambit_protocol::{Difficulty, StatusCategory};

pub use board::*;
pub use error::*;
pub use history::*;
pub use input::*;
pub use render::*;
pub use selection::*;
pub use session::*;
pub use timer::*;
pub use types::*;

mod board;
mod error;
mod history;
mod input;
mod render;
mod selection;
mod session;
mod timer;
mod types;
