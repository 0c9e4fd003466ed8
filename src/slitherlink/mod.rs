mod board;
mod engine;
mod error;
mod identity;
mod io;
mod pattern;
mod render;
mod resolver;
pub mod rules;
mod vertex;
mod worklist;

pub use self::board::*;
pub use self::engine::{Engine, SolverConfig, Summary};
pub use self::error::*;
pub use self::io::*;
pub use self::pattern::*;
pub use self::render::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clue(pub i32);
pub const NO_CLUE: Clue = Clue(-1);
