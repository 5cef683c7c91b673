mod coremod;
mod info;

pub use coremod::*;
pub use info::*;
