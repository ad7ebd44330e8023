mod context;

pub use context::*;
