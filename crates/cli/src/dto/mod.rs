mod leg;

pub use leg::*;
