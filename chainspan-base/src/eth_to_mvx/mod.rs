pub use self::{arguments::*, attach::*};

mod arguments;
mod attach;
