pub use self::{arguments::*, detach::*};

mod arguments;
mod detach;
