// world/ - Container geometry queries
//
// Pure functions over the container walls and particle positions.
// No simulation state is owned here.

mod bounds;
mod proximity;

pub use bounds::*;
pub use proximity::*;
