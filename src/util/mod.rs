mod body;
mod contacts;
mod side;
mod timers;

pub use body::*;
pub use contacts::*;
pub use side::*;
pub use timers::*;
