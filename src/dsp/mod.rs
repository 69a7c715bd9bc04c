pub mod pulse;
pub mod sample_counter;
pub mod schmitt;

pub use pulse::*;
pub use sample_counter::*;
pub use schmitt::*;
