pub mod lesson;
pub mod recurrence;

pub use lesson::*;
pub use recurrence::*;
