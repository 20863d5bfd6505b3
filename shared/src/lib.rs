pub mod error;
pub mod models;
pub mod validation;
pub mod seed;
pub mod tally;

pub use error::{Error, ErrorCode, Result, ErrorResponse};
pub use models::*;
pub use validation::*;
pub use seed::seed_polls;
pub use tally::{PollResults, OptionResult};
