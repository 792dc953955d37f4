pub mod enums;
mod match_record;
mod profile;
mod user;

pub use enums::*;
pub use match_record::*;
pub use profile::*;
pub use user::*;
