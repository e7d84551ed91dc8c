mod ability;
mod availability;
mod invitation;
mod user;

pub use ability::*;
pub use availability::*;
pub use invitation::*;
pub use user::*;
