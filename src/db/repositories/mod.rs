mod ability_repository;
mod availability_repository;
mod invitation_repository;
mod user_repository;

pub use ability_repository::AbilityRepository;
pub use availability_repository::AvailabilityRepository;
pub use invitation_repository::InvitationRepository;
pub use user_repository::UserRepository;
