pub mod abilities;
pub mod invitations;
pub mod matches;
pub mod registrations;
