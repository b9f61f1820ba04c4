pub mod invitations;
pub mod rsvp;
