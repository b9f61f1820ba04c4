pub mod invitations;
pub mod notifications;
pub mod rsvp;
