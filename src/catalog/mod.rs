//! Concrete record schemas.
//!
//! Three domains exercise the engine: a space station record (field
//! constraints only), an alien contact log (conditional cross-field rules),
//! and a space mission with a nested crew list (collection-aggregate rules).

mod contact;
mod mission;
mod station;

pub use contact::{contact, ContactType};
pub use mission::{crew_member, mission, Rank};
pub use station::station;
