//! Internship matching: fit scoring against a skill profile and the
//! persisted liked/passed deck.

pub mod deck;
pub mod fit;

pub use deck::{InternshipDeck, Swipe, DECK_KEY, LAST_DOMAIN_KEY};
pub use fit::{rank_internships, RankedInternship, SkillProfile};
