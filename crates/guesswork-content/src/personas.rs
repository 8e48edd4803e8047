//! The fixed persona roster.

use guesswork_core::model::{Persona, PersonaStyle};

/// The two personas that take turns giving hints, in speaking order.
pub const PERSONAS: [Persona; 2] = [
    Persona {
        id: "b1",
        name: "DJ_GLITCH",
        style: PersonaStyle::Casual,
    },
    Persona {
        id: "b2",
        name: "DJ_BIT",
        style: PersonaStyle::Casual,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_ids_are_unique() {
        assert_ne!(PERSONAS[0].id, PERSONAS[1].id);
    }

    #[test]
    fn test_roster_speaks_casually() {
        assert!(PERSONAS.iter().all(|p| p.style == PersonaStyle::Casual));
    }
}
