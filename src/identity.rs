// Synthetic passenger identity for exercising the sandbox API. Real callers
// inject their own [`Passenger`].

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bruno", "Carla", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
    "Karim", "Lena", "Marco", "Nadia", "Oscar", "Petra",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Bergstrom", "Castillo", "Dawson", "Eriksen", "Fontaine", "Guerrero", "Hoffmann",
    "Ivanova", "Jensen", "Kovacs", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
];

#[derive(Debug, Clone)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub country_code_name: String,
}

impl Passenger {
    /// Random throwaway identity with fixed US contact defaults.
    pub fn synthetic() -> Self {
        let mut rng = rand::thread_rng();
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Taylor");
        let email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            rng.gen_range(100..1000)
        );

        Self {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email,
            phone_number: "(855) 980 5669".to_string(),
            country_code_name: "US".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_identity_is_complete() {
        let passenger = Passenger::synthetic();
        assert!(!passenger.first_name.is_empty());
        assert!(!passenger.last_name.is_empty());
        assert!(passenger.email.ends_with("@example.com"));
        assert_eq!(passenger.country_code_name, "US");
    }
}
