//! Deterministic names for synthetic stores, buyers and basket items.
//!
//! All generation is deterministic (same RNG seed = same names).

use crate::rng::FixtureRng;

pub struct NameGenerator;

impl NameGenerator {
    /// Buyer name as the ledger shows it: first name plus initial, e.g. "Karim B.".
    pub fn generate_buyer_name(rng: &mut FixtureRng) -> String {
        let first = rng.pick(Self::first_names());
        let last = rng.pick(Self::last_names());
        let initial = last.chars().next().unwrap_or('X');
        format!("{first} {initial}.")
    }

    /// Store name, either "<City> <Trade>" or "<Trade> <City>".
    pub fn generate_store_name(rng: &mut FixtureRng, city: &str) -> String {
        let trade = rng.pick(Self::trades());
        if rng.chance(0.5) {
            format!("{city} {trade}")
        } else {
            format!("{trade} {city}")
        }
    }

    /// One to three basket items.
    pub fn generate_items(rng: &mut FixtureRng) -> Vec<String> {
        let count = 1 + rng.next_u64_below(3) as usize;
        (0..count)
            .map(|_| rng.pick(Self::items()).to_string())
            .collect()
    }

    /// Lower-case, alphanumeric contact address derived from a store name.
    pub fn contact_email(store_name: &str) -> String {
        let handle: String = store_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        format!("contact@{handle}.dz")
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "Karim", "Fatima", "Ahmed", "Leila", "Yanis", "Amina", "Sofiane", "Nadia",
            "Walid", "Samira", "Riad", "Meriem", "Hamza", "Lina", "Bilal", "Sarah",
            "Mehdi", "Imane", "Anis", "Yasmine",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Benali", "Zerrouki", "Khelifi", "Mansouri", "Saadi", "Boudiaf", "Hamidi",
            "Cherif", "Djebbar", "Larbi", "Amrani", "Toumi", "Ferhat", "Ouali",
        ]
    }

    fn trades() -> &'static [&'static str] {
        &[
            "Auto Parts", "Car Services", "Wheels", "Auto Fix", "Auto Gear", "Motors",
            "Garage", "Tyres", "Car Care", "Spare Parts",
        ]
    }

    fn items() -> &'static [&'static str] {
        &[
            "Spark Plugs", "Oil Filter", "Brake Pads", "Tire Set", "Full Car Wash",
            "Air Filter", "Battery", "Wiper Blades", "Headlight Bulb", "Timing Belt",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixtureSlot, RngBank};

    #[test]
    fn buyer_names_are_deterministic() {
        let mut rng1 = RngBank::new(12345).for_slot(FixtureSlot::Transactions);
        let mut rng2 = RngBank::new(12345).for_slot(FixtureSlot::Transactions);

        let name1 = NameGenerator::generate_buyer_name(&mut rng1);
        let name2 = NameGenerator::generate_buyer_name(&mut rng2);

        assert_eq!(name1, name2, "Same seed should produce same name");
    }

    #[test]
    fn buyer_names_have_first_name_and_initial() {
        let mut rng = RngBank::new(7).for_slot(FixtureSlot::Transactions);
        for _ in 0..50 {
            let name = NameGenerator::generate_buyer_name(&mut rng);
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Buyer name should have 2 parts: {name}");
            assert!(parts[1].ends_with('.'), "Second part should be an initial: {name}");
        }
    }

    #[test]
    fn store_names_contain_city() {
        let mut rng = RngBank::new(7).for_slot(FixtureSlot::Stores);
        for _ in 0..20 {
            let name = NameGenerator::generate_store_name(&mut rng, "Oran");
            assert!(name.contains("Oran"), "Store name should mention its city: {name}");
        }
    }

    #[test]
    fn contact_email_is_ascii_handle() {
        assert_eq!(
            NameGenerator::contact_email("Oran Car Services"),
            "contact@orancarservices.dz"
        );
    }
}
