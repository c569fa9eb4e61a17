//! Name, company and email generation from fixed pools.
//!
//! All generation is seeded (same stream state = same identity).

use crate::rng::StreamRng;

/// A drawn identity: first/last name plus employer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub company: &'static str,
}

impl Identity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `first.last@companywithoutspaces.com`, all lowercase.
    pub fn email(&self) -> String {
        let domain: String = self
            .company
            .to_lowercase()
            .split_whitespace()
            .collect();
        format!(
            "{}.{}@{}.com",
            self.first_name.to_lowercase(),
            self.last_name.to_lowercase(),
            domain
        )
    }
}

/// Draws identities from the curated pools.
pub struct NameGenerator;

impl NameGenerator {
    /// Draw first name, last name and company, in that order.
    pub fn generate_identity(rng: &mut StreamRng) -> Identity {
        let first_name = *rng.pick(FIRST_NAMES);
        let last_name = *rng.pick(LAST_NAMES);
        let company = *rng.pick(COMPANIES);
        Identity {
            first_name,
            last_name,
            company,
        }
    }
}

pub const FIRST_NAMES: &[&str] = &[
    "Alex", "Morgan", "Jordan", "Taylor", "Casey", "Riley", "Avery", "Quinn",
    "Cameron", "Blake", "Sage", "River", "Phoenix", "Emery", "Reese", "Drew",
    "Jamie", "Skyler", "Rowan", "Finley",
];

pub const LAST_NAMES: &[&str] = &[
    "Chen", "Johnson", "Williams", "Brown", "Davis", "Miller", "Wilson", "Moore",
    "Taylor", "Anderson", "Thomas", "Jackson", "White", "Harris", "Martin", "Garcia",
    "Martinez", "Robinson", "Clark", "Rodriguez",
];

pub const COMPANIES: &[&str] = &[
    "TechFlow Solutions", "DataStream Inc", "CloudVerse Corp", "InnovateLab",
    "DigitalForge", "ScaleWorks", "FlowState Technologies", "NextGen Systems",
    "PulseTech", "VelocityCore", "QuantumLeap Co", "ByteCraft Solutions",
    "AppSphere", "CodeWave Industries", "SmartGrid Technologies", "FusionPoint",
    "DevStorm", "TechNova", "DataPulse", "CloudSync Solutions",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn identity_generation_is_deterministic() {
        let mut rng1 = RngBank::new(12345).for_stream(StreamSlot::Population);
        let mut rng2 = RngBank::new(12345).for_stream(StreamSlot::Population);

        let a = NameGenerator::generate_identity(&mut rng1);
        let b = NameGenerator::generate_identity(&mut rng2);

        assert_eq!(a, b, "Same seed should produce same identity");
    }

    #[test]
    fn generates_names_from_pools() {
        let mut rng = RngBank::new(12345).for_stream(StreamSlot::Population);

        for _ in 0..100 {
            let id = NameGenerator::generate_identity(&mut rng);
            let name = id.full_name();
            let parts: Vec<&str> = name.split_whitespace().collect();
            assert_eq!(parts.len(), 2, "Name should have exactly 2 parts: {}", name);
            assert!(FIRST_NAMES.contains(&parts[0]));
            assert!(LAST_NAMES.contains(&parts[1]));
            assert!(COMPANIES.contains(&id.company));
        }
    }

    #[test]
    fn email_strips_company_whitespace() {
        let id = Identity {
            first_name: "Alex",
            last_name: "Chen",
            company: "TechFlow Solutions",
        };
        assert_eq!(id.email(), "alex.chen@techflowsolutions.com");
    }

    #[test]
    fn pools_have_twenty_entries() {
        assert_eq!(FIRST_NAMES.len(), 20);
        assert_eq!(LAST_NAMES.len(), 20);
        assert_eq!(COMPANIES.len(), 20);
    }
}
