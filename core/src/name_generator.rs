//! Seeded roster identity generation using curated name lists.
//!
//! Used for CSRs beyond the explicitly configured roster.
//! Same seed = same names, handles, initials and colors.

use crate::rng::StreamRng;

/// Name, contact handle, initials and display color for one CSR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIdentity {
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub color: String,
}

pub struct NameGenerator;

impl NameGenerator {
    pub fn generate_identity(rng: &mut StreamRng) -> GeneratedIdentity {
        let first = Self::generate_first_name(rng);
        let last = Self::generate_last_name(rng);
        let color = rng.pick(Self::palette()).copied().unwrap_or("#64748b");
        GeneratedIdentity {
            name: format!("{first} {last}"),
            email: Self::email_for(first, last),
            avatar: Self::initials(first, last),
            color: color.to_string(),
        }
    }

    pub fn generate_first_name(rng: &mut StreamRng) -> &'static str {
        rng.pick(Self::first_names()).copied().unwrap_or("Alex")
    }

    pub fn generate_last_name(rng: &mut StreamRng) -> &'static str {
        rng.pick(Self::last_names()).copied().unwrap_or("Smith")
    }

    /// "Ana", "De Leon" → "ana.deleon@company.com"
    pub fn email_for(first: &str, last: &str) -> String {
        let handle: String = format!("{first}.{last}")
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        format!("{handle}@company.com")
    }

    /// First letter of each part, uppercased: "Ana", "Ruiz" → "AR".
    pub fn initials(first: &str, last: &str) -> String {
        [first, last]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    fn palette() -> &'static [&'static str] {
        &[
            "#10b981", "#3b82f6", "#8b5cf6", "#f59e0b", "#ef4444", "#6b7280",
            "#14b8a6", "#ec4899", "#84cc16", "#0ea5e9", "#a855f7", "#f97316",
        ]
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "Maria", "Robert", "Sofia", "Michael", "Laura", "David", "Carmen",
            "Daniel", "Paula", "Andrew", "Julia", "Samuel", "Irene", "Victor", "Sara",
            "Pablo", "Marta", "Hugo", "Nora", "Adrian", "Elena", "Oscar", "Lucia",
            "Martin", "Alba", "Ivan", "Clara", "Ruben", "Noelia", "Kevin", "Rachel",
            "Ethan", "Grace", "Nathan", "Olivia", "Aaron", "Hannah", "Lucas", "Emma",
        ]
    }

    fn last_names() -> &'static [&'static str] {
        &[
            "Smith", "Garcia", "Johnson", "Martinez", "Brown", "Lopez", "Davis", "Sanchez",
            "Miller", "Romero", "Wilson", "Navarro", "Moore", "Torres", "Taylor", "Dominguez",
            "Anderson", "Vazquez", "Thomas", "Ramos", "Jackson", "Gil", "White", "Serrano",
            "Harris", "Blanco", "Clark", "Molina", "Lewis", "Delgado", "Walker", "Castillo",
        ]
    }
}
