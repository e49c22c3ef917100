//! Sample candidates loaded at start-up.

use chrono::Utc;

use super::types::Candidate;

const SAMPLES: [(&str, &str, &str, &str); 6] = [
    (
        "Sarah Johnson",
        "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400&h=400&fit=crop&crop=face",
        "Progressive Democrats",
        "Sarah Johnson is a dedicated public servant with over 15 years of experience in local government. She focuses on education reform, healthcare accessibility, and environmental protection.",
    ),
    (
        "Michael Chen",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face",
        "Conservative Alliance",
        "Michael Chen brings a business perspective to politics, having served as CEO of a successful technology company. He advocates for fiscal responsibility, deregulation, and strong national security.",
    ),
    (
        "Maria Rodriguez",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop&crop=face",
        "Green Future Party",
        "Maria Rodriguez is an environmental scientist and activist who has dedicated her career to fighting climate change. She promotes renewable energy, sustainable development, and social justice.",
    ),
    (
        "David Thompson",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop&crop=face",
        "Independent Coalition",
        "David Thompson is a retired military officer who believes in bipartisan solutions to complex problems. He emphasizes national unity, infrastructure development, and support for veterans.",
    ),
    (
        "Lisa Park",
        "https://images.unsplash.com/photo-1544005313-94ddf0286df2?w=400&h=400&fit=crop&crop=face",
        "Liberal Reform Party",
        "Lisa Park is a civil rights attorney who has fought for equality and justice throughout her career. She champions criminal justice reform, voting rights, and economic opportunity for all.",
    ),
    (
        "Robert Williams",
        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&fit=crop&crop=face",
        "Traditional Values Party",
        "Robert Williams is a community leader and small business owner who values traditional American principles. He focuses on family values, religious freedom, and local control of government.",
    ),
];

/// Build the six sample candidates, ids 1 through 6.
pub fn sample_candidates() -> Vec<Candidate> {
    let now = Utc::now();

    SAMPLES
        .iter()
        .zip(1..)
        .map(|(&(name, image, party, description), id)| Candidate {
            id,
            name: name.to_string(),
            image: image.to_string(),
            political_party: party.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: None,
        })
        .collect()
}
