use time::OffsetDateTime;
use crate::models::{Poll, PollOption};

pub const SEED_AUTHOR: &str = "system";

fn option(id: &str, text: &str, votes: u32) -> PollOption {
    PollOption { id: id.into(), text: text.into(), votes }
}

/// Example polls written when the poll collection does not exist yet.
pub fn seed_polls() -> Vec<Poll> {
    let now = OffsetDateTime::now_utc();
    vec![
        Poll {
            id: "poll-1".into(),
            question: "What's your favorite frontend framework?".into(),
            options: vec![
                option("opt-1-1", "React", 15),
                option("opt-1-2", "Vue", 8),
                option("opt-1-3", "Svelte", 12),
                option("opt-1-4", "Angular", 3),
            ],
            created_by: SEED_AUTHOR.into(),
            voted_by: Vec::new(),
            created_at: now,
            version: 0,
        },
        Poll {
            id: "poll-2".into(),
            question: "Which backend language do you prefer?".into(),
            options: vec![
                option("opt-2-1", "Rust", 18),
                option("opt-2-2", "Go", 11),
                option("opt-2-3", "Python", 14),
                option("opt-2-4", "TypeScript", 9),
            ],
            created_by: SEED_AUTHOR.into(),
            voted_by: Vec::new(),
            created_at: now,
            version: 0,
        },
    ]
}
