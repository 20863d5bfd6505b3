use serde::{Serialize, Deserialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::validation::{validate_option, PollDraft};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
}

impl User {
    /// Every sign-in gets a fresh identity; usernames are not looked up.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub created_by: String,
    pub voted_by: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub version: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub option_id: String,
    pub user_id: String,
}

impl Poll {
    pub fn from_draft(draft: PollDraft, created_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            question: draft.question,
            options: draft.options.into_iter()
                .map(|text| PollOption {
                    id: Uuid::new_v4().to_string(),
                    text,
                    votes: 0,
                })
                .collect(),
            created_by: created_by.into(),
            voted_by: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
            version: 0,
        }
    }

    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|opt| u64::from(opt.votes)).sum()
    }

    pub fn has_voted(&self, user_id: &str) -> bool {
        self.voted_by.iter().any(|id| id == user_id)
    }

    pub fn option_index(&self, option_id: &str) -> Option<usize> {
        self.options.iter().position(|opt| opt.id == option_id)
    }

    /// Votes with no matching `voted_by` entry. Zero for created polls;
    /// seeded polls carry their initial counts here and it never moves.
    pub fn unattributed_votes(&self) -> i64 {
        self.total_votes() as i64 - self.voted_by.len() as i64
    }

    /// Records one vote. Membership is checked before the option so a
    /// repeat voter naming a bogus option still gets "already voted".
    pub fn cast_vote(&mut self, option_id: &str, user_id: &str) -> Result<()> {
        if self.has_voted(user_id) {
            return Err(Error::conflict("already voted"));
        }
        let idx = validate_option(self, option_id)?;
        let votes = self.options[idx].votes.checked_add(1).ok_or_else(|| {
            Error::storage("vote count overflow", format!("option {option_id} is at its maximum count"))
        })?;

        self.options[idx].votes = votes;
        self.voted_by.push(user_id.to_string());
        self.version += 1;
        Ok(())
    }
}
