use serde::{Serialize, Deserialize};
use crate::models::Poll;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionResult {
    pub option_id: String,
    pub text: String,
    pub votes: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResults {
    pub poll_id: String,
    pub question: String,
    pub total_votes: u64,
    pub options: Vec<OptionResult>,
    pub leaders: Vec<String>,
}

impl PollResults {
    pub fn from_poll(poll: &Poll) -> Self {
        let total_votes = poll.total_votes();

        let options = poll.options.iter()
            .map(|opt| OptionResult {
                option_id: opt.id.clone(),
                text: opt.text.clone(),
                votes: opt.votes,
                percentage: percentage(opt.votes, total_votes),
            })
            .collect();

        Self {
            poll_id: poll.id.clone(),
            question: poll.question.clone(),
            total_votes,
            options,
            leaders: leaders(poll),
        }
    }
}

fn percentage(votes: u32, total: u64) -> f64 {
    if total == 0 { return 0.0; }
    f64::from(votes) / total as f64 * 100.0
}

fn leaders(poll: &Poll) -> Vec<String> {
    let Some(max) = poll.options.iter().map(|opt| opt.votes).max() else { return Vec::new() };
    if max == 0 { return Vec::new(); }

    poll.options.iter()
        .filter(|opt| opt.votes == max)
        .map(|opt| opt.id.clone())
        .collect()
}
