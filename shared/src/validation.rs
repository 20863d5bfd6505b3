use crate::models::Poll;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_OPTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,
    #[error("Question cannot be empty")]
    EmptyQuestion,
    #[error("At least {MIN_OPTIONS} non-empty options are required")]
    TooFewOptions,
    #[error("invalid option")]
    InvalidOption(String),
}

/// Poll input after trimming, ready to be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
}

pub fn validate_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    Ok(trimmed.to_string())
}

/// Trims every option and drops the ones left empty, keeping input order.
pub fn normalize_options<S: AsRef<str>>(options: &[S]) -> Vec<String> {
    options.iter()
        .map(|opt| opt.as_ref().trim())
        .filter(|opt| !opt.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_poll_input<S: AsRef<str>>(question: &str, options: &[S]) -> Result<PollDraft, ValidationError> {
    let question = question.trim();
    if question.is_empty() { return Err(ValidationError::EmptyQuestion); }

    let options = normalize_options(options);
    if options.len() < MIN_OPTIONS { return Err(ValidationError::TooFewOptions); }

    Ok(PollDraft {
        question: question.to_string(),
        options,
    })
}

pub fn validate_option(poll: &Poll, option_id: &str) -> Result<usize, ValidationError> {
    poll.option_index(option_id)
        .ok_or_else(|| ValidationError::InvalidOption(option_id.to_string()))
}
