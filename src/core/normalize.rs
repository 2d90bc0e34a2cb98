use crate::domain::model::LookupRequest;
use crate::utils::error::{LookupError, Result};

/// Bang name some callers prepend to the argument.
pub const CALL_TOKEN: &str = "Execute";

pub fn strip_call_token(text: &str) -> String {
    text.replace(CALL_TOKEN, "").trim().to_string()
}

pub fn normalize(raw_args: &str) -> Result<LookupRequest> {
    let raw_input = strip_call_token(raw_args);
    if raw_input.is_empty() {
        return Err(LookupError::EmptyRequest);
    }
    Ok(LookupRequest { raw_input })
}
