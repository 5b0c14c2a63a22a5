//! UI utilities for the client.

use std::io::Write;

/// Prompt shown before each input line
pub fn prompt(login: Option<&str>) -> String {
    format!("{}> ", login.unwrap_or("roomcast"))
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}
