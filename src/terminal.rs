//! Yes/no questions on the terminal.

use std::io::{self, BufRead, Write};

/// Interpret one line of input. `None` means "ask again".
fn answer(line: &str) -> Option<bool> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask on stderr (stdout carries the reports) until the user answers. End of
/// input counts as "no".
pub fn ask(question: &str) -> bool {
    let mut stdin = io::stdin().lock();
    let mut stderr = io::stderr();
    loop {
        let _ = write!(stderr, "{question} [y/n] ");
        let _ = stderr.flush();
        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) => {
                if let Some(answer) = answer(&line) {
                    return answer;
                }
            },
        }
    }
}
