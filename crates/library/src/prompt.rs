//! The yes/no confirmation collaborator.

/// Asks the user a yes/no question and blocks until it's answered.
///
/// Any `FnMut(&str) -> bool` closure is a `Confirm`, which is how the command
/// line wires in its terminal prompt and how tests script answers.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}
