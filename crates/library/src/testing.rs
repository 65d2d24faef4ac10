//! Shared fixtures for the library's unit tests.

use crate::context::Context;
use crate::prompt::Confirm;
use std::collections::VecDeque;
use std::sync::Arc;
use wallman_storage::BackendHandle;
use wallman_storage::backend::MockBackend;

/// A mock backend holding `paths`, each with the same placeholder content.
pub(crate) fn mock<const N: usize>(name: &str, paths: [&str; N]) -> MockBackend {
    MockBackend::with_files(paths.map(|path| (path, b"image".to_vec()))).with_name(name)
}

/// One mock backend per root, plus a context wired to all of them.
pub(crate) struct Fixture {
    pub wallpapers: Arc<MockBackend>,
    pub originals: Arc<MockBackend>,
    pub staging: Arc<MockBackend>,
    pub trash: Arc<MockBackend>,
    pub merge: Arc<MockBackend>,
    pub ctx: Context,
}
impl Fixture {
    pub fn new(wallpapers: MockBackend, originals: MockBackend, staging: MockBackend) -> Self {
        Self::with_merge(wallpapers, originals, staging, mock("merge", []))
    }

    pub fn with_merge(wallpapers: MockBackend, originals: MockBackend, staging: MockBackend, merge: MockBackend) -> Self {
        let wallpapers = Arc::new(wallpapers);
        let originals = Arc::new(originals);
        let staging = Arc::new(staging);
        let trash = Arc::new(mock("trash", []));
        let merge = Arc::new(merge);
        let ctx = Context::new(
            wallpapers.clone() as BackendHandle,
            originals.clone() as BackendHandle,
            staging.clone() as BackendHandle,
        )
        .with_trash(trash.clone() as BackendHandle)
        .with_merge(merge.clone() as BackendHandle);
        Self { wallpapers, originals, staging, trash, merge, ctx }
    }
}

/// Scripted answers to confirmation questions. Once the script runs out,
/// every further question gets `fallback`.
pub(crate) struct Answers {
    script: VecDeque<bool>,
    fallback: bool,
    pub questions: Vec<String>,
}
impl Answers {
    pub fn always(answer: bool) -> Self {
        Self { script: VecDeque::new(), fallback: answer, questions: Vec::new() }
    }

    pub fn script(answers: impl IntoIterator<Item = bool>) -> Self {
        Self { script: answers.into_iter().collect(), fallback: false, questions: Vec::new() }
    }
}
impl Confirm for Answers {
    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
