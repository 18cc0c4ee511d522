use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use rand::Rng;

use crate::config::Settings;
use crate::discord::Channel;
use crate::export::export_book;
use crate::index::BookIndex;
use crate::selection::{select_random_book, select_random_highlights};

pub struct AppState {
    pub index: BookIndex,
    pub settings: Settings,
}

impl AppState {
    pub fn new(index: BookIndex, settings: Settings) -> Self {
        Self { index, settings }
    }

    /// Titles of every book the user asked to leave out. References that do
    /// not match a book are reported and dropped.
    pub fn ignored_titles(&self) -> HashSet<String> {
        self.settings
            .ignored_books
            .iter()
            .filter_map(|book_ref| match self.index.resolve(book_ref) {
                Some(book) => Some(book.title.clone()),
                None => {
                    tracing::warn!(book = %book_ref, "ignored book not found");
                    None
                }
            })
            .collect()
    }
}

fn not_found(out: &mut impl Write, book_ref: &str) -> Result<()> {
    writeln!(out, "No highlights found for {}", book_ref)?;
    Ok(())
}

pub fn list_books(state: &AppState, out: &mut impl Write) -> Result<()> {
    for (i, title) in state.index.titles().enumerate() {
        writeln!(out, "{}: {}", i + 1, title)?;
    }
    Ok(())
}

pub fn export(state: &AppState, book_ref: &str, export_dir: &Path, out: &mut impl Write) -> Result<()> {
    let Some(book) = state.index.resolve(book_ref) else {
        return not_found(out, book_ref);
    };

    let path = export_book(export_dir, &book.title, &book.highlights)?;
    writeln!(out, "Exported {}", path.display())?;
    Ok(())
}

pub fn print_random_highlight<R>(state: &AppState, rng: &mut R, out: &mut impl Write) -> Result<()>
where
    R: Rng + ?Sized,
{
    let book = select_random_book(&state.index, &state.ignored_titles(), rng)?;

    // Books only exist in the index once they hold a highlight.
    if let Some(highlight) = select_random_highlights(&book.highlights, 1, rng).first() {
        writeln!(out, "\"{}\"\n- {}", highlight.content, book.title)?;
    }
    Ok(())
}

pub fn send_to_channel<R, C>(state: &AppState, channel: &C, rng: &mut R, out: &mut impl Write) -> Result<()>
where
    R: Rng + ?Sized,
    C: Channel + ?Sized,
{
    let book = select_random_book(&state.index, &state.ignored_titles(), rng)?;
    let highlights = select_random_highlights(&book.highlights, state.settings.discord_count, rng);

    channel.deliver(&book.title, &highlights)?;
    writeln!(out, "Sent {} highlights from {}", highlights.len(), book.title)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cli, Config};
    use crate::error::{DeliveryError, SelectionError};
    use crate::model::Highlight;
    use clap::Parser;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;

    const CLIPPINGS: &str = "A\nLoc 1\n\nalpha\n==========\nB\nLoc 2\n\nbeta\n==========\nC\nLoc 3\n\ngamma\n==========\nB\nLoc 4\n\nbeta two\n==========\n";

    fn state(args: &[&str]) -> AppState {
        let cli = Cli::parse_from(args);
        AppState::new(BookIndex::from_text(CLIPPINGS), Settings::resolve(&cli, Config::default()))
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[derive(Default)]
    struct RecordingChannel {
        sent: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl Channel for RecordingChannel {
        fn deliver(&self, title: &str, highlights: &[&Highlight]) -> Result<(), DeliveryError> {
            self.sent.borrow_mut().push((
                title.to_string(),
                highlights.iter().map(|h| h.content.clone()).collect(),
            ));
            Ok(())
        }
    }

    struct FailingChannel;

    impl Channel for FailingChannel {
        fn deliver(&self, _title: &str, _highlights: &[&Highlight]) -> Result<(), DeliveryError> {
            Err(DeliveryError::Status(401, "401: Unauthorized".to_string()))
        }
    }

    #[test]
    fn test_list_books() {
        let state = state(&["readunwise", "list"]);
        assert_eq!(output(|out| list_books(&state, out)), "1: A\n2: B\n3: C\n");
    }

    #[test]
    fn test_export_unknown_book() {
        let state = state(&["readunwise", "list"]);
        let dir = Path::new("never-created");
        assert_eq!(
            output(|out| export(&state, "Missing", dir, out)),
            "No highlights found for Missing\n"
        );
        assert_eq!(output(|out| export(&state, "9", dir, out)), "No highlights found for 9\n");
        assert!(!dir.exists());
    }

    #[test]
    fn test_random_highlight_format() {
        let state = state(&["readunwise", "random", "-i", "1", "C"]);
        let mut rng = StdRng::seed_from_u64(7);
        let printed = output(|out| print_random_highlight(&state, &mut rng, out));
        assert!(
            printed == "\"beta\"\n- B\n" || printed == "\"beta two\"\n- B\n",
            "unexpected output: {printed:?}"
        );
    }

    #[test]
    fn test_random_all_ignored() {
        let state = state(&["readunwise", "random", "-i", "1", "2", "3"]);
        let mut rng = StdRng::seed_from_u64(7);
        let err = print_random_highlight(&state, &mut rng, &mut Vec::new()).unwrap_err();
        assert_eq!(err.downcast_ref::<SelectionError>(), Some(&SelectionError::NothingToSelect));
    }

    #[test]
    fn test_ignored_titles_skip_unknown_refs() {
        let state = state(&["readunwise", "random", "-i", "2", "Nope", "0"]);
        let ignored = state.ignored_titles();
        assert_eq!(ignored, HashSet::from(["B".to_string()]));
    }

    #[test]
    fn test_send_to_channel() {
        let state = state(&["readunwise", "discord", "42", "-n", "5", "-i", "A", "C"]);
        let channel = RecordingChannel::default();
        let mut rng = StdRng::seed_from_u64(1);

        let printed = output(|out| send_to_channel(&state, &channel, &mut rng, out));
        assert_eq!(printed, "Sent 2 highlights from B\n");

        let sent = channel.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "B");
        let mut contents = sent[0].1.clone();
        contents.sort();
        assert_eq!(contents, vec!["beta", "beta two"]);
    }

    #[test]
    fn test_send_to_channel_failure_is_reported() {
        let state = state(&["readunwise", "discord", "42"]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = send_to_channel(&state, &FailingChannel, &mut rng, &mut Vec::new()).unwrap_err();
        assert!(err.downcast_ref::<DeliveryError>().is_some());
    }
}
