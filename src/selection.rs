use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use crate::error::SelectionError;
use crate::index::{Book, BookIndex};
use crate::model::Highlight;

/// Pick a book uniformly at random, skipping any whose title is in `excluded`.
pub fn select_random_book<'a, R>(
    index: &'a BookIndex,
    excluded: &HashSet<String>,
    rng: &mut R,
) -> Result<&'a Book, SelectionError>
where
    R: Rng + ?Sized,
{
    index
        .books()
        .iter()
        .filter(|book| !excluded.contains(&book.title))
        .choose(rng)
        .ok_or(SelectionError::NothingToSelect)
}

/// Sample up to `n` distinct highlights without replacement.
pub fn select_random_highlights<'a, R>(
    highlights: &'a [Highlight],
    n: usize,
    rng: &mut R,
) -> Vec<&'a Highlight>
where
    R: Rng + ?Sized,
{
    highlights.choose_multiple(rng, n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn index() -> BookIndex {
        BookIndex::from_text(
            "A\nLoc\n\none\n==========\nB\nLoc\n\ntwo\n==========\nC\nLoc\n\nthree\n==========\n",
        )
    }

    #[test]
    fn test_random_book_respects_exclusions() {
        let index = index();
        let excluded: HashSet<String> = ["A".to_string(), "C".to_string()].into();
        let mut rng = seeded_rng();
        for _ in 0..20 {
            let book = select_random_book(&index, &excluded, &mut rng).unwrap();
            assert_eq!(book.title, "B");
        }
    }

    #[test]
    fn test_random_book_reaches_every_book() {
        let index = index();
        let mut rng = seeded_rng();
        let seen: HashSet<String> = (0..200)
            .map(|_| select_random_book(&index, &HashSet::new(), &mut rng).unwrap().title.clone())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_random_book_all_excluded() {
        let index = index();
        let excluded: HashSet<String> = index.titles().map(String::from).collect();
        assert_eq!(
            select_random_book(&index, &excluded, &mut seeded_rng()).unwrap_err(),
            SelectionError::NothingToSelect
        );
    }

    #[test]
    fn test_random_book_empty_index() {
        let index = BookIndex::from_text("");
        assert!(select_random_book(&index, &HashSet::new(), &mut seeded_rng()).is_err());
    }

    #[test]
    fn test_random_highlights_are_distinct() {
        let text: String = (0..10)
            .map(|i| format!("A\nLoc\n\nhighlight number {}\n==========\n", i * 7))
            .collect();
        let index = BookIndex::from_text(&text);
        let highlights = &index.get("A").unwrap().highlights;
        assert_eq!(highlights.len(), 10);

        let mut rng = seeded_rng();
        for n in [0, 1, 3, 10, 25] {
            let picked = select_random_highlights(highlights, n, &mut rng);
            assert_eq!(picked.len(), n.min(highlights.len()));
            let unique: HashSet<&str> = picked.iter().map(|h| h.content.as_str()).collect();
            assert_eq!(unique.len(), picked.len());
        }
    }
}
