/*!
 * Tests for pagination and page navigation
 */

use rand::Rng;
use tikkun::text::document::Tradition;
use tikkun::text::pagination::{PageState, PageUnit, Paginator};
use tikkun::text::tokenizer::{Token, Tokenizer};

use crate::common;

fn random_stream(rng: &mut impl Rng, len: usize) -> Vec<Token> {
    (0..len)
        .map(|i| {
            match rng.random_range(0..10) {
                0..=4 => Token::word(&format!("w{}", i), "h", None),
                5 => Token::GroupBoundary {
                    label: "שני".to_string(),
                    sublabel: format!("g{}", i),
                },
                _ => Token::whitespace(" "),
            }
        })
        .collect()
}

/// Test the documented example of three pages
#[test]
fn test_paginate_documentedExample_shouldSplitIntoThreePages() {
    let tokens = vec![
        Token::word("א", "א", None),
        Token::whitespace(" "),
        Token::word("ב", "ב", None),
        Token::whitespace(" "),
        Token::word("ג", "ג", None),
    ];

    let pages = Paginator::new(2, PageUnit::Tokens).paginate(&tokens);
    let texts: Vec<Vec<&str>> = pages
        .iter()
        .map(|page| page.tokens.iter().map(Token::text).collect())
        .collect();

    assert_eq!(texts, vec![vec!["א", " "], vec!["ב", " "], vec!["ג"]]);
}

/// Test that pages concatenate back to the stream and their count matches ceil(N / size)
#[test]
fn test_paginate_randomStreams_shouldPartitionExactly() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let len = rng.random_range(0..200);
        let size = rng.random_range(1..30);
        let tokens = random_stream(&mut rng, len);
        let paginator = Paginator::new(size, PageUnit::Tokens);

        let pages = paginator.paginate(&tokens);
        let rebuilt: Vec<Token> = pages.iter().flat_map(|p| p.tokens.clone()).collect();

        assert_eq!(rebuilt, tokens);
        assert_eq!(pages.len(), len.div_ceil(size).max(1));
        assert_eq!(paginator.page_count(&tokens), pages.len());
        assert!(pages.iter().all(|p| p.len() <= size));
        for (index, page) in pages.iter().enumerate() {
            assert_eq!(page.index, index);
        }
    }
}

/// Test that word-based pages also partition the stream and respect the word budget
#[test]
fn test_paginate_byWords_randomStreams_shouldRespectWordBudget() {
    let mut rng = rand::rng();

    for _ in 0..100 {
        let len = rng.random_range(0..200);
        let size = rng.random_range(1..20);
        let tokens = random_stream(&mut rng, len);
        let paginator = Paginator::new(size, PageUnit::Words);

        let pages = paginator.paginate(&tokens);
        let rebuilt: Vec<Token> = pages.iter().flat_map(|p| p.tokens.clone()).collect();
        let words = tokens.iter().filter(|t| t.is_word()).count();

        assert_eq!(rebuilt, tokens);
        assert_eq!(pages.len(), words.div_ceil(size).max(1));
        assert!(pages.iter().all(|p| p.word_count() <= size));

        // a group marker is never stranded at the end of a page before its words
        for page in &pages[..pages.len() - 1] {
            if let Some(marker) = page
                .tokens
                .iter()
                .rposition(|t| matches!(t, Token::GroupBoundary { .. }))
            {
                assert!(page.tokens[marker..].iter().any(Token::is_word));
            }
        }
    }
}

/// Test that random navigation never leaves the valid range
#[test]
fn test_pageState_randomNavigation_shouldStayInBounds() {
    let mut rng = rand::rng();

    for _ in 0..50 {
        let total = rng.random_range(0..15);
        let mut state = PageState::new(total);

        for _ in 0..100 {
            state = match rng.random_range(0..4) {
                0 => state.next(),
                1 => state.previous(),
                2 => state.go_to(rng.random_range(0..40)),
                _ => state.clamp_to_valid_range(rng.random_range(0..15)),
            };
            assert!(state.index() < state.total());
            assert!(state.total() >= 1);
        }
    }
}

/// Test paginating a tokenized document with group markers
#[test]
fn test_paginate_tokenizedDocument_shouldKeepMarkersInStream() {
    let doc = common::sample_document();
    let tokens = Tokenizer::tokenize(&doc.groups, Tradition::Standard, true);

    let pages = Paginator::new(10, PageUnit::Tokens).paginate(&tokens);

    // 3 groups: marker + 2 verses of 3 tokens each
    assert_eq!(tokens.len(), 21);
    assert_eq!(pages.len(), 3);
    assert!(matches!(pages[0].tokens[0], Token::GroupBoundary { .. }));
    assert_eq!(pages[2].len(), 1);
}
