use std::str::FromStr;

use tracing::debug;

use crate::{
    alphabet::Alphabet,
    error::{Error, Result},
    graph::{GraphBuilder, TransitionGraph},
    word::Word,
};

/// A parsed problem instance: the transition graph together with the candidate words in the
/// order in which they were given.
///
/// The text consists of two sections separated by the first blank line. The first section is a
/// comma separated list of candidates, the second one contains rules `SOURCE > DEST,DEST,...`.
/// ```
/// use walkcount::prelude::*;
///
/// let puzzle: Puzzle = "ab,ba,aa\n\na > b\nb > a".parse().unwrap();
/// assert_eq!(puzzle.candidates.len(), 3);
/// assert_eq!(puzzle.graph.edge_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Puzzle {
    /// The graph built from the rules section.
    pub graph: TransitionGraph,
    /// The candidates, duplicates included.
    pub candidates: Vec<Word>,
}

impl Puzzle {
    /// Parses `text` over the default alphabet.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_alphabet(text, Alphabet::latin())
    }

    /// Parses `text`, resolving all symbols in `alphabet`.
    pub fn parse_with_alphabet(text: &str, alphabet: Alphabet) -> Result<Self> {
        let (candidates, rules) = split_sections(text)?;

        let graph = GraphBuilder::for_alphabet(alphabet)
            .with_rule_text(&rules)?
            .build()?;

        let candidates = candidates
            .split(',')
            .map(str::trim)
            .enumerate()
            .map(|(i, candidate)| {
                if candidate.is_empty() {
                    Err(Error::EmptyCandidate(i + 1))
                } else {
                    Word::parse(graph.alphabet(), candidate)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("parsed puzzle with {} candidates", candidates.len());
        Ok(Self { graph, candidates })
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Splits at the first line that is blank, ignoring blank lines before the candidates. The
/// candidates have to fit in a single line.
fn split_sections(text: &str) -> Result<(String, String)> {
    let mut lines = text
        .lines()
        .enumerate()
        .skip_while(|(_, line)| line.trim().is_empty());

    let candidates = match lines.next() {
        Some((_, line)) => line.trim().to_string(),
        None => return Err(Error::MissingSection("candidates")),
    };
    if let Some((number, _)) = lines.next().filter(|(_, line)| !line.trim().is_empty()) {
        return Err(Error::MultilineCandidates { line: number + 1 });
    }

    let rules = lines.map(|(_, line)| line).collect::<Vec<_>>().join("\n");
    if rules.trim().is_empty() {
        return Err(Error::MissingSection("rules"));
    }

    Ok((candidates, rules))
}
