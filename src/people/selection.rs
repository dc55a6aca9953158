//! Parsing the user's member selection.
//!
//! Grammar: comma-separated tokens, each one of
//! - `#<id>`: a raw account id, resolved by profile lookup
//! - `<min>..<max>`: an inclusive range of 1-based roster positions
//! - `<n>`: a single 1-based roster position
//!
//! Positions outside `1..=roster_size` are dropped silently. A token that is
//! not a number where one is expected rejects the whole input.

use tracing::debug;

use super::Member;
use crate::error::{ResolveError, SelectionError};
use crate::site::{Endpoints, Site};

/// One selected member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based roster position.
    Index(usize),
    /// Account id not necessarily present in the roster.
    RawId(String),
}

impl Selection {
    /// Turn this selection into a member, looking up raw ids on the site.
    pub async fn resolve<S: Site>(
        &self,
        roster: &[Member],
        site: &S,
        endpoints: &Endpoints,
    ) -> Result<Member, ResolveError> {
        match self {
            Self::Index(index) => {
                roster
                    .get(*index)
                    .cloned()
                    .ok_or(ResolveError::IndexOutOfRange {
                        index: *index,
                        len: roster.len(),
                    })
            }
            Self::RawId(id) => super::resolve_raw_id(site, endpoints, id).await,
        }
    }
}

fn parse_number(token: &str) -> Result<i64, SelectionError> {
    token
        .trim()
        .parse()
        .map_err(|_| SelectionError::MalformedNumber {
            token: token.trim().to_string(),
        })
}

/// Push `Index(i - 1)` for every `i` in `min..=max` that is a valid position.
fn push_positions(out: &mut Vec<Selection>, min: i64, max: i64, roster_size: usize) {
    let lo = min.max(1);
    let hi = max.min(roster_size as i64);
    out.extend((lo..=hi).map(|i| Selection::Index((i - 1) as usize)));
}

pub fn parse_selection(input: &str, roster_size: usize) -> Result<Vec<Selection>, SelectionError> {
    let mut out = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some(id) = part.strip_prefix('#') {
            let id = id.trim();
            if id.is_empty() {
                return Err(SelectionError::EmptyId);
            }
            out.push(Selection::RawId(id.to_string()));
        } else if part.contains("..") {
            let bounds: Vec<&str> = part.split("..").collect();
            let [min, max] = bounds.as_slice() else {
                return Err(SelectionError::MalformedRange {
                    token: part.to_string(),
                });
            };
            push_positions(&mut out, parse_number(min)?, parse_number(max)?, roster_size);
        } else {
            let n = parse_number(part)?;
            push_positions(&mut out, n, n, roster_size);
        }
    }

    debug!(selected = out.len(), "parsed selection");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(selections: &[Selection]) -> Vec<usize> {
        selections
            .iter()
            .filter_map(|s| match s {
                Selection::Index(i) => Some(*i),
                Selection::RawId(_) => None,
            })
            .collect()
    }

    #[test]
    fn singles_and_ranges_become_zero_based() {
        let parsed = parse_selection("1,3,5..7", 10).unwrap();
        assert_eq!(indices(&parsed), vec![0, 2, 4, 5, 6]);
    }

    #[test]
    fn raw_id_ignores_roster_size() {
        let parsed = parse_selection("#99999", 0).unwrap();
        assert_eq!(parsed, vec![Selection::RawId("99999".into())]);
    }

    #[test]
    fn out_of_range_positions_are_dropped() {
        let parsed = parse_selection("0, 4, 11, -2..2, 9..40", 10).unwrap();
        assert_eq!(indices(&parsed), vec![3, 0, 1, 8, 9]);
        for index in indices(&parsed) {
            assert!(index < 10);
        }
    }

    #[test]
    fn mixed_input_keeps_order_and_duplicates() {
        let parsed = parse_selection(" 2 , #abc ,1..2\n", 5).unwrap();
        assert_eq!(
            parsed,
            vec![
                Selection::Index(1),
                Selection::RawId("abc".into()),
                Selection::Index(0),
                Selection::Index(1),
            ]
        );
    }

    #[test]
    fn empty_segments_are_skipped() {
        assert!(parse_selection("", 5).unwrap().is_empty());
        assert_eq!(parse_selection("1,,", 5).unwrap(), vec![Selection::Index(0)]);
    }

    #[test]
    fn inverted_range_selects_nothing() {
        assert!(parse_selection("7..3", 10).unwrap().is_empty());
    }

    #[test]
    fn malformed_tokens_reject_the_whole_input() {
        assert_eq!(
            parse_selection("1,two,3", 5),
            Err(SelectionError::MalformedNumber { token: "two".into() })
        );
        assert_eq!(
            parse_selection("1..x", 5),
            Err(SelectionError::MalformedNumber { token: "x".into() })
        );
        assert_eq!(
            parse_selection("1..2..3", 5),
            Err(SelectionError::MalformedRange { token: "1..2..3".into() })
        );
        assert_eq!(parse_selection("#", 5), Err(SelectionError::EmptyId));
    }
}
