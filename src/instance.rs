//! Plain-text set cover instances.
//!
//! The format is whitespace separated:
//!
//! ```text
//! <universe_size> <subset_count>
//! <cost> <elem> <elem> ...      (one line per subset)
//! ```
//!
//! Elements are 1-based integers no larger than `universe_size`. Blank
//! lines are ignored.

use crate::aco::ProblemModel;
use crate::error::{AcoError, Result};
use std::path::Path;
use std::str::FromStr;

/// A parsed instance, before validation into a [`ProblemModel`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetCoverInstance {
    pub universe_size: usize,
    pub subsets: Vec<Vec<usize>>,
    pub costs: Vec<f64>,
}

impl SetCoverInstance {
    /// Parses an instance from text.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_setcover::instance::SetCoverInstance;
    ///
    /// let instance = SetCoverInstance::parse("3 2\n1 1 2\n2 2 3\n").unwrap();
    /// assert_eq!(instance.universe_size, 3);
    /// assert_eq!(instance.subsets, vec![vec![1, 2], vec![2, 3]]);
    /// assert_eq!(instance.costs, vec![1.0, 2.0]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (header_line, header) = lines.next().ok_or(AcoError::Parse {
            line: 1,
            message: "missing header".into(),
        })?;
        let header: Vec<usize> = header
            .split_whitespace()
            .map(|tok| parse_token(tok, header_line))
            .collect::<Result<_>>()?;
        let [universe_size, subset_count] = header[..] else {
            return Err(AcoError::Parse {
                line: header_line,
                message: format!(
                    "expected `<universe_size> <subset_count>`, got {} values",
                    header.len()
                ),
            });
        };

        let mut subsets = Vec::with_capacity(subset_count);
        let mut costs = Vec::with_capacity(subset_count);
        for (line, content) in lines {
            let mut tokens = content.split_whitespace();
            let cost: f64 = match tokens.next() {
                Some(tok) => parse_token(tok, line)?,
                None => continue,
            };
            let elements = tokens
                .map(|tok| parse_token(tok, line))
                .collect::<Result<Vec<usize>>>()?;
            costs.push(cost);
            subsets.push(elements);
        }

        if subsets.len() != subset_count {
            return Err(AcoError::Parse {
                line: header_line,
                message: format!(
                    "header declares {subset_count} subsets, found {}",
                    subsets.len()
                ),
            });
        }

        Ok(Self {
            universe_size,
            subsets,
            costs,
        })
    }

    /// Reads and parses an instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Validates the instance into a problem model.
    pub fn into_model(self) -> Result<ProblemModel> {
        ProblemModel::new(self.universe_size, self.subsets, self.costs)
    }
}

fn parse_token<T: FromStr>(token: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| AcoError::Parse {
        line,
        message: format!("invalid number `{token}`"),
    })
}
