//! Board layout text.
//!
//! One grid row per non-empty line. An integer token is a cell of that
//! property; letters name path tiles:
//!
//! | token | tile       |
//! |-------|------------|
//! | `S`   | start      |
//! | `C`   | office     |
//! | `B`   | treasury   |
//! | `H`   | acquire    |
//! | `E`   | expand     |
//! | `F`   | decorative |

use super::{parse_error, tokens};
use crate::board::{Grid, PathKind, TileSpec};
use crate::core::ConfigError;
use crate::economy::PropertyId;

/// Parse a board layout into a grid.
///
/// ```
/// use rust_hotel::loader::parse_board;
///
/// let grid = parse_board("S,H,E\nC,1,B\nH,E,H\n").unwrap();
/// assert_eq!((grid.rows(), grid.cols()), (3, 3));
/// ```
pub fn parse_board(text: &str) -> Result<Grid, ConfigError> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let row = tokens(line)
            .map(|token| {
                parse_tile(token)
                    .ok_or_else(|| parse_error(index + 1, format!("unknown tile `{token}`")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Grid::new(rows)
}

fn parse_tile(token: &str) -> Option<TileSpec> {
    if let Ok(id) = token.parse::<u32>() {
        return Some(TileSpec::Property(PropertyId::new(id)));
    }
    let kind = match token {
        "S" => PathKind::Start,
        "C" => PathKind::Office,
        "B" => PathKind::Treasury,
        "H" => PathKind::Acquire,
        "E" => PathKind::Expand,
        "F" => PathKind::Decorative,
        _ => return None,
    };
    Some(TileSpec::Path(kind))
}
