//! Snapshot notation encoding and decoding.
//!
//! A snapshot string carries one cycle's complete planner input on a single
//! line, in eight `/`-separated sections:
//!
//! `<turn>/<w>x<h>/<cells>/<home>/<aux>/<units>/<hostile>/<bank>`
//!
//! - cells: `h` rows joined by `;`, each `w` quantities joined by `,`
//! - home: `x.y`
//! - aux, hostile: comma-separated `x.y` entries, or `-`
//! - units: comma-separated `id@x.y:cargo` entries, or `-`
//!
//! Example: `12/5x1/5,5,100,5,5/2.0/-/1@0.0:40/-/3000`

use crate::board::{GameMap, Position, Snapshot, Unit};

/// Errors that can occur while parsing a snapshot string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected 8 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid turn number: '{0}'")]
    InvalidTurn(String),

    #[error("invalid dimensions: '{0}'")]
    InvalidDimensions(String),

    #[error("expected {expected} rows of cells, got {found}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    WrongRowLength { row: usize, expected: usize, found: usize },

    #[error("invalid cell quantity: '{0}'")]
    InvalidCell(String),

    #[error("invalid position: '{0}'")]
    InvalidPosition(String),

    #[error("position off the grid: '{0}'")]
    OffGrid(String),

    #[error("invalid unit entry: '{0}'")]
    InvalidUnitEntry(String),

    #[error("duplicate or overlapping unit: '{0}'")]
    DuplicateUnit(String),

    #[error("hostile on an occupied cell: '{0}'")]
    DuplicateHostile(String),

    #[error("invalid bank amount: '{0}'")]
    InvalidBank(String),
}

/// Parses `x.y` and checks it lies on the grid.
fn parse_position(s: &str, map: &GameMap) -> Result<Position, SnapshotError> {
    let (x, y) = s
        .split_once('.')
        .ok_or_else(|| SnapshotError::InvalidPosition(s.to_string()))?;
    let x: i32 = x.parse().map_err(|_| SnapshotError::InvalidPosition(s.to_string()))?;
    let y: i32 = y.parse().map_err(|_| SnapshotError::InvalidPosition(s.to_string()))?;
    let pos = Position::new(x, y);
    if !map.contains(pos) {
        return Err(SnapshotError::OffGrid(s.to_string()));
    }
    Ok(pos)
}

/// Largest grid, in cells, a snapshot may declare.
const MAX_GRID_CELLS: usize = 1 << 20;

/// Parses the `<w>x<h>` section. Each side must fit an `i32` and the grid
/// must hold at most `MAX_GRID_CELLS` cells.
fn parse_dimensions(s: &str) -> Result<(usize, usize), SnapshotError> {
    let invalid = || SnapshotError::InvalidDimensions(s.to_string());
    let (w, h) = s.split_once('x').ok_or_else(invalid)?;
    let w: i32 = w.parse().map_err(|_| invalid())?;
    let h: i32 = h.parse().map_err(|_| invalid())?;
    let w = usize::try_from(w).map_err(|_| invalid())?;
    let h = usize::try_from(h).map_err(|_| invalid())?;
    match w.checked_mul(h) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok((w, h)),
        _ => Err(invalid()),
    }
}

/// Parses the cells section into a grid of the declared size.
fn parse_cells(s: &str, width: usize, height: usize) -> Result<GameMap, SnapshotError> {
    let mut map = GameMap::new(width, height);
    if width == 0 || height == 0 {
        return Ok(map);
    }

    let rows: Vec<&str> = s.split(';').collect();
    if rows.len() != height {
        return Err(SnapshotError::WrongRowCount { expected: height, found: rows.len() });
    }

    for (y, row) in rows.iter().enumerate() {
        let values: Vec<&str> = row.split(',').collect();
        if values.len() != width {
            return Err(SnapshotError::WrongRowLength { row: y, expected: width, found: values.len() });
        }
        for (x, v) in values.iter().enumerate() {
            let halite: u32 = v.parse().map_err(|_| SnapshotError::InvalidCell(v.to_string()))?;
            map.set_halite(Position::new(x as i32, y as i32), halite);
        }
    }

    Ok(map)
}

/// Parses a comma-separated position list or `-`.
fn parse_position_list(s: &str, map: &GameMap) -> Result<Vec<Position>, SnapshotError> {
    if s == "-" {
        return Ok(Vec::new());
    }
    s.split(',').map(|entry| parse_position(entry, map)).collect()
}

/// Parses one `id@x.y:cargo` entry.
fn parse_unit(entry: &str, map: &GameMap) -> Result<Unit, SnapshotError> {
    let invalid = || SnapshotError::InvalidUnitEntry(entry.to_string());
    let (id, rest) = entry.split_once('@').ok_or_else(invalid)?;
    let (pos, cargo) = rest.split_once(':').ok_or_else(invalid)?;
    let id: u32 = id.parse().map_err(|_| invalid())?;
    let cargo: u32 = cargo.parse().map_err(|_| invalid())?;
    let position = parse_position(pos, map)?;
    Ok(Unit::new(id, position, cargo))
}

/// Parses a snapshot string.
pub fn parse_snapshot(s: &str) -> Result<Snapshot, SnapshotError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 8 {
        return Err(SnapshotError::WrongSectionCount(sections.len()));
    }

    let turn: u32 = sections[0]
        .parse()
        .map_err(|_| SnapshotError::InvalidTurn(sections[0].to_string()))?;
    let (width, height) = parse_dimensions(sections[1])?;
    let map = parse_cells(sections[2], width, height)?;
    let home = parse_position(sections[3], &map)?;
    let aux_bases = parse_position_list(sections[4], &map)?;

    let mut snapshot = Snapshot::new(turn, map, home);
    for base in aux_bases {
        snapshot.add_aux_base(base);
    }

    if sections[5] != "-" {
        for entry in sections[5].split(',') {
            let unit = parse_unit(entry, &snapshot.map)?;
            if !snapshot.place_unit(unit) {
                return Err(SnapshotError::DuplicateUnit(entry.to_string()));
            }
        }
    }

    for pos in parse_position_list(sections[6], &snapshot.map)? {
        if !snapshot.place_hostile(pos) {
            return Err(SnapshotError::DuplicateHostile(format!("{}.{}", pos.x, pos.y)));
        }
    }

    snapshot.bank = sections[7]
        .parse()
        .map_err(|_| SnapshotError::InvalidBank(sections[7].to_string()))?;

    Ok(snapshot)
}

fn encode_position(pos: Position) -> String {
    format!("{}.{}", pos.x, pos.y)
}

fn encode_position_list(positions: &[Position]) -> String {
    if positions.is_empty() {
        "-".to_string()
    } else {
        positions.iter().map(|&p| encode_position(p)).collect::<Vec<_>>().join(",")
    }
}

/// Encodes a snapshot into its single-line notation.
///
/// Units keep their snapshot order; hostiles are listed row by row.
pub fn encode_snapshot(snapshot: &Snapshot) -> String {
    let map = &snapshot.map;
    let mut result = String::with_capacity(map.width * map.height * 4 + 64);

    result.push_str(&format!("{}/{}x{}/", snapshot.turn, map.width, map.height));

    let rows: Vec<String> = (0..map.height)
        .map(|y| {
            (0..map.width)
                .map(|x| map.halite(Position::new(x as i32, y as i32)).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    result.push_str(&rows.join(";"));
    result.push('/');

    result.push_str(&encode_position(snapshot.home));
    result.push('/');
    result.push_str(&encode_position_list(&snapshot.aux_bases));
    result.push('/');

    if snapshot.units.is_empty() {
        result.push('-');
    } else {
        let units: Vec<String> = snapshot
            .units
            .iter()
            .map(|u| format!("{}@{}:{}", u.id, encode_position(u.position), u.cargo))
            .collect();
        result.push_str(&units.join(","));
    }
    result.push('/');

    result.push_str(&encode_position_list(&snapshot.hostiles()));
    result.push('/');
    result.push_str(&snapshot.bank.to_string());

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Occupancy, UnitId};

    const SAMPLE: &str = "12/5x2/5,5,100,5,5;0,1,2,3,4/2.0/4.1/1@0.0:40,2@3.0:0/1.1/3000";

    #[test]
    fn parse_sample() {
        let s = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(s.turn, 12);
        assert_eq!((s.map.width, s.map.height), (5, 2));
        assert_eq!(s.map.halite(Position::new(2, 0)), 100);
        assert_eq!(s.map.halite(Position::new(4, 1)), 4);
        assert_eq!(s.home, Position::new(2, 0));
        assert_eq!(s.aux_bases, vec![Position::new(4, 1)]);
        assert_eq!(s.units.len(), 2);
        assert_eq!(s.units[0], Unit::new(1, Position::new(0, 0), 40));
        assert_eq!(s.map.occupancy(Position::new(3, 0)), Occupancy::Friendly(UnitId(2)));
        assert_eq!(s.map.occupancy(Position::new(1, 1)), Occupancy::Hostile);
        assert_eq!(s.bank, 3000);
    }

    #[test]
    fn encode_roundtrip() {
        let s = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(encode_snapshot(&s), SAMPLE);
    }

    #[test]
    fn empty_lists_use_dash() {
        let line = "0/2x1/7,8/0.0/-/-/-/0";
        let s = parse_snapshot(line).unwrap();
        assert!(s.units.is_empty() && s.aux_bases.is_empty());
        assert_eq!(encode_snapshot(&s), line);
    }

    #[test]
    fn wrong_section_count() {
        assert_eq!(parse_snapshot("garbage"), Err(SnapshotError::WrongSectionCount(1)));
    }

    #[test]
    fn bad_dimensions_and_rows() {
        assert!(matches!(
            parse_snapshot("0/5by2/1/0.0/-/-/-/0"),
            Err(SnapshotError::InvalidDimensions(_))
        ));
        assert_eq!(
            parse_snapshot("0/2x2/1,2/0.0/-/-/-/0"),
            Err(SnapshotError::WrongRowCount { expected: 2, found: 1 })
        );
        assert_eq!(
            parse_snapshot("0/2x1/1,2,3/0.0/-/-/-/0"),
            Err(SnapshotError::WrongRowLength { row: 0, expected: 2, found: 3 })
        );
        assert!(matches!(
            parse_snapshot("0/2x1/1,x/0.0/-/-/-/0"),
            Err(SnapshotError::InvalidCell(_))
        ));
    }

    #[test]
    fn oversized_dimensions_rejected() {
        for dims in ["4294967296x4294967296", "2147483648x1", "-3x2", "65536x65536", "1048577x1"] {
            let notation = format!("1/{}/0/0.0/-/-/-/0", dims);
            assert_eq!(
                parse_snapshot(&notation),
                Err(SnapshotError::InvalidDimensions(dims.to_string())),
                "{}",
                dims
            );
        }
        assert!(parse_snapshot("1/1048576x1/0/0.0/-/-/-/0").is_err());
        assert!(parse_dimensions("1024x1024").is_ok());
    }

    #[test]
    fn off_grid_positions_rejected() {
        assert_eq!(
            parse_snapshot("0/2x1/1,2/5.0/-/-/-/0"),
            Err(SnapshotError::OffGrid("5.0".to_string()))
        );
        assert!(matches!(
            parse_snapshot("0/2x1/1,2/0.0/-/1@9.9:0/-/0"),
            Err(SnapshotError::OffGrid(_))
        ));
    }

    #[test]
    fn bad_unit_entries() {
        assert!(matches!(
            parse_snapshot("0/2x1/1,2/0.0/-/1-0.0:0/-/0"),
            Err(SnapshotError::InvalidUnitEntry(_))
        ));
        assert!(matches!(
            parse_snapshot("0/2x1/1,2/0.0/-/1@0.0:0,2@0.0:0/-/0"),
            Err(SnapshotError::DuplicateUnit(_))
        ));
        assert!(matches!(
            parse_snapshot("0/2x1/1,2/0.0/-/1@0.0:0/0.0/0"),
            Err(SnapshotError::DuplicateHostile(_))
        ));
    }

    #[test]
    fn bad_turn_and_bank() {
        assert!(matches!(
            parse_snapshot("t/2x1/1,2/0.0/-/-/-/0"),
            Err(SnapshotError::InvalidTurn(_))
        ));
        assert!(matches!(
            parse_snapshot("0/2x1/1,2/0.0/-/-/-/lots"),
            Err(SnapshotError::InvalidBank(_))
        ));
    }
}
