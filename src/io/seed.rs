use std::path::Path;

use tracing::info;

use super::LoadError;
use crate::model::Board;

/// Load a board from a JSON seed file and check its invariants.
pub fn load_board(path: &Path) -> Result<Board, LoadError> {
    let json = std::fs::read_to_string(path)?;
    let board: Board = serde_json::from_str(&json)?;
    let board = board.normalized()?;
    info!(
        path = %path.display(),
        weeks = board.submissions.len(),
        documents = board.documents.len(),
        "seed loaded"
    );
    Ok(board)
}

/// Use the seed file when present, otherwise the built-in sample.
pub fn load_board_or_sample(path: &Path) -> Result<Board, LoadError> {
    if path.is_file() {
        load_board(path)
    } else {
        info!(path = %path.display(), "no seed file, using built-in sample");
        Ok(Board::sample().normalized()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoardError;
    use tempfile::TempDir;

    #[test]
    fn missing_seed_gives_sample() {
        let tmp = TempDir::new().unwrap();
        let board = load_board_or_sample(&tmp.path().join("seed.json")).unwrap();
        assert_eq!(board, Board::sample());
    }

    #[test]
    fn seed_file_is_read_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seed.json");
        let mut board = Board::sample();
        board.submissions.reverse();
        std::fs::write(&path, serde_json::to_string_pretty(&board).unwrap()).unwrap();

        let loaded = load_board_or_sample(&path).unwrap();
        assert_eq!(loaded.submissions[0].week, 1);
        assert_eq!(loaded.submissions.len(), 4);
    }

    #[test]
    fn duplicate_weeks_in_seed_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seed.json");
        let mut board = Board::sample();
        board.submissions[1].week = 1;
        std::fs::write(&path, serde_json::to_string(&board).unwrap()).unwrap();

        let err = load_board(&path).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(BoardError::DuplicateWeek(1))));
    }

    #[test]
    fn corrupt_seed_is_a_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seed.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_board(&path), Err(LoadError::Json(_))));
    }
}
