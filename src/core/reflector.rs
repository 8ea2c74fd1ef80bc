use crate::adapters::DisplayBoard;
use crate::domain::model::{format_percentage, ElementLayout};

/// Mirrors the slider into the percentage label and the bar width.
#[derive(Debug, Clone)]
pub struct Reflector {
    board: DisplayBoard,
    percentage_id: String,
    bar_id: String,
}

impl Reflector {
    pub fn new(board: DisplayBoard, layout: &ElementLayout) -> Self {
        Self {
            board,
            percentage_id: layout.percentage.clone(),
            bar_id: layout.bar.clone(),
        }
    }

    pub fn reflect(&self, value: i64) {
        self.board
            .set_text(&self.percentage_id, format_percentage(value));
        self.board.set_width(&self.bar_id, value);
    }
}
