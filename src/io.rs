pub mod d2t;
pub mod table;
