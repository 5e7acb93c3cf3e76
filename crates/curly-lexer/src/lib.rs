#![doc = include_str!("../README.md")]

mod cursor;
pub use cursor::InputCursor;

mod lexeme;
pub use lexeme::Lexeme;

mod lexer;
pub use lexer::Lexer;
