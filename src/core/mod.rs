// Core modules implementing the value model, the locate-then-parse decoder, and errors.
pub mod cursor;
pub mod error;
pub mod locate;
pub mod options;
pub mod parser;
pub mod scalar;
pub mod value;
