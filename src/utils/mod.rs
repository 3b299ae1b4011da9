mod string;

pub use string::{strip_delimiters, unquote_string};
