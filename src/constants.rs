/// Characters which must precede an alias for it to be recognized as a match start.
///
/// The very first character of a text is always a valid match start.
pub const START_PHRASE_CHARS: &[char] = &[' ', '\t', '\n', '"', '('];

/// Characters which must follow an alias for it to be recognized as a match end.
///
/// The end of the text is always a valid match end.
pub const END_PHRASE_CHARS: &[char] = &[' ', '\t', '\n', '"', ')', ':', '?', '!', '.'];

/// Separates individual aliases within the search terms column of the alias dictionary.
pub const ALIAS_DELIMITER: char = '|';

/// File extension which marks a gzip compressed alias dictionary.
pub const GZIP_FILE_EXTENSION: &str = "gz";

/// File extension used for per-ticker output files.
pub const OUTPUT_FILE_EXTENSION: &str = "csv";
