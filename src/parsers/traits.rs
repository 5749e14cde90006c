/// A statement format that can be turned into format-specific records.
pub trait Parser {
    type Output;

    /// File extensions (lowercase, without the dot) this format is saved under.
    const EXTENSIONS: &'static [&'static str];

    fn parse(content: &str) -> Result<Vec<Self::Output>, String>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;

    fn has_extension(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| Self::EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}
