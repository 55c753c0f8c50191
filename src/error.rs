use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum HandwritingError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [image] failed to decode a background or encode a page
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("invalid layout options: {0}")]
    /// The layout options could not be deserialized
    Options(#[from] serde_json::Error),

    #[error("invalid colour `{0}`, expected a hex colour such as #0046b5")]
    InvalidColour(String),

    #[error("no content to export")]
    /// Export was requested for a document without any pages
    NoContent,

    #[error("page is missing from the document")]
    PageMissing,
}
