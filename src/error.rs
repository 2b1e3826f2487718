use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes could not be opened as a zip archive.
    #[error("not an OOXML container: {0}")]
    NotAContainer(#[from] zip::result::ZipError),

    #[error("missing part {0} (is this a DOCX file?)")]
    MissingPart(&'static str),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}
