//! Document tree and its Office Open XML serialization

pub mod model;
pub mod package;
pub(crate) mod xml;

pub use model::{
    Alignment, Block, Document, Inline, PageSetup, Paragraph, ParagraphSpacing, RunStyle,
    Section, Table, TableCell, TableRow,
};
pub use package::{build_parts, write_package, Part};

/// MIME type of a `.docx` file
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
