//! Prototype table loader.
//!
//! ```text
//! <NumParams>
//! <descriptor> × NumParams
//! { <classChar> <count>  <prototype> × count }*
//! ```
//!
//! Blocks for the same class append to its list. End of input ends block
//! scanning. A header that does not parse as `<char> <int>` is handled by
//! the [`BlockScanPolicy`].

use std::io::Read;
use std::path::Path;

use normmatch_core::errors::FormatError;
use normmatch_core::types::ClassId;

use crate::format::records::{read_param_desc, read_prototype, read_sample_size};
use crate::format::scanner::{Scanner, Token};
use crate::table::{BlockScanStop, LoadReport, PrototypeTable};

/// What to do with a class block header that cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockScanPolicy {
    /// Treat it as the end of the class blocks and keep what was read.
    #[default]
    StopAtUnparsable,
    /// Fail the load with `FormatError::MalformedBlockHeader`.
    Strict,
}

impl BlockScanPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::StopAtUnparsable
        }
    }
}

/// Read a prototype table from `path`.
pub fn load_table(path: &Path, policy: BlockScanPolicy) -> Result<PrototypeTable, FormatError> {
    let _span = tracing::info_span!("normmatch.load", path = %path.display()).entered();
    let source = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&source, policy)
}

/// Read a prototype table from any byte source. `origin` names the source
/// in I/O errors.
pub fn load_table_from_reader<R: Read>(
    mut reader: R,
    origin: &Path,
    policy: BlockScanPolicy,
) -> Result<PrototypeTable, FormatError> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|source| FormatError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
    parse_table(&source, policy)
}

/// Parse a prototype table from its text form.
pub fn parse_table(source: &str, policy: BlockScanPolicy) -> Result<PrototypeTable, FormatError> {
    let mut scanner = Scanner::new(source);

    let num_params = read_sample_size(&mut scanner)?;
    let param_desc = read_param_desc(&mut scanner, num_params)?;
    let mut table = PrototypeTable::from_descriptors(param_desc);

    let mut report = LoadReport::default();
    loop {
        let header = match read_block_header(&mut scanner)? {
            BlockHeader::End => break,
            BlockHeader::Block(header) => header,
            BlockHeader::Unparsable { line, found } => match policy {
                BlockScanPolicy::Strict => {
                    return Err(FormatError::MalformedBlockHeader { line, found });
                }
                BlockScanPolicy::StopAtUnparsable => {
                    tracing::warn!(line, found = %found, "Unparsable class block header, ending table");
                    report.stopped_early = Some(BlockScanStop { line, found });
                    break;
                }
            },
        };

        table.touch(header.class);
        for _ in 0..header.count {
            let proto = read_prototype(&mut scanner, num_params)?;
            table.push_record(header.class, proto);
        }
        tracing::trace!(class = %header.class, count = header.count, line = header.line, "Read class block");
        report.blocks_read += 1;
    }

    tracing::info!(
        num_params,
        class_count = table.class_count(),
        proto_count = table.proto_count(),
        blocks = report.blocks_read,
        "Loaded prototype table"
    );
    table.set_report(report);
    Ok(table)
}

struct ParsedHeader {
    class: ClassId,
    count: usize,
    line: usize,
}

enum BlockHeader {
    End,
    Block(ParsedHeader),
    Unparsable { line: usize, found: String },
}

fn read_block_header(scanner: &mut Scanner<'_>) -> Result<BlockHeader, FormatError> {
    let Some(class_token) = scanner.next_token() else {
        return Ok(BlockHeader::End);
    };
    let line = class_token.line;

    let mut chars = class_token.text.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Ok(unparsable(class_token, None));
    };
    let count_token = scanner.next_token();
    let Some(count) = count_token.and_then(|t| t.text.parse::<i64>().ok()) else {
        return Ok(unparsable(class_token, count_token));
    };

    let class = ClassId::from_char(ch).map_err(|_| FormatError::UnsupportedClassChar { line, ch })?;
    if class.is_noise() {
        return Err(FormatError::ReservedClass { line });
    }
    let count = usize::try_from(count).map_err(|_| FormatError::NegativeCount {
        line,
        class: ch,
        count,
    })?;

    Ok(BlockHeader::Block(ParsedHeader { class, count, line }))
}

fn unparsable(class_token: Token<'_>, count_token: Option<Token<'_>>) -> BlockHeader {
    let found = match count_token {
        Some(t) => format!("{} {}", class_token.text, t.text),
        None => class_token.text.to_string(),
    };
    BlockHeader::Unparsable {
        line: class_token.line,
        found,
    }
}
