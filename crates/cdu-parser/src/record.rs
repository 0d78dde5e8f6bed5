//! Fixed-column record decoding.
//!
//! Every CDU record is decoded by slicing character columns out of the line
//! after padding it with spaces to [`LINE_WIDTH`]. Field extraction never
//! fails: a column past the end of the line reads as blank. Only the
//! numeric fields (block number, diagram id, parameter value) can be
//! malformed, and their decoders report a [`FormatError`].
//!
//! Column tables are 0-indexed and end-exclusive.

use std::ops::Range;

use thiserror::Error;

use cdu_core::{
    number::{parse_integer, parse_number},
    semantic::{BlockLine, DefaultValue, Param},
};

/// Minimum width every line is padded to before slicing.
pub const LINE_WIDTH: usize = 71;

/// Columns of a block record (header or continuation line).
pub mod block {
    use std::ops::Range;

    pub const NUMBER: Range<usize> = 0..4;
    pub const INPUT_FLAG: usize = 4;
    pub const BLOCK_TYPE: Range<usize> = 5..11;
    pub const OUTPUT_FLAG: usize = 11;
    pub const SUBTYPE: Range<usize> = 12..18;
    pub const STATE_FLAG: usize = 18;
    pub const INPUT_VAR: Range<usize> = 19..25;
    pub const OUTPUT_VAR: Range<usize> = 26..32;
    pub const PARAMS: [Range<usize>; 4] = [33..39, 39..45, 45..51, 51..57];
    pub const VMIN: Range<usize> = 58..64;
    pub const VMAX: Range<usize> = 65..71;
}

/// Columns of a `DEFPAR` line. The description runs to the end of the line.
pub mod defpar {
    use std::ops::Range;

    pub const NAME: Range<usize> = 7..13;
    pub const VALUE: Range<usize> = 14..32;
    pub const DESCRIPTION_START: usize = 32;
}

/// Columns of a `DEFVAL` line.
pub mod defval {
    use std::ops::Range;

    pub const SUBTYPE: Range<usize> = 7..13;
    pub const DEFAULT_VAR: Range<usize> = 14..20;
    pub const OPERAND1: Range<usize> = 21..27;
    pub const OPERATOR: usize = 28;
    pub const OPERAND2: Range<usize> = 29..35;
}

/// Columns of a diagram header line. The name is read from the rest of the line.
pub mod header {
    use std::ops::Range;

    pub const ID: Range<usize> = 0..6;
    pub const NAME_START: usize = 7;
}

/// A numeric field that does not hold a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} `{value}` is not a valid {expected}")]
pub struct FormatError {
    field: &'static str,
    value: String,
    expected: &'static str,
    columns: Range<usize>,
}

impl FormatError {
    fn new(field: &'static str, value: String, expected: &'static str, columns: Range<usize>) -> Self {
        Self {
            field,
            value,
            expected,
            columns,
        }
    }

    /// Returns the name of the malformed field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the trimmed field content.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the character columns the field occupies.
    pub fn columns(&self) -> Range<usize> {
        self.columns.clone()
    }
}

/// A line padded to [`LINE_WIDTH`], addressable by character column.
struct PaddedLine {
    chars: Vec<char>,
}

impl PaddedLine {
    fn new(line: &str) -> Self {
        let mut chars: Vec<char> = line.trim_end_matches(['\n', '\r']).chars().collect();
        if chars.len() < LINE_WIDTH {
            chars.resize(LINE_WIDTH, ' ');
        }
        Self { chars }
    }

    /// Returns the trimmed content of `columns`.
    fn field(&self, columns: Range<usize>) -> String {
        let end = columns.end.min(self.chars.len());
        let start = columns.start.min(end);
        self.chars[start..end]
            .iter()
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Returns the trimmed content from `start` to the end of the line.
    fn rest(&self, start: usize) -> String {
        self.field(start..self.chars.len())
    }

    fn flag(&self, column: usize) -> char {
        self.chars.get(column).copied().unwrap_or(' ')
    }
}

/// Decodes every field of a block record except its number.
///
/// Dots in the subtype column are removed.
///
/// # Examples
///
/// ```
/// use cdu_parser::record::decode_block_line;
///
/// let line = decode_block_line("0002 GANHO         ENT1   ENT2   K");
/// assert_eq!(line.block_type, "GANHO");
/// assert_eq!(line.input_var, "ENT1");
/// assert_eq!(line.output_var, "ENT2");
/// assert_eq!(line.params[0], "K");
/// ```
pub fn decode_block_line(line: &str) -> BlockLine {
    let padded = PaddedLine::new(line);

    BlockLine {
        input_flag: padded.flag(block::INPUT_FLAG),
        block_type: padded.field(block::BLOCK_TYPE),
        output_flag: padded.flag(block::OUTPUT_FLAG),
        subtype: padded.field(block::SUBTYPE).replace('.', ""),
        state_flag: padded.flag(block::STATE_FLAG),
        input_var: padded.field(block::INPUT_VAR),
        output_var: padded.field(block::OUTPUT_VAR),
        params: block::PARAMS.map(|columns| padded.field(columns)),
        vmin: padded.field(block::VMIN),
        vmax: padded.field(block::VMAX),
    }
}

/// Decodes the block number column.
///
/// # Errors
///
/// Returns [`FormatError`] if the column does not hold an unsigned integer.
pub fn decode_block_number(line: &str) -> Result<u32, FormatError> {
    let value = PaddedLine::new(line).field(block::NUMBER);
    parse_integer(&value)
        .ok_or_else(|| FormatError::new("block number", value, "integer", block::NUMBER))
}

/// Decodes a `DEFPAR` line.
///
/// # Errors
///
/// Returns [`FormatError`] if the value column does not hold a number.
///
/// # Examples
///
/// ```
/// use cdu_parser::record::decode_param;
///
/// let param = decode_param("DEFPAR #K        10.0              GANHO DO ESTABILIZADOR").unwrap();
/// assert_eq!(param.name(), "#K");
/// assert_eq!(param.value(), 10.0);
/// assert_eq!(param.description(), "GANHO DO ESTABILIZADOR");
/// ```
pub fn decode_param(line: &str) -> Result<Param, FormatError> {
    let padded = PaddedLine::new(line);
    let value = padded.field(defpar::VALUE);
    let number = parse_number(&value)
        .ok_or_else(|| FormatError::new("parameter value", value, "number", defpar::VALUE))?;

    Ok(Param::new(
        padded.field(defpar::NAME),
        number,
        padded.rest(defpar::DESCRIPTION_START),
    ))
}

/// Decodes a `DEFVAL` line. Operands are kept as written.
pub fn decode_default(line: &str) -> DefaultValue {
    let padded = PaddedLine::new(line);

    DefaultValue::new(
        padded.field(defval::SUBTYPE),
        padded.field(defval::DEFAULT_VAR),
        padded.field(defval::OPERAND1),
        padded.flag(defval::OPERATOR),
        padded.field(defval::OPERAND2),
    )
}

/// Decodes the diagram id of a header line.
///
/// # Errors
///
/// Returns [`FormatError`] if the id column does not hold an unsigned integer.
pub fn decode_header_id(line: &str) -> Result<u32, FormatError> {
    let value = PaddedLine::new(line).field(header::ID);
    parse_integer(&value).ok_or_else(|| FormatError::new("diagram id", value, "integer", header::ID))
}

/// Decodes the diagram name of a header line: every alphanumeric character
/// after the id, with everything else dropped.
///
/// # Examples
///
/// ```
/// use cdu_parser::record::decode_header_name;
///
/// assert_eq!(decode_header_name("000010 RT_FUNIL-2"), "RTFUNIL2");
/// ```
pub fn decode_header_name(line: &str) -> String {
    line.trim_end_matches(['\n', '\r'])
        .chars()
        .skip(header::NAME_START)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    /// Builds a record by writing each field at its column.
    fn record(fields: &[(usize, &str)]) -> String {
        let mut chars = vec![' '; LINE_WIDTH];
        for (start, value) in fields {
            for (offset, c) in value.chars().enumerate() {
                let index = start + offset;
                if index >= chars.len() {
                    chars.resize(index + 1, ' ');
                }
                chars[index] = c;
            }
        }
        chars.into_iter().collect::<String>().trim_end().to_string()
    }

    #[test]
    fn test_decode_full_block_line() {
        let line = record(&[
            (0, "0001"),
            (4, "I"),
            (5, "FUNCAO"),
            (11, "O"),
            (12, "X**2."),
            (18, "+"),
            (19, "VIN"),
            (26, "VOUT"),
            (33, "A"),
            (39, "B"),
            (45, "C"),
            (51, "D"),
            (58, "-1.0"),
            (65, "1.0"),
        ]);
        let decoded = decode_block_line(&line);

        assert_eq!(decoded.input_flag, 'I');
        assert_eq!(decoded.block_type, "FUNCAO");
        assert_eq!(decoded.output_flag, 'O');
        assert_eq!(decoded.subtype, "X**2");
        assert_eq!(decoded.state_flag, '+');
        assert_eq!(decoded.input_var, "VIN");
        assert_eq!(decoded.output_var, "VOUT");
        assert_eq!(decoded.params, ["A", "B", "C", "D"]);
        assert_eq!(decoded.vmin, "-1.0");
        assert_eq!(decoded.vmax, "1.0");
        assert_eq!(decode_block_number(&line), Ok(1));
    }

    #[test]
    fn test_short_line_is_padded() {
        let decoded = decode_block_line("0003 SOMA");

        assert_eq!(decoded.block_type, "SOMA");
        assert_eq!(decoded.output_flag, ' ');
        assert_eq!(decoded.input_var, "");
        assert_eq!(decoded.vmax, "");
    }

    #[test]
    fn test_empty_line_decodes_blank() {
        let decoded = decode_block_line("");

        assert_eq!(decoded.block_type, "");
        assert_eq!(decoded.state_flag, ' ');
        assert!(decode_block_number("").is_err());
    }

    #[test]
    fn test_malformed_block_number() {
        let err = decode_block_number("00A1 SOMA").unwrap_err();

        assert_eq!(err.field(), "block number");
        assert_eq!(err.value(), "00A1");
        assert_eq!(err.columns(), 0..4);
        assert_eq!(err.to_string(), "block number `00A1` is not a valid integer");
    }

    #[test]
    fn test_decode_param() {
        let line = record(&[(0, "DEFPAR"), (7, "T1"), (14, "0.05"), (32, "CONSTANTE DE TEMPO")]);
        let param = decode_param(&line).unwrap();

        assert_eq!(param.name(), "T1");
        assert_eq!(param.value(), 0.05);
        assert_eq!(param.description(), "CONSTANTE DE TEMPO");
    }

    #[test]
    fn test_decode_param_without_description() {
        let param = decode_param("DEFPAR VSMAX  -0.1").unwrap();

        assert_eq!(param.name(), "VSMAX");
        assert_eq!(param.value(), -0.1);
        assert_eq!(param.description(), "");
    }

    #[test]
    fn test_decode_param_malformed_value() {
        let err = decode_param("DEFPAR K      ABC").unwrap_err();

        assert_eq!(err.field(), "parameter value");
        assert_eq!(err.value(), "ABC");
        assert_eq!(err.columns(), 14..32);
    }

    #[test]
    fn test_decode_default() {
        let line = record(&[
            (0, "DEFVAL"),
            (7, "MAX"),
            (14, "X1"),
            (21, "#K"),
            (28, "*"),
            (29, "2.0"),
        ]);
        let default = decode_default(&line);

        assert_eq!(default.subtype(), "MAX");
        assert_eq!(default.default_var(), "X1");
        assert_eq!(default.operand1(), "#K");
        assert_eq!(default.operator(), '*');
        assert_eq!(default.operand2(), "2.0");
    }

    #[test]
    fn test_decode_default_operand_only() {
        let default = decode_default("DEFVAL        VREF   1.05");

        assert_eq!(default.subtype(), "");
        assert_eq!(default.default_var(), "VREF");
        assert_eq!(default.operand1(), "1.05");
        assert_eq!(default.operator(), ' ');
        assert_eq!(default.operand2(), "");
    }

    #[test]
    fn test_decode_header() {
        assert_eq!(decode_header_id("000012 PSS-BR"), Ok(12));
        assert_eq!(decode_header_name("000012 PSS-BR"), "PSSBR");
        assert!(decode_header_id("ABCDEF NAME").is_err());
        assert_eq!(decode_header_name("000012"), "");
    }

    proptest! {
        #[test]
        fn test_decoding_never_panics(line in "\\PC{0,90}") {
            let decoded = decode_block_line(&line);
            prop_assert!(decoded.block_type.chars().count() <= 6);
            let _ = decode_block_number(&line);
            let _ = decode_param(&line);
            let _ = decode_default(&line);
            let _ = decode_header_name(&line);
        }

        #[test]
        fn test_fields_read_back(input in "[A-Z][A-Z0-9]{0,5}", output in "[A-Z][A-Z0-9]{0,5}") {
            let line = record(&[(0, "0007"), (5, "GANHO"), (19, &input), (26, &output)]);
            let decoded = decode_block_line(&line);
            prop_assert_eq!(decoded.input_var, input);
            prop_assert_eq!(decoded.output_var, output);
        }
    }
}
