//! Functional blocks of a CDU diagram.
//!
//! A [`Block`] is built from one header [`BlockLine`] and zero or more
//! continuation [`BlockLine`]s. The header fixes the identity and type of
//! the block; continuations extend its variable and parameter lists.

use std::fmt;

/// One of the four parameter columns of a block record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamColumn {
    P1,
    P2,
    P3,
    P4,
}

impl ParamColumn {
    /// All columns in record order.
    pub const ALL: [ParamColumn; 4] = [Self::P1, Self::P2, Self::P3, Self::P4];

    fn index(self) -> usize {
        match self {
            Self::P1 => 0,
            Self::P2 => 1,
            Self::P3 => 2,
            Self::P4 => 3,
        }
    }
}

impl fmt::Display for ParamColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.index() + 1)
    }
}

/// The decoded fields of one physical block line.
///
/// Every field is already trimmed; absent data is the empty string or a
/// space character. The block number is decoded separately because it is
/// the only field whose decoding can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockLine {
    pub input_flag: char,
    pub block_type: String,
    pub output_flag: char,
    pub subtype: String,
    pub state_flag: char,
    pub input_var: String,
    pub output_var: String,
    pub params: [String; 4],
    pub vmin: String,
    pub vmax: String,
}

/// A functional block of a diagram (gain, sum, integrator, import, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    number: u32,
    line: usize,
    input_flag: char,
    output_flag: char,
    block_type: String,
    subtype: String,
    state_flags: Vec<char>,
    input_vars: Vec<String>,
    output_var: String,
    params: [Vec<String>; 4],
    vmin: String,
    vmax: String,
}

impl Block {
    /// Create a block from its header line.
    ///
    /// # Arguments
    ///
    /// * `number` - The block number, unique within the diagram
    /// * `line` - The 1-based source line of the header record
    /// * `header` - The decoded header record
    pub fn new(number: u32, line: usize, header: BlockLine) -> Self {
        let BlockLine {
            input_flag,
            block_type,
            output_flag,
            subtype,
            state_flag,
            input_var,
            output_var,
            params,
            vmin,
            vmax,
        } = header;

        let input_vars = if input_var.is_empty() {
            Vec::new()
        } else {
            vec![input_var]
        };

        Self {
            number,
            line,
            input_flag,
            output_flag,
            block_type,
            subtype,
            state_flags: vec![state_flag],
            input_vars,
            output_var,
            params: params.map(|value| {
                if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value]
                }
            }),
            vmin,
            vmax,
        }
    }

    /// Merge a continuation line into this block.
    ///
    /// The state flag is always recorded. The input variable and parameter
    /// columns are appended only when non-empty, and a non-empty output
    /// variable replaces the current one.
    pub fn extend(&mut self, continuation: &BlockLine) {
        self.state_flags.push(continuation.state_flag);

        if !continuation.input_var.is_empty() {
            self.input_vars.push(continuation.input_var.clone());
        }

        if !continuation.output_var.is_empty() {
            self.output_var.clone_from(&continuation.output_var);
        }

        for (values, value) in self.params.iter_mut().zip(&continuation.params) {
            if !value.is_empty() {
                values.push(value.clone());
            }
        }
    }

    /// Returns the block number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the node identifier: the block number zero-padded to 4 digits.
    pub fn node_id(&self) -> String {
        format!("{:04}", self.number)
    }

    /// Returns the 1-based source line of the header record.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn input_flag(&self) -> char {
        self.input_flag
    }

    pub fn output_flag(&self) -> char {
        self.output_flag
    }

    /// Returns the block type as written in the type column.
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    /// Returns the subtype, with any `.` characters removed.
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Returns one state flag per physical line consumed.
    pub fn state_flags(&self) -> &[char] {
        &self.state_flags
    }

    /// Returns the input variables in port order.
    pub fn input_vars(&self) -> &[String] {
        &self.input_vars
    }

    /// Returns the output variable, or the empty string if none.
    pub fn output_var(&self) -> &str {
        &self.output_var
    }

    /// Returns the non-empty values of a parameter column, one per line.
    pub fn params(&self, column: ParamColumn) -> &[String] {
        &self.params[column.index()]
    }

    pub fn vmin(&self) -> &str {
        &self.vmin
    }

    pub fn vmax(&self) -> &str {
        &self.vmax
    }

    /// Returns the number of physical lines this block was built from.
    pub fn line_count(&self) -> usize {
        self.state_flags.len()
    }

    /// Returns `true` if the block type equals `block_type`, ignoring case.
    pub fn is_type(&self, block_type: &str) -> bool {
        self.block_type.eq_ignore_ascii_case(block_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> BlockLine {
        BlockLine {
            input_flag: 'I',
            block_type: "SOMA".to_string(),
            output_flag: 'O',
            subtype: String::new(),
            state_flag: '+',
            input_var: "PE".to_string(),
            output_var: "VSTAB".to_string(),
            params: [
                "-1.0".to_string(),
                String::new(),
                String::new(),
                String::new(),
            ],
            vmin: "VMIN".to_string(),
            vmax: String::new(),
        }
    }

    #[test]
    fn test_new_from_header() {
        let block = Block::new(1, 10, header());

        assert_eq!(block.number(), 1);
        assert_eq!(block.node_id(), "0001");
        assert_eq!(block.line(), 10);
        assert_eq!(block.block_type(), "SOMA");
        assert_eq!(block.input_vars(), ["PE"]);
        assert_eq!(block.output_var(), "VSTAB");
        assert_eq!(block.params(ParamColumn::P1), ["-1.0"]);
        assert!(block.params(ParamColumn::P2).is_empty());
        assert_eq!(block.state_flags(), ['+']);
        assert_eq!(block.vmin(), "VMIN");
        assert_eq!(block.line_count(), 1);
    }

    #[test]
    fn test_header_without_input() {
        let block = Block::new(
            7,
            1,
            BlockLine {
                block_type: "ENTRAD".to_string(),
                output_var: "VREF".to_string(),
                ..BlockLine::default()
            },
        );

        assert!(block.input_vars().is_empty());
        assert_eq!(block.output_var(), "VREF");
    }

    #[test]
    fn test_extend_appends_non_empty_fields() {
        let mut block = Block::new(1, 1, header());
        block.extend(&BlockLine {
            state_flag: '-',
            input_var: "P".to_string(),
            params: [
                "1.0".to_string(),
                "2.0".to_string(),
                String::new(),
                String::new(),
            ],
            ..BlockLine::default()
        });

        assert_eq!(block.input_vars(), ["PE", "P"]);
        assert_eq!(block.output_var(), "VSTAB");
        assert_eq!(block.params(ParamColumn::P1), ["-1.0", "1.0"]);
        assert_eq!(block.params(ParamColumn::P2), ["2.0"]);
        assert_eq!(block.state_flags(), ['+', '-']);
    }

    #[test]
    fn test_extend_overwrites_output() {
        let mut block = Block::new(1, 1, header());
        block.extend(&BlockLine {
            state_flag: ' ',
            output_var: "X2".to_string(),
            ..BlockLine::default()
        });
        block.extend(&BlockLine {
            state_flag: ' ',
            ..BlockLine::default()
        });

        assert_eq!(block.output_var(), "X2");
        assert_eq!(block.input_vars(), ["PE"]);
        assert_eq!(block.line_count(), 3);
    }

    #[test]
    fn test_node_id_padding() {
        let block = Block::new(1234, 1, header());
        assert_eq!(block.node_id(), "1234");
        assert!(block.is_type("soma"));
    }

    #[test]
    fn test_param_column_display() {
        let names: Vec<_> = ParamColumn::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, ["P1", "P2", "P3", "P4"]);
    }
}
