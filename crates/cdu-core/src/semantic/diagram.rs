//! The diagram aggregate.
//!
//! This module contains the root of the semantic model:
//! - [`Dcdu`] - One parsed diagram with its declarations and categorized blocks
//! - [`Param`] - A named numeric parameter from a `DEFPAR` line
//! - [`DefaultValue`] - A variable default from a `DEFVAL` line
//! - [`BlockContext`] - A block paired with the diagram used to resolve its parameters

use log::trace;

use crate::{
    block_type::BlockCategory,
    number::parse_number,
    semantic::block::{Block, ParamColumn},
};

/// A named parameter declared with `DEFPAR`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    value: f64,
    description: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the free-text description following the value.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A default value for a variable, declared with `DEFVAL`.
///
/// The value is `operand1`, optionally combined with `operand2` through
/// `operator`. Operands are either numeric literals or parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    subtype: String,
    default_var: String,
    operand1: String,
    operator: char,
    operand2: String,
}

impl DefaultValue {
    pub fn new(
        subtype: impl Into<String>,
        default_var: impl Into<String>,
        operand1: impl Into<String>,
        operator: char,
        operand2: impl Into<String>,
    ) -> Self {
        Self {
            subtype: subtype.into(),
            default_var: default_var.into(),
            operand1: operand1.into(),
            operator,
            operand2: operand2.into(),
        }
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Returns the variable this default applies to.
    pub fn default_var(&self) -> &str {
        &self.default_var
    }

    pub fn operand1(&self) -> &str {
        &self.operand1
    }

    /// Returns the operator column, a space when absent.
    pub fn operator(&self) -> char {
        self.operator
    }

    pub fn operand2(&self) -> &str {
        &self.operand2
    }
}

/// One fully parsed CDU diagram.
///
/// The diagram owns every block it contains. Blocks are filed by type into
/// entries, imports, exports and interior blocks; their numbers are unique
/// across all four collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dcdu {
    id: u32,
    name: String,
    params: Vec<Param>,
    defaults: Vec<DefaultValue>,
    imports: Vec<Block>,
    exports: Vec<Block>,
    entries: Vec<Block>,
    blocks: Vec<Block>,
}

impl Dcdu {
    /// Create an empty diagram.
    ///
    /// # Arguments
    ///
    /// * `id` - The diagram number from the header line
    /// * `name` - The diagram name from the header line
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn defaults(&self) -> &[DefaultValue] {
        &self.defaults
    }

    pub fn imports(&self) -> &[Block] {
        &self.imports
    }

    pub fn exports(&self) -> &[Block] {
        &self.exports
    }

    pub fn entries(&self) -> &[Block] {
        &self.entries
    }

    /// Returns the blocks that are not entries, imports or exports.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn add_param(&mut self, param: Param) {
        self.params.push(param);
    }

    pub fn add_default(&mut self, default: DefaultValue) {
        self.defaults.push(default);
    }

    /// Files `block` into the collection matching its type.
    ///
    /// Callers are responsible for keeping block numbers unique; see
    /// [`Dcdu::block`].
    pub fn add_block(&mut self, block: Block) {
        let category = BlockCategory::of(block.block_type());
        trace!(number = block.number(), category:?; "Adding block");

        match category {
            BlockCategory::Entry => self.entries.push(block),
            BlockCategory::Export => self.exports.push(block),
            BlockCategory::Import => self.imports.push(block),
            BlockCategory::Interior => self.blocks.push(block),
        }
    }

    /// Iterates over every block: entries, imports, interior blocks, then exports.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.entries
            .iter()
            .chain(&self.imports)
            .chain(&self.blocks)
            .chain(&self.exports)
    }

    /// Returns the block with the given number, if any.
    pub fn block(&self, number: u32) -> Option<&Block> {
        self.all_blocks().find(|block| block.number() == number)
    }

    /// Returns the output variables of imports, entries and interior blocks.
    ///
    /// Exports only consume values, so they never contribute a variable.
    /// Blocks without an output variable are skipped.
    pub fn variables(&self) -> Vec<&str> {
        self.imports
            .iter()
            .chain(&self.entries)
            .chain(&self.blocks)
            .map(Block::output_var)
            .filter(|variable| !variable.is_empty())
            .collect()
    }

    /// Returns `true` if some block produces `name`, ignoring case.
    pub fn is_variable(&self, name: &str) -> bool {
        self.variables()
            .iter()
            .any(|variable| variable.eq_ignore_ascii_case(name))
    }

    /// Returns the value of the parameter `name`, ignoring case.
    ///
    /// An undeclared parameter resolves to [`f64::NEG_INFINITY`], which keeps it
    /// distinguishable from a parameter legitimately declared as zero.
    pub fn resolve_param(&self, name: &str) -> f64 {
        self.params
            .iter()
            .find(|param| param.name().eq_ignore_ascii_case(name))
            .map_or(f64::NEG_INFINITY, Param::value)
    }

    /// Returns the default value declared for `variable`.
    ///
    /// `operand1` is read as a numeric literal when possible and otherwise
    /// resolved as a parameter name. Returns `None` if `variable` has no
    /// `DEFVAL` declaration.
    pub fn resolve_default(&self, variable: &str) -> Option<f64> {
        let default = self.find_default(variable)?;
        Some(self.resolve_operand(default.operand1()))
    }

    /// Returns the default value declared for `variable`, applying the
    /// declaration's operator when both an operator and a second operand are
    /// present.
    ///
    /// Unknown operators leave the first operand unchanged.
    pub fn evaluate_default(&self, variable: &str) -> Option<f64> {
        let default = self.find_default(variable)?;
        let lhs = self.resolve_operand(default.operand1());

        if default.operand2().is_empty() {
            return Some(lhs);
        }

        let rhs = self.resolve_operand(default.operand2());
        let value = match default.operator() {
            '+' => lhs + rhs,
            '-' => lhs - rhs,
            '*' => lhs * rhs,
            '/' => lhs / rhs,
            _ => lhs,
        };

        Some(value)
    }

    fn find_default(&self, variable: &str) -> Option<&DefaultValue> {
        self.defaults
            .iter()
            .find(|default| default.default_var().eq_ignore_ascii_case(variable))
    }

    fn resolve_operand(&self, operand: &str) -> f64 {
        parse_number(operand).unwrap_or_else(|| self.resolve_param(operand))
    }
}

/// A block paired with the diagram that owns it.
///
/// Blocks do not point back at their diagram; parameter lookups that need
/// the diagram's declarations go through this pairing instead.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    diagram: &'a Dcdu,
    block: &'a Block,
}

impl<'a> BlockContext<'a> {
    pub fn new(diagram: &'a Dcdu, block: &'a Block) -> Self {
        Self { diagram, block }
    }

    pub fn diagram(&self) -> &'a Dcdu {
        self.diagram
    }

    pub fn block(&self) -> &'a Block {
        self.block
    }

    /// Resolves the `index`-th value of a parameter column to a number.
    ///
    /// The value is tried as a numeric literal, then as a parameter name, then
    /// as a variable with a default value. Returns `None` if the column has
    /// no value at `index` or the name resolves to nothing.
    pub fn param_value(&self, column: ParamColumn, index: usize) -> Option<f64> {
        let raw = self.block.params(column).get(index)?;

        if let Some(value) = parse_number(raw) {
            return Some(value);
        }

        let value = self.diagram.resolve_param(raw);
        if value != f64::NEG_INFINITY {
            return Some(value);
        }

        self.diagram.evaluate_default(raw)
    }
}
