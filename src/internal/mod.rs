/// Module with the character predicates of the rule language.
pub(crate) mod character_class;

/// Module with the delimited literal scanner.
pub(crate) mod literal;

/// Module with the indentation measurement and the nesting depth tracker.
pub(crate) mod nesting;

/// Module with the lookup table of the punctuation symbols.
pub(crate) mod symbol_table;
