//! Unicode Plural Rules categorizer for numeric input (component C3,
//! runtime half): operand derivation, AST evaluation, and Gettext-syntax
//! emission over rule sets parsed by `cldr_pluralrules_parser`.

pub mod category;
pub mod eval;
pub mod gettext;
pub mod operands;
pub mod ruleset;

pub use category::{PluralCategory, PluralRuleType};
pub use eval::Evaluate;
pub use operands::PluralOperands;
pub use ruleset::{PluralRuleError, PluralRuleSet, PluralRules};
