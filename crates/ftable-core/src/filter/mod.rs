//! Property filter evaluation for tabular records.
//!
//! A [`Query`] is a flat list of [`Token`]s (property, operator, value)
//! combined with a single [`Operation`]. The [`FilterEvaluator`] applies it to
//! records using the comparison semantics of each property's declared type,
//! and [`derive_options`] computes dependent filter choices from the result.
//!
//! # Token syntax
//!
//! | Symbol | Meaning             | Types                |
//! |--------|---------------------|----------------------|
//! | `=`    | equals              | all                  |
//! | `!=`   | does not equal      | all                  |
//! | `:`    | contains            | string               |
//! | `!:`   | does not contain    | string               |
//! | `^`    | starts with         | string               |
//! | `!^`   | does not start with | string               |
//! | `>` `>=` `<` `<=` | ordering | number, date         |
//!
//! # Example
//!
//! ```
//! use ftable_core::filter::{derive_options, FilterContext, FilterEvaluator, Operation, TokenParser};
//! use ftable_core::{FilteringProperty, PropertyType, Record};
//!
//! let properties = vec![
//!     FilteringProperty::new("state", "State", PropertyType::String),
//!     FilteringProperty::new("deliveryMethod", "Delivery method", PropertyType::String),
//! ];
//! let records = vec![
//!     Record::new("A").with("state", "Activated").with("deliveryMethod", "Web"),
//!     Record::new("B").with("state", "Pending").with("deliveryMethod", "RTMP"),
//! ];
//!
//! let query = TokenParser::parse_query(&["deliveryMethod=RTMP"], Operation::And).unwrap();
//! let context = FilterContext::new(&properties);
//! let filtered = FilterEvaluator::new(&query, &context).filter_records(&records);
//!
//! let options = derive_options(&filtered, &properties);
//! assert!(options.iter().any(|o| o.property_key == "state" && o.value == "Pending"));
//! assert!(!options.iter().any(|o| o.value == "Activated"));
//! ```

mod ast;
mod error;
mod evaluator;
mod options;
mod parser;

pub use ast::{Operation, Operator, Query, Token};
pub use error::{FilterError, FilterResult};
pub use evaluator::{FilterContext, FilterEvaluator, DEFAULT_DATE_PROPERTY};
pub use options::{derive_options, values_for, FilteringOption};
pub use parser::TokenParser;
