//! Built-in constraint library
//!
//! | Family | Constraints |
//! |--------|-------------|
//! | length | `min_length`, `max_length`, `exact_length`, `length_between` |
//! | charset | `only_contains`, `contains_any`, `contains_all`, `not_contains` |
//! | pattern | `match` (glob) |
//! | format | `email`, `url`, `decimal(p,s)` |
//! | ordering | `gt`, `gte`, `lt`, `lte`, `between` |
//! | membership | `one_of` |
//! | boolean | `be_true`, `be_false` |

pub mod boolean;
pub mod charset;
pub mod content;
pub mod custom;
pub mod decimal;
pub mod length;
pub mod membership;
pub mod pattern;
pub mod range;

pub use boolean::{BeFalse, BeTrue, be_false, be_true};
pub use charset::{
    CharClass, ContainsAll, ContainsAny, NotContains, OnlyContains, SPECIAL_CHARS, contains_all,
    contains_any, not_contains, only_contains,
};
pub use content::{Email, Url, email, url};
pub use custom::{Custom, custom};
pub use decimal::{Decimal, decimal};
pub use length::{
    ExactLength, LengthBetween, LengthMode, MaxLength, MinLength, exact_length, length_between,
    max_length, min_length,
};
pub use membership::{OneOf, Scalar, one_of, one_of_str};
pub use pattern::{Match, matches};
pub use range::{Between, Gt, Gte, Lt, Lte, between, gt, gte, lt, lte};
